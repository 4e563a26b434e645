//! Line-oriented JSON feed.
//!
//! The transport seam: inbound events arrive one JSON object per line,
//! replies leave the same way. A chat integration pipes its traffic through
//! this protocol instead of linking the crate. One bad line must never stop
//! the stream, so malformed events are logged and skipped.

use crate::models::{InboundEvent, OutboundReply};
use crate::rendering;
use crate::services::TrackerService;
use crate::storage::RecordStore;
use crate::{Error, Result};
use chrono::Utc;
use std::io::{BufRead, Write};

/// Runs the feed loop until the inbound stream ends.
///
/// Each parsed event is handled at the current wall-clock instant; the
/// reply, when there is one, is written back as a single JSON line and
/// flushed. A reset that fails to persist produces the storage failure
/// notice instead of a confirmation, and the loop continues. Returns the
/// number of events handled.
///
/// # Errors
///
/// Returns [`Error::Feed`] when the inbound stream cannot be read or a
/// reply cannot be written.
pub fn run_loop<S, R, W>(service: &TrackerService<S>, reader: R, writer: &mut W) -> Result<u64>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    let mut handled: u64 = 0;

    for line in reader.lines() {
        let line = line.map_err(|e| Error::Feed {
            operation: "read_event".to_string(),
            cause: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event: InboundEvent = match serde_json::from_str(trimmed) {
            Ok(event) => event,
            Err(parse_err) => {
                tracing::warn!(error = %parse_err, "skipping malformed feed line");
                continue;
            },
        };

        handled += 1;
        match service.handle_event(&event, Utc::now()) {
            Ok(Some(reply)) => write_reply(writer, &reply)?,
            Ok(None) => {},
            Err(e) => {
                tracing::error!(error = %e, kind = event.kind(), "event handling failed");
                let notice = OutboundReply::new(
                    event.chat(),
                    rendering::render_storage_failure(service.topic()),
                );
                write_reply(writer, &notice)?;
            },
        }
    }

    tracing::debug!(handled, "feed stream ended");
    Ok(handled)
}

/// Writes one reply line and flushes it out to the transport.
fn write_reply<W: Write>(writer: &mut W, reply: &OutboundReply) -> Result<()> {
    let json = serde_json::to_string(reply).map_err(|e| Error::Feed {
        operation: "encode_reply".to_string(),
        cause: e.to_string(),
    })?;
    writeln!(writer, "{json}").map_err(|e| Error::Feed {
        operation: "write_reply".to_string(),
        cause: e.to_string(),
    })?;
    writer.flush().map_err(|e| Error::Feed {
        operation: "flush_reply".to_string(),
        cause: e.to_string(),
    })?;
    Ok(())
}
