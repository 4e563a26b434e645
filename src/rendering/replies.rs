//! The fixed reply templates.
//!
//! Five rendered shapes exist (a suppressed match renders nothing): status
//! for a never-recorded topic, status with a day count, the confirmed reset
//! summary, the soft trigger notice, and the storage failure notice sent
//! when a reset could not be persisted. Everything else in the crate talks
//! in types; only this module produces chat-facing text. Error details never
//! reach the chat, only these fixed strings.

use crate::models::{ResetSummary, StatusReport};
use chrono::{DateTime, Utc};

/// Display format for instants, day first.
const INSTANT_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Formats an instant for display in replies.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

/// Renders the reply to a status query.
#[must_use]
pub fn render_status(topic: &str, report: StatusReport) -> String {
    match report {
        StatusReport::NeverRecorded => {
            format!("{topic} has never been mentioned yet. The counter has not started.")
        },
        StatusReport::Recorded { days, last_mention } => format!(
            "{} without {topic}. Last mention: {}.",
            days_phrase(days),
            format_instant(last_mention)
        ),
    }
}

/// Renders the confirmed reset summary.
///
/// Always names the new instant; the previous instant and the days survived
/// appear when a previous mention existed, otherwise the never sentinel.
#[must_use]
pub fn render_reset(topic: &str, summary: ResetSummary) -> String {
    let new_mention = format_instant(summary.new_mention);
    match (summary.days_was, summary.previous) {
        (Some(days_was), Some(previous)) => format!(
            "Counter reset \u{1f480} New {topic} mention recorded at {new_mention}. \
             The topic had survived {} (previous mention: {}).",
            days_phrase(days_was),
            format_instant(previous)
        ),
        _ => format!(
            "Counter reset \u{1f480} New {topic} mention recorded at {new_mention}. \
             The topic had never been mentioned before."
        ),
    }
}

/// Renders the soft trigger notice for an unsuppressed keyword hit.
#[must_use]
pub fn render_soft_trigger(topic: &str, matched_span: &str) -> String {
    format!(
        "Heard \"{matched_span}\". If that was a real {topic} mention, \
         confirm with the reset command; the counter is untouched until then."
    )
}

/// Renders the notice sent when a confirmed reset could not be saved.
///
/// The reset is not committed in that case, so the text must not read like
/// a confirmation.
#[must_use]
pub fn render_storage_failure(topic: &str) -> String {
    format!("Could not save the {topic} counter. The reset was not recorded; try again.")
}

/// "1 day" / "n days".
fn days_phrase(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn sample_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 17, 30, 45).unwrap()
    }

    #[test]
    fn test_format_instant_day_first() {
        assert_eq!(format_instant(sample_instant()), "09.03.2024 17:30:45");
    }

    #[test]
    fn test_status_never_recorded_names_topic() {
        let text = render_status("Fruits", StatusReport::NeverRecorded);
        assert!(text.contains("Fruits"));
        assert!(text.contains("never been mentioned"));
    }

    #[test]
    fn test_status_recorded_has_days_and_instant() {
        let text = render_status(
            "Fruits",
            StatusReport::Recorded {
                days: 3,
                last_mention: sample_instant(),
            },
        );
        assert!(text.contains("3 days without Fruits"));
        assert!(text.contains("09.03.2024 17:30:45"));
    }

    #[test]
    fn test_status_single_day_is_not_pluralized() {
        let text = render_status(
            "Fruits",
            StatusReport::Recorded {
                days: 1,
                last_mention: sample_instant(),
            },
        );
        assert!(text.contains("1 day without Fruits"));
    }

    #[test]
    fn test_reset_with_previous_mention() {
        let previous = sample_instant();
        let now = previous + Duration::days(12) + Duration::hours(3);
        let text = render_reset(
            "Fruits",
            crate::models::ResetSummary {
                new_mention: now,
                days_was: Some(12),
                previous: Some(previous),
            },
        );
        assert!(text.contains("12 days"));
        assert!(text.contains("09.03.2024 17:30:45"));
        assert!(text.contains("21.03.2024 20:30:45"));
    }

    #[test]
    fn test_reset_without_previous_uses_never_sentinel() {
        let text = render_reset(
            "Fruits",
            crate::models::ResetSummary {
                new_mention: sample_instant(),
                days_was: None,
                previous: None,
            },
        );
        assert!(text.contains("09.03.2024 17:30:45"));
        assert!(text.contains("never been mentioned before"));
    }

    #[test]
    fn test_soft_trigger_echoes_span_verbatim() {
        let text = render_soft_trigger("Fruits", "APPLESAUCE");
        assert!(text.contains("\"APPLESAUCE\""));
        assert!(text.contains("reset"));
    }

    #[test]
    fn test_storage_failure_does_not_read_like_a_confirmation() {
        let text = render_storage_failure("Fruits");
        assert!(text.contains("not recorded"));
        assert!(!text.contains("Counter reset"));
    }
}
