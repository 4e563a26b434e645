//! Reply rendering.
//!
//! All user-visible text lives here: the fixed reply templates for status
//! queries, confirmed resets, and soft trigger notices, plus timestamp
//! display formatting.

mod replies;

pub use replies::{
    format_instant, render_reset, render_soft_trigger, render_status, render_storage_failure,
};
