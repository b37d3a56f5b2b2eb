//!  Storage is a single flat directory of text files.
//!   - `<day>_activity_log.txt` files receive one `<timestamp>: <description>` line per
//!     successful cycle, see [activity_log::ActivityLogStore].
//!   - `<day>_timeline.txt` files hold the last timeline the operator chose to save, see
//!     [timeline_store::TimelineStore].
//!   - Days are local calendar days formatted as `YYYY-MM-DD`.

pub mod activity_log;
pub mod entities;
pub mod timeline_store;
