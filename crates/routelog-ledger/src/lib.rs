//! The distance ledger: cache-first resolution of new trips and the weekly
//! export view over the recorded history.

pub mod error;
pub mod export;
pub mod history;
pub mod resolver;

pub use error::{ExportError, ResolveError};
pub use export::{export_filename, group_for_export, ExportRow, NO_ROUTES};
pub use history::{week_summaries, WeekSummary};
pub use resolver::{DistanceResolver, Resolution, ResolutionState};
