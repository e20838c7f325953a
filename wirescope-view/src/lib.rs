mod format;
mod selection;
mod table;

pub use format::{BodyMode, decompose_query, human_bytes, human_duration_nanos};
pub use selection::SelectionState;
pub use table::{CaptureTable, GridSink, NullSink, TableEvent};
