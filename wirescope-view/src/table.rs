use wirescope_core::Snapshot;

/// Contract of the presentation grid. The grid gets incremental appends so
/// it never re-renders accumulated history, and a full reset on clear.
pub trait GridSink {
    fn append(&mut self, row: &Snapshot);
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl GridSink for NullSink {
    fn append(&mut self, _row: &Snapshot) {}
    fn reset(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    Appended,
    Cleared,
}

/// Append-only list of delivered snapshots, in delivery order. New arrivals
/// never touch existing rows; `clear` is the only way rows leave. Growth is
/// unbounded for the session.
#[derive(Debug, Default)]
pub struct CaptureTable<S: GridSink> {
    rows: Vec<Snapshot>,
    sink: S,
}

impl<S: GridSink> CaptureTable<S> {
    pub fn new(sink: S) -> Self {
        Self {
            rows: Vec::new(),
            sink,
        }
    }

    pub fn on_record(&mut self, snapshot: Snapshot) -> TableEvent {
        self.sink.append(&snapshot);
        self.rows.push(snapshot);
        TableEvent::Appended
    }

    pub fn clear(&mut self) -> TableEvent {
        self.rows.clear();
        self.sink.reset();
        TableEvent::Cleared
    }

    pub fn rows(&self) -> &[Snapshot] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row carrying `id`. Duplicate ids are kept as distinct rows, so
    /// lookups resolve to the earliest arrival.
    pub fn get(&self, id: &str) -> Option<&Snapshot> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
