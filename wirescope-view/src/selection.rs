use crate::table::TableEvent;

/// The focused record id, if any. Only explicit selection moves it; new
/// arrivals never do. A table clear resets it so it cannot dangle on a
/// removed row.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: Option<String>,
}

impl SelectionState {
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    pub fn current(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn on_table_event(&mut self, event: TableEvent) {
        if event == TableEvent::Cleared {
            self.selected = None;
        }
    }
}
