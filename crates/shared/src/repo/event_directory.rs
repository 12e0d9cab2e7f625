use crate::domain::event::EventRecord;

/// Read-only, in-memory event listing.
#[derive(Debug, Clone, Default)]
pub struct EventDirectory {
    records: Vec<EventRecord>,
}

impl EventDirectory {
    pub fn new(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Case-insensitive substring match on name or location, in listing order.
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&EventRecord> {
        let needle = query.to_lowercase();
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    pub fn find(&self, id: u64) -> Option<&EventRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}
