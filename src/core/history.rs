use crate::core::movie::MovieRecord;
use tracing::debug;

/// Records of successful lookups for the current session, oldest first.
#[derive(Debug, Default, Clone)]
pub struct SearchHistory {
    records: Vec<MovieRecord>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without deduplication; searching a title twice stores it twice.
    pub fn append(&mut self, record: MovieRecord) {
        debug!(title = %record.title, "Appending to history");
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        debug!(count = self.records.len(), "Clearing history");
        self.records.clear();
    }

    pub fn all(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Last `n` records in insertion order.
    pub fn recent(&self, n: usize) -> &[MovieRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
