use foundation::time::CalendarDate;
use serde::Serialize;

use crate::intent::{Intent, Outcome};

/// One processed intent, for traceability and replay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    /// 0-based position in processing order.
    pub seq: u64,
    pub intent: Intent,
    pub outcome: Outcome,
    pub selected_date: CalendarDate,
}

/// Ordered log of intents processed by a session.
#[derive(Debug, Default)]
pub struct Journal {
    next_seq: u64,
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, intent: Intent, outcome: Outcome, selected_date: CalendarDate) {
        self.entries.push(JournalEntry {
            seq: self.next_seq,
            intent,
            outcome,
            selected_date,
        });
        self.next_seq += 1;
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Takes the recorded entries. Sequence numbers keep counting.
    pub fn drain(&mut self) -> Vec<JournalEntry> {
        std::mem::take(&mut self.entries)
    }
}
