//! RecordStore - the fetched collection, deduplicated by identity.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{info, warn};

use super::{json_type_name, InvalidDataError, Record};

/// Identifies one fetch cycle. Only the most recently issued ticket may
/// replace the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Result of completing a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The batch replaced the collection.
    Applied { count: usize },
    /// A newer cycle was started in the meantime; the batch was dropped.
    Discarded { ticket: FetchTicket, latest: FetchTicket },
}

/// In-memory holder of the full collection.
///
/// Loads are replace-all: a batch either becomes the whole collection or the
/// store is left exactly as it was.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    issued: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the collection with `records`, keeping the first occurrence of each id.
    pub fn load(&mut self, records: Vec<Record>) -> &[Record] {
        let total = records.len();
        self.records = unique_by_id(records);
        info!(
            total,
            unique = self.records.len(),
            "loaded records, filtered to unique ids"
        );
        &self.records
    }

    /// Validate and load a raw JSON batch. Nothing changes unless every element decodes.
    pub fn load_json(&mut self, batch: &Value) -> Result<&[Record], InvalidDataError> {
        let rows = batch
            .as_array()
            .ok_or_else(|| InvalidDataError::NotAnArray(json_type_name(batch)))?;
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| Record::from_value(index, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.load(records))
    }

    /// Start a fetch cycle. Any cycle started earlier becomes stale.
    pub fn begin_cycle(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Finish a fetch cycle. Stale tickets are discarded without touching the store.
    pub fn complete_cycle(
        &mut self,
        ticket: FetchTicket,
        batch: &Value,
    ) -> Result<CycleOutcome, InvalidDataError> {
        if let Some(discarded) = self.superseded(ticket) {
            return Ok(discarded);
        }
        let count = self.load_json(batch)?.len();
        Ok(CycleOutcome::Applied { count })
    }

    /// `Some(Discarded)` when a newer cycle has been started since `ticket`.
    pub fn superseded(&self, ticket: FetchTicket) -> Option<CycleOutcome> {
        if self.is_current(ticket) {
            return None;
        }
        let latest = FetchTicket(self.issued);
        warn!(
            ticket = ticket.0,
            latest = latest.0,
            "discarding superseded fetch cycle"
        );
        Some(CycleOutcome::Discarded { ticket, latest })
    }

    /// Distinct non-empty languages in first-seen order.
    pub fn languages(&self) -> Vec<String> {
        distinct_languages(&self.records)
    }
}

pub(crate) fn distinct_languages(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| !record.language.is_empty())
        .filter(|record| seen.insert(record.language.as_str()))
        .map(|record| record.language.clone())
        .collect()
}

fn unique_by_id(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}
