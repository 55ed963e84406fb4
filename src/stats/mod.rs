//! Summary figures over the whole collection, independent of active filters.

use std::collections::HashSet;

use serde::Serialize;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: usize,
    /// Distinct non-empty languages.
    pub total_languages: usize,
    /// Mean of the valid versions, rounded to two decimals; 0 when none are valid.
    pub avg_version: f64,
}

pub fn compute_stats(records: &[Record]) -> Stats {
    let total_languages = records
        .iter()
        .map(|record| record.language.as_str())
        .filter(|language| !language.is_empty())
        .collect::<HashSet<_>>()
        .len();

    let (sum, valid) = records
        .iter()
        .filter(|record| record.has_valid_version())
        .fold((0.0, 0usize), |(sum, n), record| (sum + record.version, n + 1));
    let avg_version = if valid == 0 {
        0.0
    } else {
        round_to_hundredths(sum / valid as f64)
    };

    Stats {
        total_users: records.len(),
        total_languages,
        avg_version,
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
