use std::collections::HashSet;

use super::{ChartKind, ChartSeries, Dataset, SeriesSpec};
use crate::record::Record;
use crate::stats::compute_stats;

/// Version buckets with their inclusive upper bounds; the last bucket is open.
pub const VERSION_BUCKETS: [(&str, f64); 5] = [
    ("1.0-2.0", 2.0),
    ("2.1-3.0", 3.0),
    ("3.1-4.0", 4.0),
    ("4.1-5.0", 5.0),
    ("5.1+", f64::INFINITY),
];

const PROFILE_LIMIT: usize = 10;

/// Count of records per language, in first-seen order.
pub fn language_distribution<'a, I>(records: I) -> SeriesSpec
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut labels: Vec<String> = Vec::new();
    let mut counts: Vec<f64> = Vec::new();
    for record in records {
        match labels.iter().position(|label| *label == record.language) {
            Some(slot) => counts[slot] += 1.0,
            None => {
                labels.push(record.language.clone());
                counts.push(1.0);
            }
        }
    }

    SeriesSpec {
        kind: ChartKind::Pie,
        title: "User Language Distribution".into(),
        labels,
        datasets: vec![Dataset {
            label: "Users by Language".into(),
            data: counts,
        }],
    }
}

/// Records per version bucket. Records without a valid version are skipped.
pub fn version_distribution<'a, I>(records: I) -> SeriesSpec
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts = [0.0; VERSION_BUCKETS.len()];
    for record in records.into_iter().filter(|r| r.has_valid_version()) {
        if let Some(slot) = VERSION_BUCKETS
            .iter()
            .position(|(_, upper)| record.version <= *upper)
        {
            counts[slot] += 1.0;
        }
    }

    SeriesSpec {
        kind: ChartKind::Bar,
        title: "Version Distribution".into(),
        labels: VERSION_BUCKETS.iter().map(|(label, _)| label.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Users by Version Range".into(),
            data: counts.to_vec(),
        }],
    }
}

/// Name against version for the first `limit` records.
pub fn version_profile<'a, I>(records: I, limit: usize) -> SeriesSpec
where
    I: IntoIterator<Item = &'a Record>,
{
    let (labels, data): (Vec<String>, Vec<f64>) = records
        .into_iter()
        .take(limit)
        .map(|record| (record.name.clone(), record.version))
        .unzip();

    SeriesSpec {
        kind: ChartKind::Radar,
        title: "User Performance Metrics".into(),
        labels,
        datasets: vec![Dataset {
            label: "Version Performance".into(),
            data,
        }],
    }
}

/// The collection split at its midpoint, compared on three summary figures.
pub fn dataset_comparison(records: &[Record]) -> SeriesSpec {
    let (first, second) = records.split_at(records.len() / 2);

    let figures = |half: &[Record]| {
        let stats = compute_stats(half);
        let languages = half
            .iter()
            .map(|record| record.language.as_str())
            .collect::<HashSet<_>>()
            .len();
        vec![stats.avg_version, stats.total_users as f64, languages as f64]
    };

    SeriesSpec {
        kind: ChartKind::Bar,
        title: "Dataset Comparison Analysis".into(),
        labels: vec![
            "Average Version".into(),
            "Total Users".into(),
            "Unique Languages".into(),
        ],
        datasets: vec![
            Dataset {
                label: "Dataset 1".into(),
                data: figures(first),
            },
            Dataset {
                label: "Dataset 2".into(),
                data: figures(second),
            },
        ],
    }
}

/// Every dashboard chart, keyed by the container it is drawn into.
pub fn dashboard_series(records: &[&Record]) -> Vec<ChartSeries> {
    let owned: Vec<Record> = records.iter().map(|record| (*record).clone()).collect();
    let bind = |container_id: &str, spec: SeriesSpec| ChartSeries {
        container_id: container_id.to_string(),
        spec,
    };

    vec![
        bind("languageChart", language_distribution(records.iter().copied())),
        bind("versionChart", version_distribution(records.iter().copied())),
        bind(
            "performanceChart",
            version_profile(records.iter().copied(), PROFILE_LIMIT),
        ),
        bind("comparisonChart", dataset_comparison(&owned)),
    ]
}
