use user_dashboard::Record;

/// A mixed collection: repeated languages, tied names, a missing version.
pub fn sample() -> Vec<Record> {
    vec![
        Record::new("1", "Bob", "Go", 1.2),
        Record::new("2", "alice", "Rust", 3.4),
        Record::new("3", "Álvaro", "Go", 5.0),
        Record::new("4", "Carol", "Python", f64::NAN),
        Record::new("5", "Bob", "Rust", 2.2),
        Record::new("6", "dave", "Go", 4.4),
        Record::new("7", "Eve", "", 0.0),
    ]
}

pub fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}
