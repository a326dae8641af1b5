//! Derived views over record collections.
//!
//! Provides pure functions that sum, count and group records for the charts,
//! tables and metrics on every page. None of the functions mutate their input
//! and all of them accept an empty slice, returning an empty or zero result.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap},
    hash::Hash,
};

use time::Date;

use crate::record::Record;

/// Sums `amount` per date.
///
/// Records without a date are skipped.
///
/// # Returns
/// BTreeMap mapping each date to the sum of amounts on that date, in
/// ascending date order.
pub fn sum_by_date<R>(
    records: &[R],
    date: impl Fn(&R) -> Option<Date>,
    amount: impl Fn(&R) -> f64,
) -> BTreeMap<Date, f64> {
    let mut totals = BTreeMap::new();

    for record in records {
        if let Some(date) = date(record) {
            *totals.entry(date).or_insert(0.0) += amount(record);
        }
    }

    totals
}

/// Sums `amount` per category, e.g. volunteer hours per role.
///
/// Records without a category are skipped.
///
/// # Returns
/// Vector of (category, total) pairs in the order each category first appears.
pub fn sum_by_category<R, K: Eq + Hash + Clone>(
    records: &[R],
    category: impl Fn(&R) -> Option<K>,
    amount: impl Fn(&R) -> f64,
) -> Vec<(K, f64)> {
    let mut totals: Vec<(K, f64)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for record in records {
        let Some(key) = category(record) else {
            continue;
        };

        let position = *positions.entry(key.clone()).or_insert_with(|| {
            totals.push((key, 0.0));
            totals.len() - 1
        });

        totals[position].1 += amount(record);
    }

    totals
}

/// Counts the records in each category.
///
/// Records without a category are skipped.
///
/// # Returns
/// Vector of (category, count) pairs, most frequent first. Categories with
/// the same count keep the order they first appear in.
pub fn count_by_category<R, K: Eq + Hash + Clone>(
    records: &[R],
    category: impl Fn(&R) -> Option<K>,
) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for key in records.iter().filter_map(&category) {
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            counts.push((key, 0));
            counts.len() - 1
        });

        counts[position].1 += 1;
    }

    // Stable, so ties stay in first-seen order.
    counts.sort_by(|(_, a), (_, b)| b.cmp(a));
    counts
}

/// The sum of `amount` over every record, or zero for no records.
pub fn total_amount<R>(records: &[R], amount: impl Fn(&R) -> f64) -> f64 {
    records.iter().map(amount).sum()
}

/// A table of sums keyed by a row category and a column category.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab<Row, Col> {
    /// Row keys in ascending order.
    pub rows: Vec<Row>,
    /// Column keys in ascending order.
    pub columns: Vec<Col>,
    cells: Vec<Vec<f64>>,
}

impl<Row, Col> CrossTab<Row, Col> {
    /// Each row key with its sums, one per column.
    pub fn series(&self) -> impl Iterator<Item = (&Row, &[f64])> {
        self.rows
            .iter()
            .zip(self.cells.iter().map(Vec::as_slice))
    }
}

/// Sums `amount` for every combination of `row` and `column`, e.g. donations
/// per donor type per date.
///
/// Records missing either key are skipped. Combinations that never occur
/// are filled with zero.
pub fn cross_tab<R, Row: Ord + Clone, Col: Ord + Clone>(
    records: &[R],
    row: impl Fn(&R) -> Option<Row>,
    column: impl Fn(&R) -> Option<Col>,
    amount: impl Fn(&R) -> f64,
) -> CrossTab<Row, Col> {
    let mut totals: BTreeMap<(Row, Col), f64> = BTreeMap::new();

    for record in records {
        if let (Some(row), Some(column)) = (row(record), column(record)) {
            *totals.entry((row, column)).or_insert(0.0) += amount(record);
        }
    }

    let rows: Vec<Row> = totals
        .keys()
        .map(|(row, _)| row.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let columns: Vec<Col> = totals
        .keys()
        .map(|(_, column)| column.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut cells = vec![vec![0.0; columns.len()]; rows.len()];

    for ((row, column), total) in &totals {
        // Both searches succeed since the keys were collected from `totals`.
        if let (Ok(i), Ok(j)) = (rows.binary_search(row), columns.binary_search(column)) {
            cells[i][j] = *total;
        }
    }

    CrossTab {
        rows,
        columns,
        cells,
    }
}

/// A record from one of the two sequences merged by [merged_recent].
#[derive(Debug, PartialEq)]
pub enum Activity<'a, A, B> {
    First(&'a A),
    Second(&'a B),
}

// Derived Clone/Copy would require `A: Clone` and `B: Clone`.
impl<A, B> Clone for Activity<'_, A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B> Copy for Activity<'_, A, B> {}

/// An entry in a merged recency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentActivity<'a, A, B> {
    /// The label of the sequence the record came from, e.g. "Donors".
    pub source: &'a str,
    pub date: Option<Date>,
    pub record: Activity<'a, A, B>,
}

/// Merges two record sequences into one list ordered by date, most recent
/// first, keeping at most `limit` entries.
///
/// Records with the same date keep the order of `first` followed by
/// `second`. Records without a date go last.
pub fn merged_recent<'a, A: Record, B: Record>(
    first: &'a [A],
    second: &'a [B],
    first_label: &'a str,
    second_label: &'a str,
    limit: usize,
) -> Vec<RecentActivity<'a, A, B>> {
    let mut merged: Vec<RecentActivity<'a, A, B>> = first
        .iter()
        .map(|record| RecentActivity {
            source: first_label,
            date: record.date(),
            record: Activity::First(record),
        })
        .chain(second.iter().map(|record| RecentActivity {
            source: second_label,
            date: record.date(),
            record: Activity::Second(record),
        }))
        .collect();

    merged.sort_by(|a, b| most_recent_first(a.date, b.date));
    merged.truncate(limit);
    merged
}

fn most_recent_first(a: Option<Date>, b: Option<Date>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
