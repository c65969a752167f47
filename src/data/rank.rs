use std::cmp::Ordering;

use super::filter::ViewRow;

/// How many stations each ranking shows.
pub const RANK_SIZE: usize = 10;

/// Rows with a defined display value, in view order.
fn eligible(rows: &[ViewRow]) -> Vec<(f64, &ViewRow)> {
    rows.iter()
        .filter_map(|r| r.display.map(|d| (d, r)))
        .collect()
}

/// Pick `k` rows by `order` (stable, so earlier rows win ties), then lay
/// them out by `display_order` for plotting.
fn select(
    rows: &[ViewRow],
    k: usize,
    order: impl Fn(f64, f64) -> Ordering,
    display_order: impl Fn(f64, f64) -> Ordering,
) -> Vec<ViewRow> {
    let mut ranked = eligible(rows);
    ranked.sort_by(|a, b| order(a.0, b.0));
    ranked.truncate(k);
    ranked.sort_by(|a, b| display_order(a.0, b.0));
    ranked.into_iter().map(|(_, r)| r.clone()).collect()
}

/// The `k` largest display values, returned in ascending order.
pub fn top_k(rows: &[ViewRow], k: usize) -> Vec<ViewRow> {
    select(rows, k, |a, b| b.total_cmp(&a), |a, b| a.total_cmp(&b))
}

/// The `k` smallest display values, returned in descending order.
pub fn bottom_k(rows: &[ViewRow], k: usize) -> Vec<ViewRow> {
    select(rows, k, |a, b| a.total_cmp(&b), |a, b| b.total_cmp(&a))
}
