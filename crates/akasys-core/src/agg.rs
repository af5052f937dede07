//! Grouping and windowing primitives shared by the insight rules and stats
//!
//! Every analysis repeats the same "group by key, sum a numeric field"
//! pattern, so it lives here once. Date windows are positional over the
//! sorted set of distinct dates *present in the data* — never calendar
//! arithmetic — so gaps in the data do not shrink a comparison window.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDate;

/// Group rows by a key and sum a numeric field per group
pub fn group_sum<T, K>(
    rows: &[T],
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> f64,
) -> HashMap<K, f64>
where
    K: Eq + Hash,
{
    let mut sums: HashMap<K, f64> = HashMap::new();
    for row in rows {
        *sums.entry(key(row)).or_insert(0.0) += value(row);
    }
    sums
}

/// The sorted set of distinct dates present in `rows`, oldest first
pub fn distinct_sorted_dates<T>(rows: &[T], date: impl Fn(&T) -> NaiveDate) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = rows.iter().map(date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// The group with the largest sum, if any
///
/// Ties break toward the lexicographically smallest key so the result is
/// deterministic regardless of hash iteration order.
pub fn max_group(sums: &HashMap<String, f64>) -> Option<(&str, f64)> {
    sums.iter()
        .max_by(|a, b| {
            a.1.partial_cmp(b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(a.0))
        })
        .map(|(k, v)| (k.as_str(), *v))
}

/// Percentage change from `previous` to `current`
///
/// A zero baseline is reported as +100% when the current value is positive
/// and 0% otherwise, matching the dashboard's metric-card convention.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}
