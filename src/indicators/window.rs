//! Window selection over newest-first series.
//!
//! Storage is newest-first, so "older" means a higher index. Two shapes of
//! window exist and must not be mixed up:
//! - trailing: the current day plus older days (moving averages)
//! - prior: older days only, excluding the current day (volume ratio, change)

/// The `period` days ending on `index`: positions `index ..= index + period - 1`.
///
/// `None` when the series does not reach back far enough.
pub fn trailing_window<T>(series: &[T], index: usize, period: usize) -> Option<&[T]> {
    if period == 0 {
        return None;
    }
    let end = index.checked_add(period)?;
    series.get(index..end)
}

/// The `count` days strictly older than `index`: positions `index + 1 ..= index + count`.
pub fn prior_window<T>(series: &[T], index: usize, count: usize) -> Option<&[T]> {
    if count == 0 {
        return None;
    }
    let start = index.checked_add(1)?;
    let end = start.checked_add(count)?;
    series.get(start..end)
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
