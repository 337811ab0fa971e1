// src/data_analysis/grouping.rs

use crate::data_analysis::aligned_series::{AlignedRow, AlignedSeries};

/// Arithmetic mean of the present values. `None` when every value is missing.
pub(crate) fn mean_of_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Collapses a group of rows into one: the mean of `seconds_passed` and of every channel.
fn mean_row(group: &[AlignedRow], width: usize) -> AlignedRow {
    let seconds = group.iter().map(|r| r.seconds_passed).sum::<f64>() / group.len() as f64;
    let values = (0..width)
        .map(|idx| mean_of_present(group.iter().map(|r| r.values[idx])))
        .collect();
    AlignedRow::new(seconds, values)
}

/// Shifts `seconds_passed` so the first row sits at 0.
fn rebase_to_zero(rows: &mut [AlignedRow]) {
    if let Some(origin) = rows.first().map(|r| r.seconds_passed) {
        for row in rows.iter_mut() {
            row.seconds_passed -= origin;
        }
    }
}

/// Replaces every `group_n` consecutive rows by their mean. The last block may be shorter.
///
/// The block means of `seconds_passed` are shifted so the first row sits at 0. A plain block
/// mean would put the first row at the middle of the first block (0.375 s for four readings
/// 250 ms apart); here that offset is subtracted from every row.
/// `group_n` must be positive.
pub(crate) fn block_average(series: &AlignedSeries, group_n: usize) -> AlignedSeries {
    let width = series.channels().len();
    let mut rows: Vec<AlignedRow> = series
        .rows()
        .chunks(group_n.max(1))
        .map(|block| mean_row(block, width))
        .collect();

    rebase_to_zero(&mut rows);

    AlignedSeries::from_parts(series.channels().to_vec(), rows)
}

/// Replaces the rows sharing one `seconds_passed` value by their mean, ordered by time.
///
/// Readings logged earlier than the first one sort ahead of it, so the result is shifted
/// to start at 0 again.
pub(crate) fn group_by_seconds_passed(series: &AlignedSeries) -> AlignedSeries {
    let width = series.channels().len();

    let mut ordered: Vec<AlignedRow> = series.rows().to_vec();
    ordered.sort_by(|a, b| a.seconds_passed.total_cmp(&b.seconds_passed)); // stable

    let mut rows: Vec<AlignedRow> = ordered
        .chunk_by(|a, b| a.seconds_passed == b.seconds_passed)
        .map(|group| mean_row(group, width))
        .collect();
    rebase_to_zero(&mut rows);

    AlignedSeries::from_parts(series.channels().to_vec(), rows)
}
