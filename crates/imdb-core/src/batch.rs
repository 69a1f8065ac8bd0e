//! Batch planning for sources too large to load at once.
//!
//! A batched source is split into fixed-size row windows. Full windows come
//! first (`total / batch_size` of them), then one remainder window for the
//! tail rows. Partitions are numbered from 1 in window order.
//!
//! Debug mode caps the full windows at one but keeps the remainder step, so a
//! debug run samples the first window plus the `total % batch_size` rows that
//! follow it.

/// One row window of a batched source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchWindow {
    /// 1-based partition number.
    pub partition: usize,
    /// Data rows skipped before the window.
    pub skip_rows: usize,
    /// Data rows in the window.
    pub rows: usize,
}

impl BatchWindow {
    /// Two-digit partition suffix used in output file names.
    pub fn suffix(&self) -> String {
        format!("{:02}", self.partition)
    }
}

/// Splits `total_rows` into windows of `batch_size`.
///
/// In debug mode a single full window is planned, capped at `total_rows`.
/// The remainder window is planned in both modes unless it would start past
/// the last row.
pub fn plan_batches(total_rows: usize, batch_size: usize, debug: bool) -> Vec<BatchWindow> {
    if total_rows == 0 || batch_size == 0 {
        return Vec::new();
    }

    let full = if debug { 1 } else { total_rows / batch_size };
    let mut windows: Vec<BatchWindow> = (0..full)
        .map(|index| BatchWindow {
            partition: index + 1,
            skip_rows: index * batch_size,
            rows: batch_size.min(total_rows - index * batch_size),
        })
        .collect();

    let remainder = total_rows % batch_size;
    if remainder > 0 && full * batch_size < total_rows {
        windows.push(BatchWindow {
            partition: full + 1,
            skip_rows: full * batch_size,
            rows: remainder,
        });
    }
    windows
}
