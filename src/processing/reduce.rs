//! Missing-aware reductions over measure values.

use serde::Serialize;

/// Built-in reduction operations over a measure column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReduceOp {
    /// Count present (non-missing) values.
    Count,
    /// Sum present values.
    Sum,
    /// Arithmetic mean of present values.
    Mean,
    /// Minimum present value.
    Min,
    /// Maximum present value.
    Max,
}

/// Reduce an iterator of optional measure values.
///
/// Missing values are skipped, never zero-filled. `Count` always returns `Some` (possibly
/// `0.0`); every other op returns `None` when no value is present.
pub fn reduce<I>(values: I, op: ReduceOp) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut count = 0usize;
    let mut acc: Option<f64> = None;
    for v in values.into_iter().flatten() {
        count += 1;
        acc = Some(match (op, acc) {
            (ReduceOp::Min, Some(a)) => a.min(v),
            (ReduceOp::Max, Some(a)) => a.max(v),
            (ReduceOp::Count | ReduceOp::Sum | ReduceOp::Mean, Some(a)) => a + v,
            (_, None) => v,
        });
    }

    match op {
        ReduceOp::Count => Some(count as f64),
        ReduceOp::Mean => acc.map(|sum| sum / count as f64),
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => acc,
    }
}
