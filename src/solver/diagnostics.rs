use crate::error::{Result, SimError};
use crate::state::{ConcentrationTensor, TargetSeries};

/// Highest concentration seen at the target cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakSummary {
    pub value: f64,
    /// First time level reaching the peak.
    pub step: usize,
    pub time: f64,
    /// Physical time of the last level, T * dt.
    pub end_time: f64,
}

/// Peak of the target series; `None` for an empty series.
pub fn peak_at_target(series: &TargetSeries, dt: f64) -> Option<PeakSummary> {
    let values = series.values();
    let mut peak: Option<(usize, f64)> = None;
    for (k, &v) in values.iter().enumerate() {
        if peak.map_or(true, |(_, best)| v > best) {
            peak = Some((k, v));
        }
    }
    let (step, value) = peak?;
    Some(PeakSummary {
        value,
        step,
        time: step as f64 * dt,
        end_time: (values.len() - 1) as f64 * dt,
    })
}

/// Time levels floor(T * f) for each fraction f, where T = levels - 1.
pub fn profile_snapshot_steps(levels: usize, fractions: &[f64]) -> Vec<usize> {
    let last = levels.saturating_sub(1);
    fractions
        .iter()
        .map(|f| ((last as f64 * f.clamp(0.0, 1.0)).floor() as usize).min(last))
        .collect()
}

/// (min, max) of one time level, ignoring non-finite values.
pub fn slice_range(tensor: &ConcentrationTensor, k: usize) -> (f64, f64) {
    tensor
        .slice(k)
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Fail on the first NaN or infinite value in the history, scanning level by level.
pub fn scan_non_finite(tensor: &ConcentrationTensor) -> Result<()> {
    let grid = *tensor.grid();
    for step in 0..tensor.levels() {
        let slice = tensor.slice(step);
        if let Some(pos) = slice.iter().position(|v| !v.is_finite()) {
            return Err(SimError::NumericalAnomaly {
                step,
                i: pos % grid.nx,
                j: pos / grid.nx,
                value: slice[pos],
            });
        }
    }
    Ok(())
}
