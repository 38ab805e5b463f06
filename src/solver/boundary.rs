use serde::Deserialize;

use crate::state::Grid;

/// Treatment of the upstream edge (x = 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamBoundary {
    /// x = 0 is never written: it keeps whatever the slice held before the step.
    /// For levels k >= 1 that is the zero fill, so the column acts as a clean inflow.
    #[default]
    Open,
    /// Copy x = 1 into x = 0, matching the downstream outflow rule.
    ZeroGradient,
}

/// Open boundary conditions on one concentration slice.
///   - x = nx-1: zero-gradient outflow (copy x = nx-2)
///   - y = 0 and y = ny-1: Neumann banks (copy the adjacent row)
///   - x = 0: see [`UpstreamBoundary`]
/// X edges are written first, then the banks overwrite the corners.
pub fn apply_open_boundaries(c: &mut [f64], grid: &Grid, upstream: UpstreamBoundary) {
    let nx = grid.nx;
    let ny = grid.ny;

    // Pass 1: left/right edges
    for j in 0..ny {
        c[grid.idx(nx - 1, j)] = c[grid.idx(nx - 2, j)];
        if upstream == UpstreamBoundary::ZeroGradient {
            c[grid.idx(0, j)] = c[grid.idx(1, j)];
        }
    }

    // Pass 2: banks
    for i in 0..nx {
        c[grid.idx(i, 0)] = c[grid.idx(i, 1)];
        c[grid.idx(i, ny - 1)] = c[grid.idx(i, ny - 2)];
    }
}
