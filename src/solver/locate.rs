use crate::state::Grid;

/// A user coordinate snapped to an interior grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPoint {
    pub i: usize,
    pub j: usize,
    /// Grid coordinates of the chosen cell (the "nearest grid point used").
    pub x: f64,
    pub y: f64,
}

/// Release and target cells of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedIndex {
    pub release: ResolvedPoint,
    pub target: ResolvedPoint,
}

/// Index of the coordinate closest to `value`; ties go to the lowest index.
pub fn nearest_index(coords: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (k, &c) in coords.iter().enumerate() {
        let dist = (c - value).abs();
        if dist < best_dist {
            best = k;
            best_dist = dist;
        }
    }
    best
}

/// Move an edge index one cell inward so both stencil neighbours exist.
/// On a 2-point axis there is no interior cell and the result is 0.
pub fn clamp_interior(mut index: usize, n: usize) -> usize {
    if index == 0 {
        index += 1;
    }
    if index == n - 1 {
        index -= 1;
    }
    index
}

/// Snap a continuous (x, y) to the nearest interior cell.
pub fn resolve(grid: &Grid, x: f64, y: f64) -> ResolvedPoint {
    let xs = grid.x_coords();
    let ys = grid.y_coords();
    let i = clamp_interior(nearest_index(&xs, x), grid.nx);
    let j = clamp_interior(nearest_index(&ys, y), grid.ny);
    ResolvedPoint { i, j, x: xs[i], y: ys[j] }
}

pub fn resolve_pair(grid: &Grid, release: (f64, f64), target: (f64, f64)) -> ResolvedIndex {
    ResolvedIndex {
        release: resolve(grid, release.0, release.1),
        target: resolve(grid, target.0, target.1),
    }
}
