use crate::error::{Result, SimError};

/// Structured 2D grid over the river reach.
/// x runs downstream (length), y runs across the channel (width).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl Grid {
    /// Build a grid from point counts and spacings.
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Result<Self> {
        if nx < 2 || ny < 2 {
            return Err(SimError::config(format!(
                "grid must have at least 2 points per axis, got {nx} x {ny}"
            )));
        }
        if !(dx > 0.0 && dx.is_finite()) || !(dy > 0.0 && dy.is_finite()) {
            return Err(SimError::config(format!(
                "grid spacing must be positive, got dx={dx}, dy={dy}"
            )));
        }
        Ok(Self { nx, ny, dx, dy })
    }

    /// Build a grid spanning `[0, len_x] x [0, len_y]`: dx = Lx/(nx-1), dy = Ly/(ny-1).
    pub fn from_lengths(nx: usize, ny: usize, len_x: f64, len_y: f64) -> Result<Self> {
        if nx < 2 || ny < 2 {
            return Err(SimError::config(format!(
                "grid must have at least 2 points per axis, got {nx} x {ny}"
            )));
        }
        if !(len_x > 0.0) || !(len_y > 0.0) {
            return Err(SimError::config(format!(
                "domain lengths must be positive, got Lx={len_x}, Ly={len_y}"
            )));
        }
        Self::new(nx, ny, len_x / (nx - 1) as f64, len_y / (ny - 1) as f64)
    }

    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Flat row-major index: y-rows of length nx.
    #[inline(always)]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        j * self.nx + i
    }

    /// x[i] = i * dx
    pub fn x_coords(&self) -> Vec<f64> {
        (0..self.nx).map(|i| i as f64 * self.dx).collect()
    }

    /// y[j] = j * dy
    pub fn y_coords(&self) -> Vec<f64> {
        (0..self.ny).map(|j| j as f64 * self.dy).collect()
    }
}

/// Concentration history with one `nx * ny` slice per time level `0..=steps`.
///
/// Slices are stored back to back; within a slice the layout matches [`Grid::idx`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConcentrationTensor {
    grid: Grid,
    steps: usize,
    data: Vec<f64>,
}

impl ConcentrationTensor {
    /// Zero-filled tensor for a run of `steps` time steps.
    pub fn zeros(grid: Grid, steps: usize) -> Self {
        Self {
            grid,
            steps,
            data: vec![0.0; (steps + 1) * grid.n_cells()],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of stored time levels (steps + 1).
    pub fn levels(&self) -> usize {
        self.steps + 1
    }

    pub fn slice(&self, k: usize) -> &[f64] {
        let n = self.grid.n_cells();
        &self.data[k * n..(k + 1) * n]
    }

    pub fn slice_mut(&mut self, k: usize) -> &mut [f64] {
        let n = self.grid.n_cells();
        &mut self.data[k * n..(k + 1) * n]
    }

    /// Borrow level `k - 1` for reading and level `k` for writing.
    /// The two slices never alias.
    pub fn step_pair(&mut self, k: usize) -> (&[f64], &mut [f64]) {
        debug_assert!(k >= 1 && k <= self.steps);
        let n = self.grid.n_cells();
        let (head, tail) = self.data.split_at_mut(k * n);
        (&head[(k - 1) * n..], &mut tail[..n])
    }

    pub fn get(&self, k: usize, i: usize, j: usize) -> f64 {
        self.slice(k)[self.grid.idx(i, j)]
    }

    /// Concentration along all x at row `j` of level `k`.
    pub fn x_profile(&self, k: usize, j: usize) -> Vec<f64> {
        let start = self.grid.idx(0, j);
        self.slice(k)[start..start + self.grid.nx].to_vec()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Concentration at the target cell, one entry per time level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetSeries {
    values: Vec<f64>,
}

impl TargetSeries {
    pub fn with_capacity(levels: usize) -> Self {
        Self {
            values: Vec::with_capacity(levels),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Physical times k * dt paired with each entry.
    pub fn times(&self, dt: f64) -> Vec<f64> {
        (0..self.values.len()).map(|k| k as f64 * dt).collect()
    }
}

/// Cross-section history: the x-profile at the target row for every time level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileHistory {
    /// Row index the profiles were taken along.
    pub row: usize,
    profiles: Vec<Vec<f64>>,
}

impl ProfileHistory {
    pub fn new(row: usize, levels: usize) -> Self {
        Self {
            row,
            profiles: Vec::with_capacity(levels),
        }
    }

    pub fn push(&mut self, profile: Vec<f64>) {
        self.profiles.push(profile);
    }

    /// Profile recorded for time level `k`.
    pub fn get(&self, k: usize) -> Option<&[f64]> {
        self.profiles.get(k).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
