use crate::error::{Result, SimError};
use crate::state::Grid;

use super::boundary::UpstreamBoundary;

/// Inputs of one simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Grid points along the river (x).
    pub grid_x: usize,
    /// Grid points across the river (y).
    pub grid_y: usize,
    /// River length [m].
    pub len_x: f64,
    /// River width [m].
    pub len_y: f64,
    /// Baseline longitudinal velocity [m/s].
    pub u0: f64,
    /// Baseline lateral velocity [m/s].
    pub v0: f64,
    /// Longitudinal inhomogeneity, in [0, 1].
    pub a: f64,
    /// Lateral inhomogeneity, in [0, 1].
    pub b: f64,
    /// Baseline longitudinal diffusion coefficient [m^2/s].
    pub p0: f64,
    /// Baseline lateral diffusion coefficient [m^2/s].
    pub r0: f64,
    /// Background concentration at t = 0 [kg/m^3].
    pub c_in: f64,
    /// Injected pollutant mass [kg].
    pub mass: f64,
    /// Volumetric flow rate [m^3/s].
    pub flow_rate: f64,
    pub x0: f64,
    pub y0: f64,
    pub xt: f64,
    pub yt: f64,
    /// Number of time steps T.
    pub steps: usize,
    /// Manual timestep; `None` uses the suggested one.
    pub dt: Option<f64>,
    pub upstream: UpstreamBoundary,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            grid_x: 100,
            grid_y: 100,
            len_x: 1000.0,
            len_y: 1000.0,
            u0: 0.5,
            v0: 0.02,
            a: 0.01,
            b: 0.01,
            p0: 80.0,
            r0: 0.01,
            c_in: 1.0,
            mass: 10000.0,
            flow_rate: 5.0,
            x0: 1.0,
            y0: 1.0,
            xt: 1.0,
            yt: 1.0,
            steps: 100,
            dt: None,
            upstream: UpstreamBoundary::Open,
        }
    }
}

impl SolverParams {
    /// Range checks on the physical inputs. Grid checks live in [`Grid`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("a", self.a), ("b", self.b)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::config(format!("{name} must lie in [0, 1], got {value}")));
            }
        }
        for (name, value) in [
            ("u0", self.u0),
            ("v0", self.v0),
            ("P0", self.p0),
            ("R0", self.r0),
            ("c_in", self.c_in),
            ("mass", self.mass),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SimError::config(format!("{name} must be non-negative, got {value}")));
            }
        }
        if !(self.flow_rate > 0.0 && self.flow_rate.is_finite()) {
            return Err(SimError::config(format!(
                "flow rate Q must be positive, got {}",
                self.flow_rate
            )));
        }
        if self.steps < 1 {
            return Err(SimError::config("iteration count must be at least 1"));
        }
        for (name, value) in [("x0", self.x0), ("y0", self.y0), ("xt", self.xt), ("yt", self.yt)] {
            if !value.is_finite() {
                return Err(SimError::config(format!("{name} must be finite, got {value}")));
            }
        }
        if let Some(dt) = self.dt {
            if !(dt > 0.0 && dt.is_finite()) {
                return Err(SimError::config(format!("manual dt must be positive, got {dt}")));
            }
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid> {
        Grid::from_lengths(self.grid_x, self.grid_y, self.len_x, self.len_y)
    }

    /// Point-source concentration m / Q placed at the release cell.
    pub fn source_concentration(&self) -> f64 {
        self.mass / self.flow_rate
    }
}
