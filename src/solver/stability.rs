use crate::error::{Result, SimError};
use crate::state::Grid;

use super::fields::Fields;

/// Field maxima that bound the explicit timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldExtrema {
    /// max |u|
    pub u_max: f64,
    /// max |v|
    pub v_max: f64,
    pub p_max: f64,
    pub r_max: f64,
}

impl FieldExtrema {
    pub fn of(fields: &Fields) -> Self {
        fn abs_max(xs: &[f64]) -> f64 {
            xs.iter().map(|x| x.abs()).fold(0.0_f64, f64::max)
        }
        fn max(xs: &[f64]) -> f64 {
            xs.iter().copied().fold(0.0_f64, f64::max)
        }
        Self {
            u_max: abs_max(&fields.u),
            v_max: abs_max(&fields.v),
            p_max: max(&fields.p),
            r_max: max(&fields.r),
        }
    }

    /// |u|/dx + |v|/dy
    fn advective_rate(&self, grid: &Grid) -> f64 {
        self.u_max / grid.dx + self.v_max / grid.dy
    }

    /// P/dx^2 + R/dy^2
    fn diffusive_rate(&self, grid: &Grid) -> f64 {
        self.p_max / (grid.dx * grid.dx) + self.r_max / (grid.dy * grid.dy)
    }

    /// Largest dt with dt * (|u|/dx + |v|/dy) <= 1. Infinite without advection.
    pub fn advective_limit(&self, grid: &Grid) -> f64 {
        let rate = self.advective_rate(grid);
        if rate > 0.0 { 1.0 / rate } else { f64::INFINITY }
    }

    /// 0.5 / (P/dx^2 + R/dy^2). Infinite without diffusion.
    pub fn diffusive_limit(&self, grid: &Grid) -> f64 {
        let rate = self.diffusive_rate(grid);
        if rate > 0.0 { 0.5 / rate } else { f64::INFINITY }
    }
}

/// Outcome of checking a timestep against both stability bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilityReport {
    pub stable: bool,
    /// Courant number dt * (|u|/dx + |v|/dy).
    pub cfl: f64,
    pub diffusive_limit: f64,
}

impl StabilityReport {
    /// Convert an unstable report into [`SimError::Unstable`].
    pub fn into_result(self, dt: f64) -> Result<Self> {
        if self.stable {
            Ok(self)
        } else {
            Err(SimError::Unstable {
                dt,
                cfl: self.cfl,
                diffusive_limit: self.diffusive_limit,
            })
        }
    }
}

/// The tighter of the advective and diffusive limits.
/// Fails when neither advection nor diffusion is present.
pub fn suggest_timestep(extrema: &FieldExtrema, grid: &Grid) -> Result<f64> {
    let dt_adv = extrema.advective_limit(grid);
    let dt_diff = extrema.diffusive_limit(grid);
    let dt = dt_adv.min(dt_diff);
    if !dt.is_finite() {
        return Err(SimError::config(
            "velocity and diffusion fields are all zero; no timestep can be derived",
        ));
    }
    Ok(dt)
}

/// Stable iff CFL <= 1 and dt <= diffusive limit.
pub fn verify_timestep(extrema: &FieldExtrema, grid: &Grid, dt: f64) -> StabilityReport {
    let cfl = dt * extrema.advective_rate(grid);
    let diffusive_limit = extrema.diffusive_limit(grid);
    StabilityReport {
        stable: cfl <= 1.0 && dt <= diffusive_limit,
        cfl,
        diffusive_limit,
    }
}
