mod boundary;
mod core;
pub mod diagnostics;
mod fields;
mod locate;
mod params;
mod stability;

// Re-export public API
pub use boundary::{apply_open_boundaries, UpstreamBoundary};
pub use self::core::ftcs_step;
pub use fields::{FieldBaseline, Fields};
pub use locate::{resolve, resolve_pair, ResolvedIndex, ResolvedPoint};
pub use params::SolverParams;
pub use stability::{suggest_timestep, verify_timestep, FieldExtrema, StabilityReport};

use log::{debug, info, warn};

use crate::error::Result;
use crate::state::{ConcentrationTensor, Grid, ProfileHistory, TargetSeries};

/// Interval (in steps) between progress log lines.
const PROGRESS_EVERY: usize = 1000;

/// Concentration history of one integration together with its derived series.
pub struct Integration {
    pub tensor: ConcentrationTensor,
    pub target_series: TargetSeries,
    pub profiles: ProfileHistory,
}

/// Level-0 field: `c_in` everywhere and `c0` at the release cell.
pub fn initial_slice(grid: &Grid, c_in: f64, release: &ResolvedPoint, c0: f64) -> Vec<f64> {
    let mut c = vec![c_in; grid.n_cells()];
    c[grid.idx(release.i, release.j)] = c0;
    c
}

/// Advance `initial` through `steps` FTCS steps.
///
/// Level k is computed from level k-1 only. Each level gets the open boundary
/// rules before and after the interior update. The target value and the x-profile
/// at the target row are recorded for level 0 and for every completed level.
///
/// `target` must be an interior cell and `dt` must already be verified; nothing
/// is checked here and a blow-up is not detected mid-run.
pub fn integrate(
    grid: &Grid,
    fields: &Fields,
    initial: &[f64],
    dt: f64,
    steps: usize,
    target: &ResolvedPoint,
    upstream: UpstreamBoundary,
) -> Integration {
    debug_assert_eq!(initial.len(), grid.n_cells());

    let mut tensor = ConcentrationTensor::zeros(*grid, steps);
    tensor.slice_mut(0).copy_from_slice(initial);

    let mut target_series = TargetSeries::with_capacity(steps + 1);
    let mut profiles = ProfileHistory::new(target.j, steps + 1);
    target_series.push(tensor.get(0, target.i, target.j));
    profiles.push(tensor.x_profile(0, target.j));

    for k in 1..=steps {
        {
            let (prev, next) = tensor.step_pair(k);
            apply_open_boundaries(next, grid, upstream);
            ftcs_step(prev, next, fields, grid, dt);
            apply_open_boundaries(next, grid, upstream);
        }

        target_series.push(tensor.get(k, target.i, target.j));
        profiles.push(tensor.x_profile(k, target.j));

        if k % PROGRESS_EVERY == 0 {
            let (lo, hi) = diagnostics::slice_range(&tensor, k);
            debug!("step {k}: c.min={lo:.6e} c.max={hi:.6e}");
        }
    }

    Integration {
        tensor,
        target_series,
        profiles,
    }
}

/// Everything a run produces for the presentation layer.
pub struct SimulationOutput {
    pub grid: Grid,
    pub fields: Fields,
    pub dt: f64,
    pub stability: StabilityReport,
    pub points: ResolvedIndex,
    pub tensor: ConcentrationTensor,
    pub target_series: TargetSeries,
    pub profiles: ProfileHistory,
}

impl SimulationOutput {
    /// Times k * dt for the target series.
    pub fn times(&self) -> Vec<f64> {
        self.target_series.times(self.dt)
    }
}

/// Full pipeline: fields, timestep, stability check, point resolution, integration.
pub fn run(params: &SolverParams) -> Result<SimulationOutput> {
    params.validate()?;
    let grid = params.grid()?;

    let fields = Fields::generate(
        &grid,
        &FieldBaseline {
            u0: params.u0,
            v0: params.v0,
            p0: params.p0,
            r0: params.r0,
            a: params.a,
            b: params.b,
        },
    );
    let extrema = FieldExtrema::of(&fields);

    let dt = match params.dt {
        Some(dt) => dt,
        None => suggest_timestep(&extrema, &grid)?,
    };
    let stability = verify_timestep(&extrema, &grid, dt).into_result(dt)?;
    info!(
        "grid {}x{} (dx={:.4}, dy={:.4}), dt={:.6e}, CFL={:.4}, diffusive limit={:.6e}",
        grid.nx, grid.ny, grid.dx, grid.dy, dt, stability.cfl, stability.diffusive_limit
    );

    let points = resolve_pair(&grid, (params.x0, params.y0), (params.xt, params.yt));
    info!(
        "release ({}, {}) -> cell ({}, {}) at ({:.2}, {:.2}); target ({}, {}) -> cell ({}, {}) at ({:.2}, {:.2})",
        params.x0, params.y0, points.release.i, points.release.j, points.release.x, points.release.y,
        params.xt, params.yt, points.target.i, points.target.j, points.target.x, points.target.y,
    );
    if params.upstream == UpstreamBoundary::Open {
        warn!("upstream edge x = 0 is open: no boundary rule is applied there after level 0");
    }

    let initial = initial_slice(&grid, params.c_in, &points.release, params.source_concentration());
    let Integration {
        tensor,
        target_series,
        profiles,
    } = integrate(&grid, &fields, &initial, dt, params.steps, &points.target, params.upstream);

    Ok(SimulationOutput {
        grid,
        fields,
        dt,
        stability,
        points,
        tensor,
        target_series,
        profiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    /// 10x10 grid over 9 m x 9 m, dx = dy = 1, mild downstream flow.
    fn small_params() -> SolverParams {
        SolverParams {
            grid_x: 10,
            grid_y: 10,
            len_x: 9.0,
            len_y: 9.0,
            u0: 0.5,
            v0: 0.0,
            a: 0.0,
            b: 0.0,
            p0: 1.0,
            r0: 1.0,
            c_in: 0.1,
            mass: 2.0,
            flow_rate: 1.0,
            x0: 1.0,
            y0: 1.0,
            xt: 5.0,
            yt: 5.0,
            steps: 5,
            dt: None,
            upstream: UpstreamBoundary::Open,
        }
    }

    #[test]
    fn test_end_to_end_small_river() {
        let out = run(&small_params()).unwrap();
        assert_eq!(out.dt, 0.25, "diffusive limit should set dt");
        assert!(out.stability.stable);
        assert_eq!(out.target_series.len(), 6);
        assert_eq!(out.profiles.len(), 6);
        assert_eq!(out.tensor.levels(), 6);
        assert_eq!(out.target_series.values()[0], 0.1);
        assert_eq!(out.times(), vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25]);

        let g = out.grid;
        assert_eq!((out.points.release.i, out.points.release.j), (1, 1));
        for j in 0..g.ny {
            for i in 0..g.nx {
                let expected = if (i, j) == (1, 1) { 2.0 } else { 0.1 };
                assert_eq!(out.tensor.get(0, i, j), expected, "slice 0 at ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_target_on_release_cell_starts_at_source() {
        let params = SolverParams { xt: 0.0, yt: 0.0, ..small_params() };
        let out = run(&params).unwrap();
        assert_eq!(out.points.target, out.points.release);
        assert_eq!(out.target_series.values()[0], 2.0);
    }

    #[test]
    fn test_series_match_tensor() {
        let out = run(&small_params()).unwrap();
        let t = out.points.target;
        for k in 0..out.tensor.levels() {
            assert_eq!(out.target_series.values()[k], out.tensor.get(k, t.i, t.j));
            assert_eq!(out.profiles.get(k).unwrap(), out.tensor.x_profile(k, t.j).as_slice());
        }
        assert_eq!(out.profiles.row, t.j);
        assert_eq!(out.profiles.get(0).unwrap().len(), out.grid.nx);
    }

    #[test]
    fn test_boundary_invariants_every_step() {
        let params = SolverParams {
            grid_x: 15,
            grid_y: 9,
            a: 0.05,
            b: 0.1,
            v0: 0.1,
            x0: 4.0,
            y0: 4.0,
            steps: 20,
            ..small_params()
        };
        let out = run(&params).unwrap();
        let g = out.grid;
        for k in 1..out.tensor.levels() {
            for j in 0..g.ny {
                assert_eq!(out.tensor.get(k, g.nx - 1, j), out.tensor.get(k, g.nx - 2, j), "outflow at k={} j={}", k, j);
            }
            for i in 0..g.nx {
                assert_eq!(out.tensor.get(k, i, 0), out.tensor.get(k, i, 1), "bottom bank at k={} i={}", k, i);
                assert_eq!(out.tensor.get(k, i, g.ny - 1), out.tensor.get(k, i, g.ny - 2), "top bank at k={} i={}", k, i);
            }
        }
    }

    #[test]
    fn test_open_upstream_keeps_zero_fill() {
        let out = run(&small_params()).unwrap();
        for k in 1..out.tensor.levels() {
            for j in 1..(out.grid.ny - 1) {
                assert_eq!(out.tensor.get(k, 0, j), 0.0, "x = 0 should not be written at k={} j={}", k, j);
            }
        }
    }

    #[test]
    fn test_zero_gradient_upstream() {
        let params = SolverParams { upstream: UpstreamBoundary::ZeroGradient, ..small_params() };
        let out = run(&params).unwrap();
        for k in 1..out.tensor.levels() {
            for j in 0..out.grid.ny {
                assert_eq!(out.tensor.get(k, 0, j), out.tensor.get(k, 1, j));
            }
        }
    }

    #[test]
    fn test_pure_diffusion_spreads_symmetrically() {
        let params = SolverParams {
            grid_x: 21,
            grid_y: 21,
            len_x: 20.0,
            len_y: 20.0,
            u0: 0.0,
            v0: 0.0,
            c_in: 0.0,
            x0: 10.0,
            y0: 10.0,
            xt: 10.0,
            yt: 10.0,
            steps: 6,
            // Below the 0.25 limit so every cell within reach is positive.
            dt: Some(0.1),
            ..small_params()
        };
        let out = run(&params).unwrap();
        let (i0, j0) = (10, 10);
        for k in 0..out.tensor.levels() {
            for d in 1..8 {
                let right = out.tensor.get(k, i0 + d, j0);
                let left = out.tensor.get(k, i0 - d, j0);
                let up = out.tensor.get(k, i0, j0 + d);
                let down = out.tensor.get(k, i0, j0 - d);
                assert!((right - left).abs() < 1e-12, "x asymmetry at k={} d={}: {} vs {}", k, d, right, left);
                assert!((up - down).abs() < 1e-12, "y asymmetry at k={} d={}: {} vs {}", k, d, up, down);
                assert!((right - up).abs() < 1e-12, "P = R should give x/y symmetry at k={} d={}", k, d);
            }
        }
        // The spike has spread by the last level.
        assert!(out.tensor.get(6, i0, j0) < 2.0);
        assert!(out.tensor.get(6, i0 + 1, j0) > 0.0);
    }

    #[test]
    fn test_rerun_is_bit_identical() {
        let params = SolverParams { a: 0.1, b: 0.05, v0: 0.2, steps: 12, ..small_params() };
        let first = run(&params).unwrap();
        let second = run(&params).unwrap();
        assert_eq!(first.tensor, second.tensor);
        assert_eq!(first.target_series, second.target_series);
        assert_eq!(first.profiles, second.profiles);
    }

    #[test]
    fn test_integrate_directly_matches_run() {
        let params = small_params();
        let out = run(&params).unwrap();
        let initial = out.tensor.slice(0).to_vec();
        let again = integrate(
            &out.grid,
            &out.fields,
            &initial,
            out.dt,
            params.steps,
            &out.points.target,
            params.upstream,
        );
        assert_eq!(again.tensor, out.tensor);
    }

    #[test]
    fn test_manual_unstable_dt_rejected() {
        let params = SolverParams { dt: Some(1.0), ..small_params() };
        match run(&params) {
            Err(SimError::Unstable { dt, cfl, diffusive_limit }) => {
                assert_eq!(dt, 1.0);
                assert_eq!(cfl, 0.5);
                assert_eq!(diffusive_limit, 0.25);
            }
            Err(e) => panic!("expected instability, got {}", e),
            Ok(_) => panic!("expected instability, run succeeded"),
        }
    }

    #[test]
    fn test_manual_stable_dt_used() {
        let params = SolverParams { dt: Some(0.1), ..small_params() };
        let out = run(&params).unwrap();
        assert_eq!(out.dt, 0.1);
    }

    #[test]
    fn test_all_zero_fields_rejected() {
        let params = SolverParams { u0: 0.0, v0: 0.0, p0: 0.0, r0: 0.0, ..small_params() };
        assert!(matches!(run(&params), Err(SimError::Config { .. })));
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        let params = SolverParams { grid_x: 1, ..small_params() };
        assert!(matches!(run(&params), Err(SimError::Config { .. })));
        let params = SolverParams { len_y: 0.0, ..small_params() };
        assert!(matches!(run(&params), Err(SimError::Config { .. })));
    }

    #[test]
    fn test_default_scenario_runs_finite() {
        let params = SolverParams { steps: 20, ..Default::default() };
        let out = run(&params).unwrap();
        assert!(diagnostics::scan_non_finite(&out.tensor).is_ok());
        assert_eq!(out.target_series.len(), 21);
    }
}
