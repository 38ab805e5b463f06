use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::{error, info};

use riverplume::config;
use riverplume::render;
use riverplume::solver::{self, diagnostics, SimulationOutput};
use riverplume::SimError;

const ADVECTION_BOUND: &str = "|u|·Δt/Δx + |v|·Δt/Δy ≤ 1";
const DIFFUSION_BOUND: &str = "Δt ≤ 1 / (2·(P/Δx² + R/Δy²))";

/// First positional argument, or `riverplume.yaml` in the working directory.
fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH))
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Log the target-point and cross-section summaries.
fn report(out: &SimulationOutput, profile_fractions: &[f64]) {
    let target = out.points.target;
    if let Some(peak) = diagnostics::peak_at_target(&out.target_series, out.dt) {
        info!(
            "target ({:.2}, {:.2}): peak {:.4} kg/m³ at t = {:.5} s (step {}), total time {:.5} s",
            target.x, target.y, peak.value, peak.time, peak.step, peak.end_time
        );
    }

    let xs = out.grid.x_coords();
    for k in diagnostics::profile_snapshot_steps(out.tensor.levels(), profile_fractions) {
        let Some(profile) = out.profiles.get(k) else {
            continue;
        };
        let (i_max, c_max) = profile
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, c)| if c > best.1 { (i, c) } else { best });
        info!(
            "profile at y = {:.2}, t = {:.5} s (step {k}): max {c_max:.4} at x = {:.2}",
            target.y,
            k as f64 * out.dt,
            xs[i_max]
        );
    }
}

fn run() -> riverplume::Result<()> {
    let path = config_path();
    let cfg = config::load(&path);
    let params = cfg.to_params()?;

    let out = solver::run(&params)?;
    diagnostics::scan_non_finite(&out.tensor)?;
    report(&out, &cfg.output.profile_fractions);

    if let Some(dir) = &cfg.output.frames_dir {
        render::write_frames(&out.tensor, Path::new(dir), cfg.output.frame_stride)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(SimError::Unstable {
            dt,
            cfl,
            diffusive_limit,
        }) => {
            error!(
                "dt = {dt:.6e} is unstable with CFL = {cfl:.4} and diffusive limit {diffusive_limit:.6e}; adjust the grid or physical parameters"
            );
            error!("advection (Courant-Friedrichs-Lewy): {ADVECTION_BOUND}");
            error!("diffusion: {DIFFUSION_BOUND}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
