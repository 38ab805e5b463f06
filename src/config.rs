use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::Result;
use crate::solver::{SolverParams, UpstreamBoundary};

pub const DEFAULT_PATH: &str = "riverplume.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub domain: DomainConfig,
    pub flow: FlowConfig,
    pub diffusion: DiffusionConfig,
    pub source: SourceConfig,
    pub target: TargetConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub grid_x: usize,
    pub grid_y: usize,
    pub len_x: f64,
    pub len_y: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub u0: f64,
    pub v0: f64,
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    pub p0: f64,
    pub r0: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub c_in: f64,
    pub mass: f64,
    pub flow_rate: f64,
    pub x0: f64,
    pub y0: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub xt: f64,
    pub yt: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub steps: usize,
    pub dt: Option<f64>,
    pub upstream: UpstreamBoundary,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for PNG heatmap frames; no frames are written when unset.
    pub frames_dir: Option<String>,
    pub frame_stride: usize,
    /// Fractions of the run at which cross-section profiles are reported.
    pub profile_fractions: Vec<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: DomainConfig::default(),
            flow: FlowConfig::default(),
            diffusion: DiffusionConfig::default(),
            source: SourceConfig::default(),
            target: TargetConfig::default(),
            run: RunConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            grid_x: 100,
            grid_y: 100,
            len_x: 1000.0,
            len_y: 1000.0,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            u0: 0.5,
            v0: 0.02,
            a: 0.01,
            b: 0.01,
        }
    }
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self { p0: 80.0, r0: 0.01 }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            c_in: 1.0,
            mass: 10000.0,
            flow_rate: 5.0,
            x0: 1.0,
            y0: 1.0,
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self { xt: 1.0, yt: 1.0 }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 100,
            dt: None,
            upstream: UpstreamBoundary::Open,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frames_dir: None,
            frame_stride: 1,
            profile_fractions: vec![0.25, 0.5, 0.75, 1.0],
        }
    }
}

impl Config {
    /// Solver inputs for this configuration, range-checked.
    pub fn to_params(&self) -> Result<SolverParams> {
        let params = SolverParams {
            grid_x: self.domain.grid_x,
            grid_y: self.domain.grid_y,
            len_x: self.domain.len_x,
            len_y: self.domain.len_y,
            u0: self.flow.u0,
            v0: self.flow.v0,
            a: self.flow.a,
            b: self.flow.b,
            p0: self.diffusion.p0,
            r0: self.diffusion.r0,
            c_in: self.source.c_in,
            mass: self.source.mass,
            flow_rate: self.source.flow_rate,
            x0: self.source.x0,
            y0: self.source.y0,
            xt: self.target.xt,
            yt: self.target.yt,
            steps: self.run.steps,
            dt: self.run.dt,
            upstream: self.run.upstream,
        };
        params.validate()?;
        params.grid()?;
        Ok(params)
    }
}

/// Load configuration from `path`, falling back to defaults when the file is
/// missing or cannot be parsed.
pub fn load(path: &Path) -> Config {
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("failed to parse {}: {e}; using defaults", path.display());
                    Config::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {e}; using defaults", path.display());
                Config::default()
            }
        }
    } else {
        Config::default()
    }
}
