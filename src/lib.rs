//! Two-dimensional advection-diffusion model of pollutant transport in a river.
//!
//! The numerical core lives in [`solver`]: field generation, stability analysis,
//! release/target point resolution and the explicit FTCS integrator. [`config`]
//! and [`render`] are thin layers around it for the command-line driver.

pub mod config;
pub mod error;
pub mod render;
pub mod solver;
pub mod state;

pub use error::{Result, SimError};
