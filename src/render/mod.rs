mod color;

pub use color::map_to_rgba;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::state::ConcentrationTensor;

/// Largest finite concentration in the whole history, used as the colour ceiling.
/// Falls back to 1.0 for an all-zero (or all non-finite) history.
pub fn global_max(tensor: &ConcentrationTensor) -> f64 {
    let max = tensor
        .as_slice()
        .iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, |acc, &v| acc.max(v));
    if max > 0.0 { max } else { 1.0 }
}

/// Render level `k` as an `nx` x `ny` RGBA image.
/// x runs left to right; y runs bottom to top (image row 0 is y = ny-1).
/// Colours span [0, zmax].
pub fn slice_to_rgba(tensor: &ConcentrationTensor, k: usize, zmax: f64) -> Vec<u8> {
    let grid = tensor.grid();
    let slice = tensor.slice(k);
    let mut rgba = vec![0u8; grid.n_cells() * 4];
    for row in 0..grid.ny {
        let j = grid.ny - 1 - row;
        for i in 0..grid.nx {
            let px = (row * grid.nx + i) * 4;
            let c = map_to_rgba(slice[grid.idx(i, j)] / zmax);
            rgba[px..px + 4].copy_from_slice(&c);
        }
    }
    rgba
}

/// Write an RGBA buffer as an 8-bit PNG.
pub fn write_png(path: &Path, rgba: &[u8], width: usize, height: usize) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    Ok(())
}

/// Levels 0, stride, 2*stride, ... plus the final level.
pub fn frame_steps(levels: usize, stride: usize) -> Vec<usize> {
    if levels == 0 {
        return Vec::new();
    }
    let mut steps: Vec<usize> = (0..levels).step_by(stride.max(1)).collect();
    if steps.last() != Some(&(levels - 1)) {
        steps.push(levels - 1);
    }
    steps
}

/// Write heatmap frames `frame_NNNNN.png` into `dir`, creating it if needed.
pub fn write_frames(tensor: &ConcentrationTensor, dir: &Path, stride: usize) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let grid = *tensor.grid();
    let zmax = global_max(tensor);
    let mut written = Vec::new();
    for k in frame_steps(tensor.levels(), stride) {
        let path = dir.join(format!("frame_{k:05}.png"));
        let rgba = slice_to_rgba(tensor, k, zmax);
        write_png(&path, &rgba, grid.nx, grid.ny)?;
        written.push(path);
    }
    info!("wrote {} frames to {}", written.len(), dir.display());
    Ok(written)
}
