use crate::state::Grid;

/// Velocity (u, v) and diffusion (P, R) coefficients on the grid.
///
/// u and P vary only with x, v and R vary only with y:
///   u = u0 (1 + a x),   P = P0 (1 + a x)^2
///   v = v0 (1 + b y),   R = R0 (1 + b y)^2
#[derive(Clone, Debug, PartialEq)]
pub struct Fields {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub p: Vec<f64>,
    pub r: Vec<f64>,
}

/// Baseline values and inhomogeneity coefficients for [`Fields::generate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBaseline {
    pub u0: f64,
    pub v0: f64,
    pub p0: f64,
    pub r0: f64,
    pub a: f64,
    pub b: f64,
}

impl Fields {
    pub fn generate(grid: &Grid, base: &FieldBaseline) -> Self {
        let n = grid.n_cells();
        let x = grid.x_coords();
        let y = grid.y_coords();
        let mut u = vec![0.0; n];
        let mut v = vec![0.0; n];
        let mut p = vec![0.0; n];
        let mut r = vec![0.0; n];

        for j in 0..grid.ny {
            let sy = 1.0 + base.b * y[j];
            for i in 0..grid.nx {
                let sx = 1.0 + base.a * x[i];
                let ii = grid.idx(i, j);
                u[ii] = base.u0 * sx;
                v[ii] = base.v0 * sy;
                p[ii] = base.p0 * sx * sx;
                r[ii] = base.r0 * sy * sy;
            }
        }

        Self { u, v, p, r }
    }
}
