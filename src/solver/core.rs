use crate::state::Grid;

use super::fields::Fields;

/// Centered first difference (f[+1] - f[-1]) / (2h).
#[inline(always)]
fn d1(f_minus: f64, f_plus: f64, two_h: f64) -> f64 {
    (f_plus - f_minus) / two_h
}

/// Centered second difference (f[+1] - 2 f[0] + f[-1]) / h^2.
#[inline(always)]
fn d2(f_minus: f64, f_0: f64, f_plus: f64, h2: f64) -> f64 {
    (f_plus - 2.0 * f_0 + f_minus) / h2
}

/// One explicit FTCS step over interior cells.
///
/// Evaluates, with every term at the previous level,
///   dc/dt = P_x c_x + P c_xx + R_y c_y + R c_yy - c u_x - u c_x - c v_y - v c_y
/// and writes `prev + dt * rhs` into `next`. Cells on the outermost rows and
/// columns of `next` are left as they are.
pub fn ftcs_step(prev: &[f64], next: &mut [f64], fields: &Fields, grid: &Grid, dt: f64) {
    let nx = grid.nx;
    let ny = grid.ny;
    let two_dx = 2.0 * grid.dx;
    let two_dy = 2.0 * grid.dy;
    let dx2 = grid.dx * grid.dx;
    let dy2 = grid.dy * grid.dy;
    let Fields { u, v, p, r } = fields;

    for j in 1..ny.saturating_sub(1) {
        for i in 1..nx.saturating_sub(1) {
            let ii = grid.idx(i, j);
            let w = ii - 1;
            let e = ii + 1;
            let s = ii - nx;
            let n = ii + nx;

            let c0 = prev[ii];
            let c_x = d1(prev[w], prev[e], two_dx);
            let c_y = d1(prev[s], prev[n], two_dy);
            let c_xx = d2(prev[w], c0, prev[e], dx2);
            let c_yy = d2(prev[s], c0, prev[n], dy2);

            let p_x = d1(p[w], p[e], two_dx);
            let r_y = d1(r[s], r[n], two_dy);
            let u_x = d1(u[w], u[e], two_dx);
            let v_y = d1(v[s], v[n], two_dy);

            let rhs = p_x * c_x + p[ii] * c_xx + r_y * c_y + r[ii] * c_yy
                - c0 * u_x
                - u[ii] * c_x
                - c0 * v_y
                - v[ii] * c_y;

            next[ii] = c0 + dt * rhs;
        }
    }
}
