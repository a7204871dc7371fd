//! 접원뿔: 중심 부분공간과 최대 주각 θ 안의 가장자리 부분공간
//!
//! 중심 U 의 왜곡이 `guarantee(ε, θ)` 이하이면 원뿔 안 모든 U' 의 왜곡이 ε 이하라는
//! 주장을 표본으로 확인하는 데 쓰인다.

use crate::core::error::{config_bail, Result};
use crate::core::geometry::svals_sq;
use crate::core::projection::make_basis;
use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use rand::Rng;

/// 정규직교 `n x m` 기저 하나
fn single_basis<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> Result<Array2<f64>> {
    Ok(make_basis(1, n, m, rng)?.index_axis_move(Axis(0), 0))
}

/// 중심 부분공간 기저 `(N, K)` 와 그 직교 여공간 기저 `(N, N-K)`
pub fn make_basis_perp<R: Rng + ?Sized>(
    ambient_dim: usize,
    sub_dim: usize,
    rng: &mut R,
) -> Result<(Array2<f64>, Array2<f64>)> {
    if sub_dim == 0 || sub_dim >= ambient_dim {
        config_bail!("부분공간 차원 K={} 은 1..N={} 이어야 함", sub_dim, ambient_dim);
    }
    let full = single_basis(ambient_dim, ambient_dim, rng)?;
    let par = full.slice(s![.., ..sub_dim]).to_owned();
    let perp = full.slice(s![.., sub_dim..]).to_owned();
    Ok((par, perp))
}

/// 원뿔 가장자리의 부분공간 `(N, K)`
///
/// `U' = (U_par S_par cosΘ + U_perp S_perp sinΘ) R`.
/// θ_1 = θ_max 로 고정하고 나머지 주각은 `[0, θ_max]` 에서 균등하게 뽑는다.
pub fn make_basis_other<R: Rng + ?Sized>(
    par: ArrayView2<f64>,
    perp: ArrayView2<f64>,
    theta_max: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let k = par.ncols();
    if perp.ncols() < k {
        config_bail!(
            "여공간 차원 {} 이 부분공간 차원 {} 보다 작음",
            perp.ncols(),
            k
        );
    }
    let theta = Array1::from_iter((0..k).map(|a| {
        if a == 0 {
            theta_max
        } else {
            rng.gen::<f64>() * theta_max
        }
    }));

    let s_par = single_basis(k, k, &mut *rng)?;
    let s_perp = single_basis(perp.ncols(), k, &mut *rng)?;
    let rot = single_basis(k, k, &mut *rng)?.reversed_axes();

    let cos_part = par.dot(&s_par) * &theta.mapv(f64::cos);
    let sin_part = perp.dot(&s_perp) * &theta.mapv(f64::sin);
    Ok((cos_part + sin_part).dot(&rot))
}

/// 두 부분공간 사이 가장 큰 주각의 사인
pub fn max_pang(u1: ArrayView2<f64>, u2: ArrayView2<f64>) -> f64 {
    let gram = u1.t().dot(&u2);
    svals_sq(gram.view())
        .into_iter()
        .map(|c| (1.0 - c.min(1.0)).max(0.0).sqrt())
        .fold(0.0, f64::max)
}

/// 처음 `proj_dim` 좌표로 투영했을 때 부분공간의 왜곡
///
/// `max_j |sqrt(N/M) σ_j - 1|`
pub fn subspace_distortion(space: ArrayView2<f64>, proj_dim: usize) -> f64 {
    let scale = space.nrows() as f64 / proj_dim as f64;
    svals_sq(space.slice(s![..proj_dim, ..]))
        .into_iter()
        .map(|lam| ((lam * scale).sqrt() - 1.0).abs())
        .fold(0.0, f64::max)
}

/// 원뿔 안 모든 U' 의 왜곡이 `distort` 이하가 되도록 허용되는 중심 왜곡
pub fn guarantee(distort: f64, theta: f64, proj_dim: usize, ambient_dim: usize) -> f64 {
    distort - (ambient_dim as f64 / proj_dim as f64) * theta.sin()
}

/// 중심 왜곡이 `distort` 일 때 원뿔 안에서 가능한 최대 왜곡
pub fn guarantee_inv(distort: f64, theta: f64, proj_dim: usize, ambient_dim: usize) -> f64 {
    distort + (ambient_dim as f64 / proj_dim as f64) * theta.sin()
}
