//! 가우시안 행렬의 QR 분해로 정규직교 투영 기저를 뽑고 매장에 적용

use crate::core::error::{ProjectionError, Result};
use crate::core::geometry::linalg::{from_dmatrix, to_dmatrix};
use log::debug;
use nalgebra::QR;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rand::Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;

/// 표본마다 독립인 정규직교 `N x M` 기저, 결과 `(S, N, M)`
pub fn make_basis<R: Rng + ?Sized>(
    samples: usize,
    ambient_dim: usize,
    proj_dim: usize,
    rng: &mut R,
) -> Result<Array3<f64>> {
    if proj_dim > ambient_dim {
        return Err(ProjectionError::InvalidDimension {
            proj_dim,
            ambient_dim,
        });
    }
    debug!("투영 기저 {} 개 생성: N={}, M={}", samples, ambient_dim, proj_dim);

    // 난수는 순서대로 뽑고 직교화만 병렬로
    let spaces: Array3<f64> = Array3::from_shape_simple_fn((samples, ambient_dim, proj_dim), || {
        rng.sample(StandardNormal)
    });

    let mut bases = Array3::<f64>::zeros((samples, ambient_dim, proj_dim));
    bases
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(spaces.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut out, space)| {
            let q = QR::new(to_dmatrix(space)).q();
            out.assign(&from_dmatrix(&q));
        });
    Ok(bases)
}

/// 점 `(L, N)` 을 기저 `(N, M)` 로 투영 → `(L, M)`
pub fn project_points(points: ArrayView2<f64>, basis: ArrayView2<f64>) -> Array2<f64> {
    points.dot(&basis)
}

/// 틀 `(L, N, K)` 를 기저 `(N, M)` 로 투영 → `(L, M, K)`
pub fn project_frame(frame: ArrayView3<f64>, basis: ArrayView2<f64>) -> Array3<f64> {
    let (l, _, k) = frame.dim();
    let m = basis.ncols();
    let mut out = Array3::<f64>::zeros((l, m, k));
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(frame.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut o, e)| o.assign(&basis.t().dot(&e)));
    out
}
