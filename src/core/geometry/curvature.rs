//! 계량으로 올린 헤시안과 곡률 연산자

use super::linalg::{from_dmatrix, to_dmatrix};
use crate::core::error::{ProjectionError, Result};
use nalgebra::DMatrix;
use ndarray::{s, Array3, Array4, ArrayView2, ArrayView3, ArrayView4, ArrayViewMut3, Axis};
use rayon::prelude::*;

/// 헤시안의 한 인덱스를 계량으로 올림: `R_i = H_i h⁻¹`
///
/// `hess`: (L, N, K, K), `metric`: (L, K, K) → (L, N, K, K)
pub fn raise_hess(hess: ArrayView4<f64>, metric: ArrayView3<f64>) -> Result<Array4<f64>> {
    let mut raised = Array4::<f64>::zeros(hess.dim());
    raised
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(hess.axis_iter(Axis(0)).into_par_iter())
        .zip(metric.axis_iter(Axis(0)).into_par_iter())
        .try_for_each(|((out, h), m)| raise_point(out, h, m))?;
    Ok(raised)
}

fn raise_point(
    mut out: ArrayViewMut3<f64>,
    hess: ArrayView3<f64>,
    metric: ArrayView2<f64>,
) -> Result<()> {
    let k = metric.nrows();
    match k {
        1 => {
            let m = metric[[0, 0]];
            if !(m.abs() > 0.0) {
                return Err(singular_metric(m));
            }
            out.assign(&hess.mapv(|h| h / m));
        }
        2 => {
            let (a, b, c, d) = (metric[[0, 0]], metric[[0, 1]], metric[[1, 0]], metric[[1, 1]]);
            let det = a * d - b * c;
            if !(det.abs() > 0.0) || !det.is_finite() {
                return Err(singular_metric(det));
            }
            // 수반 행렬
            let inv = [[d / det, -b / det], [-c / det, a / det]];
            for (mut o, hi) in out.outer_iter_mut().zip(hess.outer_iter()) {
                for r in 0..2 {
                    for col in 0..2 {
                        o[[r, col]] = hi[[r, 0]] * inv[0][col] + hi[[r, 1]] * inv[1][col];
                    }
                }
            }
        }
        _ => {
            let lu = to_dmatrix(metric).lu();
            for (mut o, hi) in out.outer_iter_mut().zip(hess.outer_iter()) {
                // 대칭이므로 H h⁻¹ = (h⁻¹ H)ᵀ
                let x = lu
                    .solve(&to_dmatrix(hi.t()))
                    .ok_or_else(|| singular_metric(0.0))?;
                o.assign(&from_dmatrix(&x.transpose()));
            }
        }
    }
    Ok(())
}

fn singular_metric(det: f64) -> ProjectionError {
    ProjectionError::NumericalDegeneracy(format!("유도 계량이 특이함 (det {:e})", det))
}

/// 곡률 연산자 `κ = Σ_i R_i R_i - Σ_A S_A S_A`, `S_A = Σ_i e_iA R_i`
///
/// `hessr`: (L, N, K, K), `frame`: (L, N, K) → (L, K, K)
pub fn numeric_curv(hessr: ArrayView4<f64>, frame: ArrayView3<f64>) -> Array3<f64> {
    let (l, _, k, _) = hessr.dim();
    let mut kappa = Array3::<f64>::zeros((l, k, k));
    kappa
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(hessr.axis_iter(Axis(0)).into_par_iter())
        .zip(frame.axis_iter(Axis(0)).into_par_iter())
        .for_each(|((mut out, r), e)| {
            let mats: Vec<DMatrix<f64>> = r.outer_iter().map(to_dmatrix).collect();
            let full = mats
                .iter()
                .fold(DMatrix::<f64>::zeros(k, k), |acc, m| acc + m * m);
            let tangent = (0..k).fold(DMatrix::<f64>::zeros(k, k), |acc, a| {
                let col = e.slice(s![.., a]);
                let s_a = mats
                    .iter()
                    .zip(col.iter())
                    .fold(DMatrix::<f64>::zeros(k, k), |s, (m, &w)| s + m * w);
                acc + &s_a * &s_a
            });
            out.assign(&from_dmatrix(&(full - tangent)));
        });
    kappa
}
