//! 접공간 정규직교 틀(vielbein)과 유도 계량

use super::linalg::to_dvector;
use crate::core::error::{ProjectionError, Result};
use nalgebra::DVector;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

/// 기울기 노름 대비 이 비율보다 작게 남으면 퇴화로 본다
const DEGENERATE_RATIO: f64 = 1e-10;

/// 지금까지 얻은 틀 벡터들의 여공간으로의 사영 `I - Σ_a e_a e_aᵀ`
#[derive(Debug, Clone, Default)]
struct ComplementProjector {
    basis: Vec<DVector<f64>>,
}

impl ComplementProjector {
    fn apply(&self, v: &DVector<f64>) -> DVector<f64> {
        self.basis
            .iter()
            .fold(v.clone(), |acc, e| &acc - e * e.dot(v))
    }

    fn exclude(mut self, e: DVector<f64>) -> Self {
        self.basis.push(e);
        self
    }
}

/// 한 점에서 기울기 열들의 그람-슈미트 정규직교화. `grad`: (N, K)
fn orthonormal_columns(grad: ArrayView2<f64>) -> Result<Array2<f64>> {
    let (n, k) = grad.dim();
    let projector = (0..k).try_fold(ComplementProjector::default(), |proj, a| {
        let g = to_dvector(grad.column(a));
        let g_norm = g.norm();
        let v = proj.apply(&g);
        let norm = v.norm();
        if !(g_norm > 0.0) || !(norm > DEGENERATE_RATIO * g_norm) {
            return Err(ProjectionError::NumericalDegeneracy(format!(
                "접벡터 {} 가 선형 종속 (노름 {:e})",
                a, norm
            )));
        }
        Ok(proj.exclude(v / norm))
    })?;

    Ok(Array2::from_shape_fn((n, k), |(i, a)| projector.basis[a][i]))
}

/// 기울기 `(L, N, K)` 로부터 정규직교 틀 `(L, N, K)`
///
/// `e[:, a]` 는 처음 `a+1` 개 접벡터가 펼치는 공간에 속하고 그 앞 열들과 직교한다.
pub fn vielbein(grad: ArrayView3<f64>) -> Result<Array3<f64>> {
    let mut frame = Array3::<f64>::zeros(grad.dim());
    frame
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(grad.axis_iter(Axis(0)).into_par_iter())
        .try_for_each(|(mut out, g)| -> Result<()> {
            out.assign(&orthonormal_columns(g)?);
            Ok(())
        })?;
    Ok(frame)
}

/// 유도 계량 `h_ab = Σ_i phi_a^i phi_b^i`, 결과 `(L, K, K)`
pub fn induced_metric(grad: ArrayView3<f64>) -> Array3<f64> {
    let (l, _, k) = grad.dim();
    let mut metric = Array3::<f64>::zeros((l, k, k));
    metric
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(grad.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut out, g)| out.assign(&g.t().dot(&g)));
    metric
}
