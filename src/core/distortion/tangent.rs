//! 투영된 접공간 틀의 왜곡

use crate::core::geometry::eigen::svals_sq;
use ndarray::{s, Array3, ArrayView3, Axis};
use rayon::prelude::*;

/// 점마다, 내재 차원 K' 마다, 투영 차원 M 마다 접공간 왜곡 `(L, K, #M)`
///
/// 틀의 처음 K' 열을 투영한 `M x K'` 행렬의 특이값 제곱 λ 에 대해
/// `max_j |sqrt(λ_j N / M) - 1|`.
pub fn tangent_distortion(
    proj_frame: ArrayView3<f64>,
    proj_dims: &[usize],
    ambient_dim: usize,
) -> Array3<f64> {
    let (l, _, k_max) = proj_frame.dim();
    let mut out = Array3::<f64>::zeros((l, k_max, proj_dims.len()));
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(proj_frame.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut o, pf)| {
            for k in 0..k_max {
                for (m, &dim) in proj_dims.iter().enumerate() {
                    let scale = ambient_dim as f64 / dim as f64;
                    o[[k, m]] = svals_sq(pf.slice(s![..dim, ..=k]))
                        .into_iter()
                        .map(|lam| ((lam * scale).sqrt() - 1.0).abs())
                        .fold(0.0, f64::max);
                }
            }
        });
    out
}
