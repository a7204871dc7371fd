//! 스펙트럼 필드로부터 위치, 기울기, 헤시안 계산

use crate::core::spectral::SpectralField;
use ndarray::{ArrayD, Axis, IxDyn};

/// 매장 함수: `emb[s, t, ..., i] = phi^i(x1[s], x2[t], ...)`
pub fn embed(field: &SpectralField) -> ArrayD<f64> {
    field.derivative(&[])
}

/// 기울기: `grad[s, t, ..., i, a] = phi_a^i`
pub fn embed_grad(field: &SpectralField) -> ArrayD<f64> {
    let k_dim = field.intrinsic_dim();
    let mut shape = field.grid_shape.clone();
    shape.push(field.ambient_dim());
    shape.push(k_dim);
    let last = shape.len() - 1;

    let mut grad = ArrayD::<f64>::zeros(IxDyn(&shape));
    for a in 0..k_dim {
        grad.index_axis_mut(Axis(last), a)
            .assign(&field.derivative(&[a]));
    }
    grad
}

/// 헤시안: `hess[s, t, ..., i, a, b] = phi_ab^i`, 대칭으로 채움
pub fn embed_hess(field: &SpectralField) -> ArrayD<f64> {
    let k_dim = field.intrinsic_dim();
    let mut shape = field.grid_shape.clone();
    shape.push(field.ambient_dim());
    shape.push(k_dim);
    shape.push(k_dim);
    let nd = shape.len();

    let mut hess = ArrayD::<f64>::zeros(IxDyn(&shape));
    for a in 0..k_dim {
        for b in a..k_dim {
            let d = field.derivative(&[a, b]);
            for (r, c) in [(a, b), (b, a)] {
                let mut row = hess.index_axis_mut(Axis(nd - 1), c);
                row.index_axis_mut(Axis(nd - 2), r).assign(&d);
            }
        }
    }
    hess
}
