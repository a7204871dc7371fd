//! 행렬장의 고유값과 특이값

use super::linalg::to_dmatrix;
use ndarray::{Array2, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

/// 판별식이 이 값보다 조금 음수면 0 으로 자른다
const DISC_CLIP: f64 = 1e-3;

fn clipped_sqrt(disc_sq: f64) -> f64 {
    if disc_sq < 0.0 && disc_sq > -DISC_CLIP {
        0.0
    } else {
        disc_sq.sqrt()
    }
}

fn sort_descending(v: &mut [f64]) {
    v.sort_by(|a, b| b.total_cmp(a));
}

/// 정사각 행렬 하나의 고유값 (실수부, 내림차순)
pub fn evals(m: ArrayView2<f64>) -> Vec<f64> {
    match m.nrows() {
        1 => vec![m[[0, 0]]],
        2 => {
            let half_tr = (m[[0, 0]] + m[[1, 1]]) / 2.0;
            let half_diff = (m[[0, 0]] - m[[1, 1]]) / 2.0;
            // (tr/2)² - det 를 전개하면 상쇄 오차가 생김
            let disc = clipped_sqrt(half_diff * half_diff + m[[0, 1]] * m[[1, 0]]);
            vec![half_tr + disc, half_tr - disc]
        }
        _ => {
            let mut vals: Vec<f64> = to_dmatrix(m)
                .complex_eigenvalues()
                .iter()
                .map(|c| c.re)
                .collect();
            sort_descending(&mut vals);
            vals
        }
    }
}

/// 행렬 하나의 특이값 제곱 (내림차순, 열 개수만큼)
pub fn svals_sq(m: ArrayView2<f64>) -> Vec<f64> {
    let (rows, cols) = m.dim();
    match cols {
        1 => vec![m.column(0).iter().map(|x| x * x).sum()],
        2 if rows >= 2 => {
            let c0 = m.column(0);
            let c1 = m.column(1);
            let g00: f64 = c0.dot(&c0);
            let g11: f64 = c1.dot(&c1);
            let g01: f64 = c0.dot(&c1);
            let half_frob = (g00 + g11) / 2.0;
            let half_diff = (g00 - g11) / 2.0;
            let disc = clipped_sqrt(half_diff * half_diff + g01 * g01);
            vec![half_frob + disc, half_frob - disc]
        }
        _ => {
            let mut vals: Vec<f64> = to_dmatrix(m)
                .singular_values()
                .iter()
                .map(|s| s * s)
                .collect();
            vals.resize(cols, 0.0);
            sort_descending(&mut vals);
            vals
        }
    }
}

/// `(L, K, K)` 행렬장의 고유값 `(L, K)`
pub fn mat_field_evals(field: ArrayView3<f64>) -> Array2<f64> {
    let (l, k, _) = field.dim();
    let mut out = Array2::<f64>::zeros((l, k));
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(field.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut row, m)| {
            for (o, v) in row.iter_mut().zip(evals(m)) {
                *o = v;
            }
        });
    out
}

/// `(L, R, C)` 행렬장의 특이값 제곱 `(L, C)`
pub fn mat_field_svals(field: ArrayView3<f64>) -> Array2<f64> {
    let (l, _, c) = field.dim();
    let mut out = Array2::<f64>::zeros((l, c));
    out.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(field.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut row, m)| {
            for (o, v) in row.iter_mut().zip(svals_sq(m)) {
                *o = v;
            }
        });
    out
}
