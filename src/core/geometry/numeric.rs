//! 중심점 기준 기하 통계: 거리, 주각, 접공간 사영, 곡률

use super::eigen::{mat_field_evals, svals_sq};
use ndarray::{Array1, Array2, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

/// 이보다 짧은 현은 길이 0, 방향 0 으로 본다
const ZERO_CHORD: f64 = 1e-7;

/// 격자 중심점의 평탄화된 인덱스
pub fn central_index(shape: &[usize]) -> usize {
    shape.iter().fold(0, |acc, &n| acc * n + n / 2)
}

/// 중심점으로부터의 거리와 정규화된 현 방향
///
/// `points`: (L, N) → (거리 (L), 단위 현 벡터 (L, N)). 길이 0 인 현의 방향은 0.
pub fn numeric_distance(points: ArrayView2<f64>, shape: &[usize]) -> (Array1<f64>, Array2<f64>) {
    let mid = points.row(central_index(shape)).to_owned();
    let mut chords = &points - &mid;
    let mut dist = Array1::from_iter(chords.axis_iter(Axis(0)).map(|c| c.dot(&c).sqrt()));
    for (mut c, d) in chords.axis_iter_mut(Axis(0)).zip(dist.iter_mut()) {
        if *d < ZERO_CHORD {
            c.fill(0.0);
            *d = 0.0;
        } else {
            c /= *d;
        }
    }
    (dist, chords)
}

/// 중심점 접공간과 각 점 접공간 사이 주각의 사인 (L, K), 큰 것부터
pub fn numeric_sines(frame: ArrayView3<f64>, shape: &[usize]) -> Array2<f64> {
    let (l, _, k) = frame.dim();
    let base = frame.index_axis(Axis(0), central_index(shape));
    let mut sines = Array2::<f64>::zeros((l, k));
    sines
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(frame.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut row, e)| {
            let overlap = base.t().dot(&e);
            // 코사인 내림차순 → 사인 오름차순, 뒤집어서 저장
            let cos_sq = svals_sq(overlap.view());
            for (o, c) in row.iter_mut().rev().zip(cos_sq) {
                *o = (1.0 - c.min(1.0)).max(0.0).sqrt();
            }
        });
    sines
}

/// 각 현이 영역 안 접공간들에 사영될 때의 최대 코사인 (L)
///
/// `chords`: 단위 현 (L, N), `region`: 비교할 접공간들의 평탄화 인덱스
pub fn numeric_proj(
    chords: ArrayView2<f64>,
    frame: ArrayView3<f64>,
    region: &[usize],
    shape: &[usize],
) -> Array1<f64> {
    let mid = central_index(shape);
    let best: Vec<f64> = (0..chords.nrows())
        .into_par_iter()
        .map(|s| {
            let c = chords.row(s);
            region
                .iter()
                .map(|&u| {
                    let p = c.dot(&frame.index_axis(Axis(0), u));
                    p.dot(&p).sqrt()
                })
                .fold(0.0, f64::max)
        })
        .collect();
    let mut costh = Array1::from(best);
    costh[mid] = 1.0;
    costh
}

/// 곡률 연산자 고유값의 제곱근 (L, K)
pub fn numeric_curvature(kappa: ArrayView3<f64>) -> Array2<f64> {
    mat_field_evals(kappa).mapv(f64::sqrt)
}
