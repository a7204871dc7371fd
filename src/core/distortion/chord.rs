//! 현(chord) 길이 비율의 최소/최대를 청크 단위로 계산

use ndarray::{ArrayView1, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

/// 투영 차원 하나에서 관측된 현 길이 비율 제곱의 범위
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBounds {
    pub min_sq: f64,
    pub max_sq: f64,
}

impl RatioBounds {
    fn single(r: f64) -> Self {
        Self { min_sq: r, max_sq: r }
    }

    fn include(self, r: f64) -> Self {
        Self {
            min_sq: self.min_sq.min(r),
            max_sq: self.max_sq.max(r),
        }
    }

    /// `max(|s r_min - 1|, |s r_max - 1|)`, `s = sqrt(N / M)`
    pub fn distortion(&self, ambient_dim: usize, proj_dim: usize) -> f64 {
        let scale = (ambient_dim as f64 / proj_dim as f64).sqrt();
        let lo = (scale * self.min_sq.sqrt() - 1.0).abs();
        let hi = (scale * self.max_sq.sqrt() - 1.0).abs();
        lo.max(hi)
    }
}

/// 새 점끼리의 쌍 (i < j) 다음 새 점과 이전 점의 쌍
pub fn chord_pairs<'a>(
    new: &'a [usize],
    previous: &'a [usize],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    new.iter().enumerate().flat_map(move |(i, &a)| {
        new[i + 1..]
            .iter()
            .chain(previous.iter())
            .map(move |&b| (a, b))
    })
}

fn sq_dist(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// 표본별, 투영 차원별 현 길이 비율 범위
///
/// `points`: 원래 점 (L, N), `projected`: 표본별 투영 점 (S, L, max M).
/// 원래 거리 제곱이 `degenerate_sq` 이하인 쌍은 건너뛴다.
/// 결과 `[s][m]`, 유효한 쌍이 없으면 `None`.
pub fn chord_ratio_bounds(
    points: ArrayView2<f64>,
    projected: ArrayView3<f64>,
    proj_dims: &[usize],
    new: &[usize],
    previous: &[usize],
    chunk: usize,
    degenerate_sq: f64,
) -> Vec<Vec<Option<RatioBounds>>> {
    let samples = projected.len_of(Axis(0));
    let mut bounds = vec![vec![None::<RatioBounds>; proj_dims.len()]; samples];
    let mut pairs = chord_pairs(new, previous);

    loop {
        let chunk_pairs: Vec<(usize, usize)> = pairs.by_ref().take(chunk.max(1)).collect();
        if chunk_pairs.is_empty() {
            break;
        }
        // 원래 거리는 청크마다 한 번만
        let orig: Vec<f64> = chunk_pairs
            .iter()
            .map(|&(a, b)| sq_dist(points.row(a), points.row(b)))
            .collect();

        bounds
            .par_iter_mut()
            .zip(projected.axis_iter(Axis(0)).into_par_iter())
            .for_each(|(bnd, proj)| {
                for (&(a, b), &o) in chunk_pairs.iter().zip(&orig) {
                    if !(o > degenerate_sq) {
                        continue;
                    }
                    let (pa, pb) = (proj.row(a), proj.row(b));
                    let mut acc = 0.0;
                    let mut c = 0;
                    // 누적합으로 모든 M 을 한 번에
                    for (slot, &dim) in bnd.iter_mut().zip(proj_dims) {
                        while c < dim {
                            let d = pa[c] - pb[c];
                            acc += d * d;
                            c += 1;
                        }
                        let r = acc / o;
                        *slot = Some(match *slot {
                            Some(prev) => prev.include(r),
                            None => RatioBounds::single(r),
                        });
                    }
                }
            });
    }
    bounds
}
