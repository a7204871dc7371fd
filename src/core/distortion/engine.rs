//! 몬테카를로 왜곡 표본: 배치별 투영, 영역별 최대 왜곡, 누적 최대

use super::chord::chord_ratio_bounds;
use super::tangent::tangent_distortion;
use crate::core::config::SamplingConfig;
use crate::core::error::{config_bail, ProjectionError, Result};
use crate::core::progress::progress_bar;
use crate::core::projection::{make_basis, project_frame, project_points};
use crate::core::region::RegionList;
use log::{debug, info};
use ndarray::{s, Array3, Array4, ArrayView1, ArrayView2, ArrayView3, ArrayView4, Axis};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 원래 거리 제곱이 (최대 점 노름 제곱 × 이 값) 이하이면 퇴화한 현
const DEGENERATE_CHORD: f64 = 1e-24;

/// 최대 왜곡 표본 `(K, V, M, S)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistortionSamples {
    pub data: Array4<f64>,
}

impl DistortionSamples {
    /// (K, V, M, S)
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.data.dim()
    }

    pub fn view(&self) -> ArrayView4<f64> {
        self.data.view()
    }

    /// 한 (K, V, M) 조합의 표본들
    pub fn samples(&self, k: usize, v: usize, m: usize) -> ArrayView1<f64> {
        self.data.slice(s![k, v, m, ..])
    }
}

/// 새 점만 담긴 영역들의 값을 K 방향, 다음 V 방향 누적 최대로 전파
pub fn accumulate_max(distn: &mut Array4<f64>) {
    let (k_max, v_num, _, _) = distn.dim();
    for k in 1..k_max {
        let prev = distn.index_axis(Axis(0), k - 1).to_owned();
        distn
            .index_axis_mut(Axis(0), k)
            .zip_mut_with(&prev, |a, &b| *a = a.max(b));
    }
    for v in 1..v_num {
        let prev = distn.slice(s![.., v - 1, .., ..]).to_owned();
        distn
            .slice_mut(s![.., v, .., ..])
            .zip_mut_with(&prev, |a, &b| *a = a.max(b));
    }
}

/// 한 다양체에 대한 왜곡 계산기
pub struct DistortionEngine<'a> {
    points: ArrayView2<'a, f64>,
    frame: ArrayView3<'a, f64>,
    proj_dims: &'a [usize],
    regions: &'a RegionList,
    sampling: &'a SamplingConfig,
    degenerate_sq: f64,
}

impl<'a> DistortionEngine<'a> {
    /// `points`: (L, N), `frame`: (L, N, K), `proj_dims`: 오름차순 M
    pub fn new(
        points: ArrayView2<'a, f64>,
        frame: ArrayView3<'a, f64>,
        proj_dims: &'a [usize],
        regions: &'a RegionList,
        sampling: &'a SamplingConfig,
    ) -> Result<Self> {
        sampling.validate()?;
        let (l, n) = points.dim();
        let (fl, fn_, k) = frame.dim();
        if (fl, fn_) != (l, n) {
            config_bail!("점 {:?} 과 틀 {:?} 의 모양이 맞지 않음", (l, n), (fl, fn_));
        }
        if proj_dims.is_empty()
            || proj_dims.windows(2).any(|w| w[0] >= w[1])
            || proj_dims[0] == 0
        {
            config_bail!(
                "proj_dims 는 비어 있지 않은 엄격한 오름차순이어야 함: {:?}",
                proj_dims
            );
        }
        if let Some(&m_max) = proj_dims.last() {
            if m_max > n {
                return Err(ProjectionError::InvalidDimension {
                    proj_dim: m_max,
                    ambient_dim: n,
                });
            }
        }
        if regions.is_empty() || regions.iter().any(|row| row.len() != k) {
            config_bail!("영역 인덱스는 비율마다 K={} 개가 있어야 함", k);
        }
        if regions
            .iter()
            .flatten()
            .flat_map(|r| r.all.iter())
            .any(|&i| i >= l)
        {
            config_bail!("영역 인덱스가 점 개수 {} 를 넘음", l);
        }

        let max_sq = points
            .axis_iter(Axis(0))
            .map(|p| p.dot(&p))
            .fold(0.0, f64::max);
        Ok(Self {
            points,
            frame,
            proj_dims,
            regions,
            sampling,
            degenerate_sq: DEGENERATE_CHORD * max_sq,
        })
    }

    fn ambient_dim(&self) -> usize {
        self.points.ncols()
    }

    fn intrinsic_dim(&self) -> usize {
        self.frame.len_of(Axis(2))
    }

    /// 한 배치의 투영 기저 `(S, N, max M)` 에 대한 왜곡 `(K, V, M, S)`, 누적 최대 적용
    pub fn batch_distortion(&self, bases: ArrayView3<f64>) -> Array4<f64> {
        let samples = bases.len_of(Axis(0));
        let n = self.ambient_dim();
        let (l, _) = self.points.dim();
        let m_max = bases.len_of(Axis(2));

        let mut proj_points = Array3::<f64>::zeros((samples, l, m_max));
        proj_points
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(bases.axis_iter(Axis(0)).into_par_iter())
            .for_each(|(mut out, u)| out.assign(&project_points(self.points, u)));

        // (S)(L, K, #M)
        let tangent: Vec<Array3<f64>> = bases
            .axis_iter(Axis(0))
            .map(|u| tangent_distortion(project_frame(self.frame, u).view(), self.proj_dims, n))
            .collect();

        let mut distn = Array4::<f64>::zeros((
            self.intrinsic_dim(),
            self.regions.len(),
            self.proj_dims.len(),
            samples,
        ));
        for (v, row) in self.regions.iter().enumerate() {
            for (k, reg) in row.iter().enumerate() {
                let bounds = chord_ratio_bounds(
                    self.points,
                    proj_points.view(),
                    self.proj_dims,
                    &reg.new,
                    &reg.previous,
                    self.sampling.chunk,
                    self.degenerate_sq,
                );
                for (si, (bnd, td)) in bounds.iter().zip(&tangent).enumerate() {
                    for (m, &dim) in self.proj_dims.iter().enumerate() {
                        let chord = bnd[m].map_or(0.0, |b| b.distortion(n, dim));
                        let tang = reg
                            .new
                            .iter()
                            .map(|&p| td[[p, k, m]])
                            .fold(0.0, f64::max);
                        distn[[k, v, m, si]] = chord.max(tang);
                    }
                }
            }
        }

        accumulate_max(&mut distn);
        distn
    }

    /// 전체 표본을 배치로 나누어 왜곡 표본 생성
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DistortionSamples> {
        let SamplingConfig { samples, batch, .. } = *self.sampling;
        let n = self.ambient_dim();
        let m_max = self.proj_dims[self.proj_dims.len() - 1];
        let batches = samples / batch;
        info!(
            "왜곡 표본 계산: N={}, M={:?}, 영역 {} 개, 표본 {}",
            n,
            self.proj_dims,
            self.regions.len(),
            samples
        );

        let mut data = Array4::<f64>::zeros((
            self.intrinsic_dim(),
            self.regions.len(),
            self.proj_dims.len(),
            samples,
        ));
        let bar = progress_bar(batches as u64, "표본 배치", self.sampling.show_progress);
        for b in 0..batches {
            let bases = make_basis(batch, n, m_max, &mut *rng)?;
            let chunk = self.batch_distortion(bases.view());
            data.slice_mut(s![.., .., .., b * batch..(b + 1) * batch])
                .assign(&chunk);
            debug!("배치 {}/{} 완료", b + 1, batches);
            bar.inc(1);
        }
        bar.finish_and_clear();
        Ok(DistortionSamples { data })
    }
}

/// 왜곡 추정 진입점, 결과 `(K, V, M, S)`
pub fn distortion_m<'a, R: Rng + ?Sized>(
    points: ArrayView2<'a, f64>,
    frame: ArrayView3<'a, f64>,
    proj_dims: &'a [usize],
    regions: &'a RegionList,
    sampling: &'a SamplingConfig,
    rng: &mut R,
) -> Result<DistortionSamples> {
    DistortionEngine::new(points, frame, proj_dims, regions, sampling)?.run(rng)
}
