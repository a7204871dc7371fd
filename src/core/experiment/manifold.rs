//! 중앙 영역만 남긴 무작위 다양체 묶음: 점, 기울기, 틀

use crate::core::config::ManifoldConfig;
use crate::core::error::{config_bail, ProjectionError, Result};
use crate::core::geometry::{embed, embed_grad, vielbein};
use crate::core::progress::timed;
use crate::core::spectral::SpectralField;
use log::info;
use ndarray::{s, Array, Array2, Array3, ArrayD, Dimension, IxDyn, Slice};
use rand::Rng;
use std::ops::Range;

/// 과샘플링 격자에서 주기 경계를 피해 남기는 중앙 블록
#[derive(Debug, Clone, PartialEq)]
pub struct CentralRegion {
    ranges: Vec<Range<usize>>,
}

impl CentralRegion {
    /// 축마다 시작점 `(expand - 1) * num / 2`, 길이 `num`
    pub fn new(config: &ManifoldConfig) -> Self {
        let ranges = config
            .intrinsic_num
            .iter()
            .map(|&num| {
                let start = (config.expand - 1) * num / 2;
                start..start + num
            })
            .collect();
        Self { ranges }
    }

    /// 잘라낸 격자 모양
    pub fn shape(&self) -> Vec<usize> {
        self.ranges.iter().map(|r| r.len()).collect()
    }

    pub fn num_points(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).product()
    }

    /// 격자 축을 잘라내고 하나의 점 축으로 평탄화: `(grid..., rest...)` → `(L, rest...)`
    pub fn flatten<D: Dimension>(&self, field: &ArrayD<f64>) -> Result<Array<f64, D>> {
        let k_dim = self.ranges.len();
        let cropped = field
            .slice_each_axis(|ax| {
                let i = ax.axis.index();
                if i < k_dim {
                    Slice::from(self.ranges[i].clone())
                } else {
                    Slice::from(..)
                }
            })
            .to_owned();

        let mut shape = vec![self.num_points()];
        shape.extend_from_slice(&cropped.shape()[k_dim..]);
        Ok(cropped
            .into_shape(IxDyn(&shape))?
            .into_dimensionality::<D>()?)
    }
}

/// 평탄화된 다양체. 점 순서는 잘라낸 격자의 행 우선 순서.
#[derive(Debug, Clone)]
pub struct Manifold {
    /// 잘라낸 격자 모양 (길이 K)
    pub grid_shape: Vec<usize>,
    /// (L, N)
    pub points: Array2<f64>,
    /// (L, N, K)
    pub gradient: Array3<f64>,
    /// (L, N, K)
    pub frame: Array3<f64>,
}

impl Manifold {
    pub fn generate<R: Rng + ?Sized>(config: &ManifoldConfig, rng: &mut R) -> Result<Self> {
        info!(
            "다양체 생성: N={}, 격자 {:?} x {}",
            config.ambient_dim, config.intrinsic_num, config.expand
        );
        let field = timed("스펙트럼 필드", || SpectralField::random(config, rng))?;
        Self::from_field(&field, config)
    }

    pub fn from_field(field: &SpectralField, config: &ManifoldConfig) -> Result<Self> {
        let region = CentralRegion::new(config);
        let points = timed("매장", || region.flatten(&embed(field)))?;
        let gradient = timed("기울기", || region.flatten(&embed_grad(field)))?;
        let frame = timed("틀", || vielbein(gradient.view()))?;
        Ok(Self {
            grid_shape: region.shape(),
            points,
            gradient,
            frame,
        })
    }

    pub fn num_points(&self) -> usize {
        self.points.nrows()
    }

    pub fn ambient_dim(&self) -> usize {
        self.points.ncols()
    }

    pub fn intrinsic_dim(&self) -> usize {
        self.grid_shape.len()
    }

    /// 앞쪽 `n` 개 주변 좌표만 남기고 틀을 다시 계산
    pub fn with_ambient(&self, n: usize) -> Result<Self> {
        if n == 0 {
            config_bail!("주변 차원은 양수여야 함");
        }
        if n > self.ambient_dim() {
            return Err(ProjectionError::InvalidDimension {
                proj_dim: n,
                ambient_dim: self.ambient_dim(),
            });
        }
        let gradient = self.gradient.slice(s![.., ..n, ..]).to_owned();
        let frame = vielbein(gradient.view())?;
        Ok(Self {
            grid_shape: self.grid_shape.clone(),
            points: self.points.slice(s![.., ..n]).to_owned(),
            gradient,
            frame,
        })
    }
}
