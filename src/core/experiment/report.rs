//! 다양체 하나의 기하 통계 보고서

use super::manifold::CentralRegion;
use crate::core::config::ManifoldConfig;
use crate::core::error::Result;
use crate::core::geometry::{
    embed, embed_grad, embed_hess, induced_metric, numeric_curv, numeric_curvature,
    numeric_distance, numeric_proj, numeric_sines, raise_hess, vielbein,
};
use crate::core::progress::timed;
use crate::core::spectral::SpectralField;
use ndarray::{Array1, Array2, Array3, Array4, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 중앙 영역 점마다의 거리, 주각 사인, 현-접공간 코사인, 곡률
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryReport {
    pub grid_shape: Vec<usize>,
    /// 중심점까지의 현 길이 (L)
    pub distance: Array1<f64>,
    /// 중심 접공간과의 주각 사인, 큰 것부터 (L, K)
    pub sines: Array2<f64>,
    /// 현 방향의 접공간 사영 최대 코사인 (L)
    pub proj: Array1<f64>,
    /// 곡률, 큰 것부터 (L, K)
    pub curvature: Array2<f64>,
}

/// 한 통계량의 요약
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Summary {
    pub fn of(values: ArrayView1<f64>) -> Self {
        let finite: Vec<f64> = values.iter().cloned().filter(|x| x.is_finite()).collect();
        let n = finite.len().max(1) as f64;
        Self {
            min: finite.iter().cloned().fold(f64::INFINITY, f64::min),
            mean: finite.iter().sum::<f64>() / n,
            max: finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl GeometryReport {
    pub fn compute<R: Rng + ?Sized>(config: &ManifoldConfig, rng: &mut R) -> Result<Self> {
        let field = timed("스펙트럼 필드", || SpectralField::random(config, rng))?;
        Self::from_field(&field, config)
    }

    pub fn from_field(field: &SpectralField, config: &ManifoldConfig) -> Result<Self> {
        let region = CentralRegion::new(config);
        let shape = region.shape();

        let points: Array2<f64> = region.flatten(&embed(field))?;
        let grad: Array3<f64> = region.flatten(&embed_grad(field))?;
        let hess: Array4<f64> = timed("헤시안", || region.flatten(&embed_hess(field)))?;

        let frame = vielbein(grad.view())?;
        let metric = induced_metric(grad.view());
        let hessr = raise_hess(hess.view(), metric.view())?;
        let kappa = timed("곡률", || numeric_curv(hessr.view(), frame.view()));

        let (distance, chords) = numeric_distance(points.view(), &shape);
        let sines = numeric_sines(frame.view(), &shape);
        let all: Vec<usize> = (0..region.num_points()).collect();
        let proj = timed("현 사영", || {
            numeric_proj(chords.view(), frame.view(), &all, &shape)
        });

        Ok(Self {
            grid_shape: shape,
            distance,
            sines,
            proj,
            curvature: numeric_curvature(kappa.view()),
        })
    }

    /// 통계량 이름과 요약. 사인과 곡률은 열마다.
    pub fn summaries(&self) -> Vec<(String, Summary)> {
        let mut out = vec![
            ("distance".to_string(), Summary::of(self.distance.view())),
            ("proj".to_string(), Summary::of(self.proj.view())),
        ];
        for (a, col) in self.sines.columns().into_iter().enumerate() {
            out.push((format!("sine_{}", a + 1), Summary::of(col)));
        }
        for (a, col) in self.curvature.columns().into_iter().enumerate() {
            out.push((format!("curvature_{}", a + 1), Summary::of(col)));
        }
        out
    }
}
