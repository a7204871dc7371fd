//! # 실험 구성 설정
//!
//! 다양체 생성, 몬테카를로 샘플링, 파라미터 스캔 범위 설정과
//! 논문용(`default`) / 데모용(`quick`) 프리셋

use crate::core::error::{config_bail, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

/// 무작위 가우시안 다양체 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifoldConfig {
    /// N, 주변 공간 차원
    pub ambient_dim: usize,
    /// 축별 내재 좌표 반폭: [-range, range]
    pub intrinsic_range: Vec<f64>,
    /// 축별 샘플 점 개수 (길이 = K)
    pub intrinsic_num: Vec<usize>,
    /// 축별 가우시안 공분산 폭
    pub width: Vec<f64>,
    /// 주기 경계 효과를 줄이기 위한 과샘플링 배수
    pub expand: usize,
}

/// 몬테카를로 샘플링 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// 허용 실패 확률 p
    pub prob: f64,
    /// 투영 샘플 개수 S
    pub samples: usize,
    /// 한 번에 처리할 투영 개수 (samples 를 나누어야 함)
    pub batch: usize,
    /// 한 번에 만들어 둘 현(chord) 쌍의 최대 개수
    pub chunk: usize,
    /// 진행 막대 표시 여부
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_show_progress() -> bool {
    true
}

/// 스캔할 파라미터 범위
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRanges {
    /// 허용 왜곡 ε 목록
    pub eps: Vec<f64>,
    /// 투영 차원 M 목록 (오름차순)
    pub proj_dims: Vec<usize>,
    /// 주변 차원 N 목록 (오름차순)
    pub ambient_dims: Vec<usize>,
    /// 남길 다양체 영역 비율 목록
    pub mfld_fracs: Vec<f64>,
}

/// 전체 실험 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub param_ranges: ParamRanges,
    pub sampling: SamplingConfig,
    pub manifold: ManifoldConfig,
    /// 난수 시드
    pub seed: u64,
}

impl Default for ManifoldConfig {
    fn default() -> Self {
        Self {
            ambient_dim: 1024,
            intrinsic_range: vec![64.0, 64.0],
            intrinsic_num: vec![128, 128],
            width: vec![8.0, 8.0],
            expand: 2,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            prob: 0.05,
            samples: 100,
            batch: 10,
            chunk: 10_000,
            show_progress: true,
        }
    }
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self {
            eps: vec![0.2, 0.3, 0.4],
            proj_dims: linspace_int(5, 250, 50),
            ambient_dims: (0..9)
                .map(|i| floor_usize(2f64.powf(8.0 + 0.25 * i as f64)))
                .collect(),
            mfld_fracs: logspace(-1.5, 0.0, 10, 5.0),
        }
    }
}

impl Default for ExperimentConfig {
    /// 논문용 설정
    fn default() -> Self {
        Self {
            param_ranges: ParamRanges::default(),
            sampling: SamplingConfig::default(),
            manifold: ManifoldConfig::default(),
            seed: 0,
        }
    }
}

impl ExperimentConfig {
    /// 빠른 데모용 설정
    pub fn quick() -> Self {
        Self {
            param_ranges: ParamRanges {
                eps: vec![0.2, 0.3],
                proj_dims: linspace_int(4, 200, 5),
                ambient_dims: logspace(200f64.log10(), 400f64.log10(), 3, 10.0)
                    .into_iter()
                    .map(floor_usize)
                    .collect(),
                mfld_fracs: logspace(-3.0, 0.0, 4, 2.0),
            },
            sampling: SamplingConfig {
                samples: 20,
                ..SamplingConfig::default()
            },
            manifold: ManifoldConfig {
                ambient_dim: 400,
                ..ManifoldConfig::default()
            },
            seed: 0,
        }
    }

    /// JSON 파일에서 설정 로드
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// 값비싼 계산 전에 모든 설정 오류를 검출
    pub fn validate(&self) -> Result<()> {
        self.manifold.validate()?;
        self.sampling.validate()?;
        self.param_ranges.validate()
    }
}

impl ManifoldConfig {
    /// 내재 차원 K
    pub fn intrinsic_dim(&self) -> usize {
        self.intrinsic_num.len()
    }

    pub fn validate(&self) -> Result<()> {
        let k = self.intrinsic_num.len();
        if k == 0 {
            config_bail!("intrinsic_num 이 비어 있음");
        }
        if self.intrinsic_range.len() != k || self.width.len() != k {
            config_bail!(
                "축별 길이 불일치: range {}, num {}, width {}",
                self.intrinsic_range.len(),
                k,
                self.width.len()
            );
        }
        if self.ambient_dim == 0 {
            config_bail!("ambient_dim 은 양수여야 함");
        }
        if self.expand == 0 {
            config_bail!("expand 는 1 이상이어야 함");
        }
        if self.intrinsic_range.iter().chain(self.width.iter()).any(|&x| !(x > 0.0)) {
            config_bail!("intrinsic_range 와 width 는 양수여야 함");
        }
        if self.intrinsic_num.iter().any(|&n| n * self.expand < 2) {
            config_bail!("축마다 과샘플링 후 최소 2개 점이 필요함: {:?}", self.intrinsic_num);
        }
        Ok(())
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.prob > 0.0 && self.prob < 1.0) {
            config_bail!("prob 는 (0, 1) 범위여야 함: {}", self.prob);
        }
        if self.samples == 0 || self.batch == 0 || self.chunk == 0 {
            config_bail!("samples, batch, chunk 는 양수여야 함");
        }
        if self.samples % self.batch != 0 {
            config_bail!(
                "samples 는 batch 로 나누어 떨어져야 함. samples: {}, batch: {}",
                self.samples,
                self.batch
            );
        }
        Ok(())
    }
}

impl ParamRanges {
    pub fn validate(&self) -> Result<()> {
        if self.eps.is_empty() || self.eps.iter().any(|&e| !(e > 0.0)) {
            config_bail!("eps 는 비어 있지 않은 양수 목록이어야 함");
        }
        if self.proj_dims.is_empty() || self.proj_dims[0] == 0 {
            config_bail!("proj_dims 는 비어 있지 않은 양수 목록이어야 함");
        }
        if !is_strictly_ascending(&self.proj_dims) {
            config_bail!("proj_dims 는 엄격한 오름차순이어야 함: {:?}", self.proj_dims);
        }
        if self.ambient_dims.is_empty() || !is_strictly_ascending(&self.ambient_dims) {
            config_bail!("ambient_dims 는 비어 있지 않은 오름차순이어야 함");
        }
        if self.proj_dims[0] > self.ambient_dims[0] {
            config_bail!(
                "가장 작은 M={} 이 가장 작은 N={} 보다 큼",
                self.proj_dims[0],
                self.ambient_dims[0]
            );
        }
        if self.mfld_fracs.is_empty()
            || self.mfld_fracs.iter().any(|&f| !(f > 0.0 && f <= 1.0))
        {
            config_bail!("mfld_fracs 는 (0, 1] 범위여야 함: {:?}", self.mfld_fracs);
        }
        Ok(())
    }

    /// 한 파라미터 목록을 마지막 원소 하나로 대체한 사본
    pub fn with_last_ambient_dim(&self) -> Self {
        Self {
            ambient_dims: last_only(&self.ambient_dims),
            ..self.clone()
        }
    }

    pub fn with_last_fraction(&self) -> Self {
        Self {
            mfld_fracs: last_only(&self.mfld_fracs),
            ..self.clone()
        }
    }
}

/// 셀 내부 접원뿔 보장 실험 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntraCellConfig {
    /// 원뿔 가장자리 부분공간 표본 개수
    pub num_trials: usize,
    /// N, 주변 공간 차원
    pub ambient_dim: usize,
    /// 중심과 가장자리 사이 최대 주각 목록
    pub thetas: Vec<f64>,
    /// 투영 차원 M 목록
    pub proj_dims: Vec<usize>,
    /// 부분공간 차원 K 목록
    pub sub_dims: Vec<usize>,
    /// 비교 반복 횟수
    pub num_reps: usize,
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
    pub seed: u64,
}

impl Default for IntraCellConfig {
    /// 논문용 설정
    fn default() -> Self {
        Self {
            num_trials: 200_000,
            ambient_dim: 1000,
            thetas: vec![0.001, 0.002, 0.003, 0.004],
            proj_dims: vec![50, 75, 100],
            sub_dims: vec![5, 10],
            num_reps: 5,
            show_progress: true,
            seed: 0,
        }
    }
}

impl IntraCellConfig {
    /// 빠른 데모용 설정
    pub fn quick() -> Self {
        Self {
            num_trials: 2000,
            ambient_dim: 500,
            thetas: vec![0.001, 0.002, 0.003],
            proj_dims: vec![25, 50, 75],
            sub_dims: vec![5, 10],
            num_reps: 3,
            show_progress: true,
            seed: 0,
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_trials == 0 || self.num_reps == 0 {
            config_bail!("num_trials 와 num_reps 는 양수여야 함");
        }
        if self.thetas.is_empty()
            || self
                .thetas
                .iter()
                .any(|&t| !(0.0..=FRAC_PI_2).contains(&t))
        {
            config_bail!(
                "thetas 는 [0, π/2] 범위의 비어 있지 않은 목록이어야 함: {:?}",
                self.thetas
            );
        }
        if self.proj_dims.is_empty()
            || self
                .proj_dims
                .iter()
                .any(|&m| m == 0 || m > self.ambient_dim)
        {
            config_bail!(
                "proj_dims 는 1..={} 범위여야 함: {:?}",
                self.ambient_dim,
                self.proj_dims
            );
        }
        // 가장자리 부분공간을 만들려면 여집합이 K 차원 이상이어야 함
        if self.sub_dims.is_empty()
            || self
                .sub_dims
                .iter()
                .any(|&k| k == 0 || 2 * k > self.ambient_dim)
        {
            config_bail!(
                "sub_dims 는 1..={} 범위여야 함: {:?}",
                self.ambient_dim / 2,
                self.sub_dims
            );
        }
        Ok(())
    }
}

fn last_only<T: Clone>(values: &[T]) -> Vec<T> {
    values.last().cloned().into_iter().collect()
}

fn is_strictly_ascending(values: &[usize]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// 부동소수 반올림 오차(399.99999 등)를 흡수하는 버림
fn floor_usize(x: f64) -> usize {
    (x + 1e-9).floor() as usize
}

/// 정수로 버림한 등간격 수열 (numpy `linspace(..., dtype=int)` 과 같음)
pub fn linspace_int(start: usize, stop: usize, num: usize) -> Vec<usize> {
    if num <= 1 {
        return vec![start];
    }
    let step = (stop as f64 - start as f64) / (num - 1) as f64;
    (0..num)
        .map(|i| floor_usize(start as f64 + step * i as f64))
        .collect()
}

/// base^x, x 는 [start, stop] 등간격
pub fn logspace(start: f64, stop: f64, num: usize, base: f64) -> Vec<f64> {
    if num <= 1 {
        return vec![base.powf(start)];
    }
    let span = stop - start;
    (0..num)
        .map(|i| base.powf(start + span * i as f64 / (num - 1) as f64))
        .collect()
}

#[cfg(test)]
mod __tests__;
