//! 스캔 결과 저장/불러오기

use super::scan::{scan_separate, SeparateScan};
use crate::core::config::ExperimentConfig;
use crate::core::error::Result;
use chrono::{DateTime, Utc};
use ndarray::{Array2, Array3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON 에는 NaN 이 없으므로 유한하지 않은 값은 `null` 로 기록
mod nan_as_null {
    use ndarray::{Array, Dimension};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, D>(arr: &Array<f64, D>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        D: Dimension + Serialize,
    {
        arr.mapv(|x| if x.is_finite() { Some(x) } else { None })
            .serialize(serializer)
    }

    pub fn deserialize<'de, De, D>(deserializer: De) -> Result<Array<f64, D>, De::Error>
    where
        De: Deserializer<'de>,
        D: Dimension + Deserialize<'de>,
    {
        let opt = Array::<Option<f64>, D>::deserialize(deserializer)?;
        Ok(opt.mapv(|x| x.unwrap_or(f64::NAN)))
    }
}

/// 분리 스캔 결과와 사용한 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub created_at: DateTime<Utc>,
    pub config: ExperimentConfig,
    /// 가장 큰 영역에서 N 에 따른 필요 M (K, #ε, #N)
    #[serde(with = "nan_as_null")]
    pub reqd_n: Array3<f64>,
    /// 가장 큰 N 에서 V 에 따른 필요 M (K, #ε, V)
    #[serde(with = "nan_as_null")]
    pub reqd_v: Array3<f64>,
    /// (K, #M, #N)
    #[serde(with = "nan_as_null")]
    pub distortion_n: Array3<f64>,
    /// (K, V, #M)
    #[serde(with = "nan_as_null")]
    pub distortion_v: Array3<f64>,
    /// (K, V)
    #[serde(with = "nan_as_null")]
    pub vols: Array2<f64>,
}

impl ExperimentResult {
    pub fn from_scan(config: &ExperimentConfig, scan: SeparateScan) -> Self {
        Self {
            created_at: Utc::now(),
            config: config.clone(),
            reqd_n: scan.reqd_n,
            reqd_v: scan.reqd_v,
            distortion_n: scan.distortion_n,
            distortion_v: scan.distortion_v,
            vols: scan.vols,
        }
    }

    /// 분리 스캔 실행
    pub fn run<R: Rng + ?Sized>(config: &ExperimentConfig, rng: &mut R) -> Result<Self> {
        let scan = scan_separate(config, rng)?;
        Ok(Self::from_scan(config, scan))
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
