//! 접원뿔 보장의 이론값과 표본 최대 왜곡 비교

use super::cone::{
    guarantee, guarantee_inv, make_basis_other, make_basis_perp, subspace_distortion,
};
use crate::core::config::IntraCellConfig;
use crate::core::error::{config_bail, Result};
use crate::core::progress::progress_bar;
use chrono::{DateTime, Utc};
use log::{debug, info};
use ndarray::Array4;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 한 번의 비교 결과
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// 중심 부분공간의 왜곡
    pub epsilon: f64,
    /// 가장자리 최대 왜곡에 대한 허용 중심 왜곡
    pub gnt: f64,
    /// 원뿔 가장자리 표본들의 최대 왜곡
    pub epsilonb: f64,
    /// 중심 왜곡으로부터 보장되는 최대 왜곡
    pub gnti: f64,
}

/// 중심 부분공간 하나와 가장자리 표본 `num_trials` 개를 비교
pub fn comparison<R: Rng + ?Sized>(
    num_trials: usize,
    theta: f64,
    proj_dim: usize,
    sub_dim: usize,
    ambient_dim: usize,
    rng: &mut R,
) -> Result<Comparison> {
    if proj_dim == 0 || proj_dim > ambient_dim {
        config_bail!("투영 차원 M={} 은 1..=N={} 이어야 함", proj_dim, ambient_dim);
    }
    let (par, perp) = make_basis_perp(ambient_dim, sub_dim, &mut *rng)?;
    let epsilon = subspace_distortion(par.view(), proj_dim);

    let epsilonb = (0..num_trials).try_fold(0.0f64, |acc, _| -> Result<f64> {
        let other = make_basis_other(par.view(), perp.view(), theta, &mut *rng)?;
        Ok(acc.max(subspace_distortion(other.view(), proj_dim)))
    })?;

    Ok(Comparison {
        epsilon,
        gnt: guarantee(epsilonb, theta, proj_dim, ambient_dim),
        epsilonb,
        gnti: guarantee_inv(epsilon, theta, proj_dim, ambient_dim),
    })
}

/// 모든 (θ, M, K, 반복) 에 대한 비교 결과, 각 배열 `(θ, M, K, rep)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntraCellResult {
    pub created_at: DateTime<Utc>,
    pub config: IntraCellConfig,
    pub eps: Array4<f64>,
    pub gnt: Array4<f64>,
    pub epsb: Array4<f64>,
    pub gnti: Array4<f64>,
}

impl IntraCellResult {
    /// 설정의 모든 조합에 대해 비교 실행
    pub fn generate<R: Rng + ?Sized>(config: &IntraCellConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let shape = (
            config.thetas.len(),
            config.proj_dims.len(),
            config.sub_dims.len(),
            config.num_reps,
        );
        info!(
            "셀 내부 비교: N={}, θ {:?}, M {:?}, K {:?}, 표본 {}",
            config.ambient_dim,
            config.thetas,
            config.proj_dims,
            config.sub_dims,
            config.num_trials
        );

        let mut eps = Array4::<f64>::zeros(shape);
        let mut gnt = Array4::<f64>::zeros(shape);
        let mut epsb = Array4::<f64>::zeros(shape);
        let mut gnti = Array4::<f64>::zeros(shape);

        let total = (shape.0 * shape.1 * shape.2 * shape.3) as u64;
        let bar = progress_bar(total, "셀 내부 비교", config.show_progress);
        for (i, &theta) in config.thetas.iter().enumerate() {
            for (j, &m) in config.proj_dims.iter().enumerate() {
                for (k, &sub) in config.sub_dims.iter().enumerate() {
                    for r in 0..config.num_reps {
                        let c = comparison(
                            config.num_trials,
                            theta,
                            m,
                            sub,
                            config.ambient_dim,
                            &mut *rng,
                        )?;
                        let idx = [i, j, k, r];
                        eps[idx] = c.epsilon;
                        gnt[idx] = c.gnt;
                        epsb[idx] = c.epsilonb;
                        gnti[idx] = c.gnti;
                        bar.inc(1);
                    }
                    debug!("θ={} M={} K={} 완료", theta, m, sub);
                }
            }
        }
        bar.finish_and_clear();

        Ok(Self {
            created_at: Utc::now(),
            config: config.clone(),
            eps,
            gnt,
            epsb,
            gnti,
        })
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
