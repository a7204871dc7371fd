//! 필요 투영 차원 스캔: 주변 차원 N 과 영역 비율 V 에 대해

use super::manifold::Manifold;
use crate::core::config::{ExperimentConfig, ManifoldConfig, ParamRanges, SamplingConfig};
use crate::core::distortion::distortion_m;
use crate::core::error::{ProjectionError, Result};
use crate::core::percentile::{calc_reqd_m, distortion_percentile};
use crate::core::progress::{progress_bar, timed};
use crate::core::region::region_inds_list;
use log::info;
use ndarray::{s, Array2, Array3, Array4, Axis};
use rand::Rng;

/// 한 다양체의 필요 투영 차원
#[derive(Debug, Clone)]
pub struct ReqdProjDim {
    /// 실제로 쓴 M (N 이하)
    pub proj_dims: Vec<usize>,
    /// (K, #ε, V)
    pub reqd: Array3<f64>,
    /// (1-p) 백분위 왜곡 (K, V, #M)
    pub distortion: Array3<f64>,
}

/// 한 다양체에서 왜곡 표본 → 백분위수 → 필요 M
pub fn reqd_proj_dim<R: Rng + ?Sized>(
    manifold: &Manifold,
    ranges: &ParamRanges,
    sampling: &SamplingConfig,
    rng: &mut R,
) -> Result<ReqdProjDim> {
    let n = manifold.ambient_dim();
    let proj_dims: Vec<usize> = ranges.proj_dims.iter().cloned().filter(|&m| m <= n).collect();
    if proj_dims.is_empty() {
        return Err(ProjectionError::InvalidDimension {
            proj_dim: ranges.proj_dims.first().cloned().unwrap_or(0),
            ambient_dim: n,
        });
    }

    let regions = timed("영역 인덱스", || {
        region_inds_list(&manifold.grid_shape, &ranges.mfld_fracs, &mut *rng)
    })?;
    let samples = distortion_m(
        manifold.points.view(),
        manifold.frame.view(),
        &proj_dims,
        &regions,
        sampling,
        rng,
    )?;
    let distortion = distortion_percentile(&samples, sampling.prob)?;
    let reqd = calc_reqd_m(&ranges.eps, &proj_dims, distortion.view())?;
    Ok(ReqdProjDim {
        proj_dims,
        reqd,
        distortion,
    })
}

/// N 과 V 를 함께 바꾼 스캔 결과
#[derive(Debug, Clone)]
pub struct CombinedScan {
    /// (K, #ε, V, #N)
    pub reqd: Array4<f64>,
    /// (K, V, #M, #N), N 보다 큰 M 은 NaN
    pub distortion: Array4<f64>,
    /// (K, V)
    pub vols: Array2<f64>,
}

fn gmean(values: &[f64]) -> f64 {
    let n = values.len().max(1) as f64;
    (values.iter().map(|v| v.ln()).sum::<f64>() / n).exp()
}

/// 영역 부피 척도 `2 gmean(range[..k]) / gmean(width[..k]) * fraction`, (K, V)
pub fn region_volumes(manifold: &ManifoldConfig, fracs: &[f64]) -> Array2<f64> {
    let k_dim = manifold.intrinsic_dim();
    Array2::from_shape_fn((k_dim, fracs.len()), |(k, v)| {
        let max_vol = gmean(&manifold.intrinsic_range[..=k]) / gmean(&manifold.width[..=k]);
        2.0 * max_vol * fracs[v]
    })
}

/// 가장 큰 N 으로 다양체를 하나 만들고, 각 N 에 대해 앞쪽 좌표만 써서 스캔
pub fn scan_combined<R: Rng + ?Sized>(
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<CombinedScan> {
    config.validate()?;
    let ranges = &config.param_ranges;
    let k_dim = config.manifold.intrinsic_dim();
    let (num_eps, num_v, num_m, num_n) = (
        ranges.eps.len(),
        ranges.mfld_fracs.len(),
        ranges.proj_dims.len(),
        ranges.ambient_dims.len(),
    );

    let n_max = ranges.ambient_dims[num_n - 1];
    let mfld_config = ManifoldConfig {
        ambient_dim: n_max,
        ..config.manifold.clone()
    };
    let manifold = Manifold::generate(&mfld_config, &mut *rng)?;

    let mut reqd = Array4::<f64>::zeros((k_dim, num_eps, num_v, num_n));
    let mut distortion = Array4::<f64>::from_elem((k_dim, num_v, num_m, num_n), f64::NAN);
    let bar = progress_bar(num_n as u64, "주변 차원 N", config.sampling.show_progress);
    for (i, &n) in ranges.ambient_dims.iter().enumerate() {
        info!("N={} ({}/{})", n, i + 1, num_n);
        let sub = manifold.with_ambient(n)?;
        let out = reqd_proj_dim(&sub, ranges, &config.sampling, &mut *rng)?;
        reqd.index_axis_mut(Axis(3), i).assign(&out.reqd);
        distortion
            .slice_mut(s![.., .., ..out.proj_dims.len(), i])
            .assign(&out.distortion);
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(CombinedScan {
        reqd,
        distortion,
        vols: region_volumes(&config.manifold, &ranges.mfld_fracs),
    })
}

/// N 과 V 를 따로 바꾼 스캔 결과
#[derive(Debug, Clone)]
pub struct SeparateScan {
    /// 가장 큰 영역에서 N 변화: (K, #ε, #N)
    pub reqd_n: Array3<f64>,
    /// 가장 큰 N 에서 V 변화: (K, #ε, V)
    pub reqd_v: Array3<f64>,
    /// (K, #M, #N)
    pub distortion_n: Array3<f64>,
    /// (K, V, #M)
    pub distortion_v: Array3<f64>,
    /// (K, V)
    pub vols: Array2<f64>,
}

/// N 스캔은 마지막 비율만, V 스캔은 마지막 N 만 써서 두 번 실행
pub fn scan_separate<R: Rng + ?Sized>(
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<SeparateScan> {
    config.validate()?;
    let by_n = ExperimentConfig {
        param_ranges: config.param_ranges.with_last_fraction(),
        ..config.clone()
    };
    let by_v = ExperimentConfig {
        param_ranges: config.param_ranges.with_last_ambient_dim(),
        ..config.clone()
    };

    info!("N 스캔");
    let scan_n = scan_combined(&by_n, &mut *rng)?;
    info!("V 스캔");
    let scan_v = scan_combined(&by_v, &mut *rng)?;

    Ok(SeparateScan {
        reqd_n: scan_n.reqd.index_axis(Axis(2), 0).to_owned(),
        reqd_v: scan_v.reqd.index_axis(Axis(3), 0).to_owned(),
        distortion_n: scan_n.distortion.index_axis(Axis(1), 0).to_owned(),
        distortion_v: scan_v.distortion.index_axis(Axis(3), 0).to_owned(),
        vols: scan_v.vols,
    })
}
