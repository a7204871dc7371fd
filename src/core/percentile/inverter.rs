//! 경험적 누적분포 보간으로 (1-p) 백분위수를 구하고 1/ε² 공간에서 M 을 역산

use crate::core::distortion::DistortionSamples;
use crate::core::error::{config_bail, Result};
use ndarray::{s, Array3, ArrayView1, ArrayView3, Axis};

/// 엄격한 감소를 만들기 위해 비감소 구간마다 빼는 값
const TIE_BREAK: f64 = 1e-6;

/// numpy `interp` 와 같은 선형 보간. `xp` 는 오름차순, 범위 밖은 양 끝 값.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return f64::NAN;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    // xp[j-1] < x <= xp[j]
    let j = xp[..n].partition_point(|&v| v < x);
    let (x0, x1) = (xp[j - 1], xp[j]);
    let (f0, f1) = (fp[j - 1], fp[j]);
    if x1 == x0 {
        return f1;
    }
    f0 + (f1 - f0) * (x - x0) / (x1 - x0)
}

/// 표본들의 `P(d > ε) = prob` 인 ε
///
/// 정렬한 표본에 누적확률 `(rank - 0.5) / n` 을 주고 `1 - prob` 에서 보간한다.
pub fn percentile(samples: ArrayView1<f64>, prob: f64) -> f64 {
    let mut sorted: Vec<f64> = samples.iter().cloned().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    let cdf: Vec<f64> = (0..sorted.len()).map(|i| (i as f64 + 0.5) / n).collect();
    interp(1.0 - prob, &cdf, &sorted)
}

/// 모든 (K, V, M) 에 대한 백분위수 `(K, V, M)`
pub fn distortion_percentile(distortions: &DistortionSamples, prob: f64) -> Result<Array3<f64>> {
    if !(prob > 0.0 && prob < 1.0) {
        config_bail!("prob 는 (0, 1) 범위여야 함: {}", prob);
    }
    let data = distortions.view();
    let (k, v, m, samples) = data.dim();
    if samples == 0 {
        config_bail!("왜곡 표본이 비어 있음");
    }
    Ok(Array3::from_shape_fn((k, v, m), |(a, b, c)| {
        percentile(data.slice(s![a, b, c, ..]), prob)
    }))
}

/// M 축(마지막)을 따라 엄격히 감소하도록 보정
///
/// 누적 최소 후, 감소하지 않는 각 단계마다 `TIE_BREAK` 를 누적해 뺀다.
pub fn regularize_decreasing(eps: ArrayView3<f64>) -> Array3<f64> {
    let mut out = eps.to_owned();
    for mut lane in out.lanes_mut(Axis(2)) {
        let mut running = f64::INFINITY;
        for x in lane.iter_mut() {
            running = running.min(*x);
            *x = running;
        }
        let mut shift = 0.0;
        let mut last = f64::NAN;
        for (i, x) in lane.iter_mut().enumerate() {
            let raw = *x;
            if i > 0 && raw - last >= 0.0 {
                shift += TIE_BREAK;
            }
            last = raw;
            *x = raw - shift;
        }
    }
    out
}

/// 목표 왜곡 ε 마다 필요한 투영 차원 `(K, #ε, V)`
///
/// `percentiles`: `(K, V, M)`, `proj_dims` 오름차순. 1/ε² 이 M 에 거의 선형이므로 그 공간에서 보간.
pub fn calc_reqd_m(
    epsilon: &[f64],
    proj_dims: &[usize],
    percentiles: ArrayView3<f64>,
) -> Result<Array3<f64>> {
    let (k, v, m) = percentiles.dim();
    if m != proj_dims.len() {
        config_bail!(
            "백분위수의 M 축 길이 {} 와 proj_dims {} 가 다름",
            m,
            proj_dims.len()
        );
    }
    let decr = regularize_decreasing(percentiles);
    let dims: Vec<f64> = proj_dims.iter().map(|&d| d as f64).collect();

    let mut reqd = Array3::<f64>::zeros((k, epsilon.len(), v));
    for a in 0..k {
        for b in 0..v {
            let inv_sq: Vec<f64> = decr
                .slice(s![a, b, ..])
                .iter()
                .map(|&d| d.powi(-2))
                .collect();
            for (e, &target) in epsilon.iter().enumerate() {
                reqd[[a, e, b]] = interp(target.powi(-2), &inv_sq, &dims);
            }
        }
    }
    Ok(reqd)
}
