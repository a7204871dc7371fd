//! 가우시안 공분산을 갖는 정상 무작위 벡터장의 스펙트럼 합성

use super::fft::{half_len, irfftn};
use crate::core::config::ManifoldConfig;
use crate::core::error::Result;
use log::debug;
use ndarray::{Array1, ArrayD, Axis, Dimension, IxDyn};
use rand::Rng;
use rand_distr::StandardNormal;
use rustfft::num_complex::Complex64;
use std::f64::consts::{PI, SQRT_2};

/// 매장 함수의 푸리에 계수
///
/// `coeffs[s, t, ..., i] = phi^i(k1[s], k2[t], ...)`, 마지막 격자 축은 반쪽 스펙트럼
#[derive(Debug, Clone)]
pub struct SpectralField {
    pub coeffs: ArrayD<Complex64>,
    /// 축별 공간 주파수 (마지막 축만 단측)
    pub kvecs: Vec<Array1<f64>>,
    /// 과샘플링을 포함한 실공간 격자 크기
    pub grid_shape: Vec<usize>,
}

/// numpy `fftfreq(n, d)` 에 2π 를 곱한 값
pub fn fftfreq(n: usize, d: f64) -> Array1<f64> {
    let scale = 2.0 * PI / (n as f64 * d);
    Array1::from_iter((0..n).map(|i| {
        let j = if i < (n + 1) / 2 { i as f64 } else { i as f64 - n as f64 };
        j * scale
    }))
}

/// numpy `rfftfreq(n, d)` 에 2π 를 곱한 값
pub fn rfftfreq(n: usize, d: f64) -> Array1<f64> {
    let scale = 2.0 * PI / (n as f64 * d);
    Array1::from_iter((0..half_len(n)).map(|i| i as f64 * scale))
}

/// 축별 공간 주파수 벡터. 마지막 축만 반쪽 스펙트럼.
pub fn spatial_freq(
    intrinsic_range: &[f64],
    intrinsic_num: &[usize],
    expand: usize,
) -> Vec<Array1<f64>> {
    let k_dim = intrinsic_num.len();
    (0..k_dim)
        .map(|a| {
            let res = 2.0 * intrinsic_range[a] / intrinsic_num[a] as f64;
            let n = expand * intrinsic_num[a];
            if a + 1 < k_dim {
                fftfreq(n, res)
            } else {
                rfftfreq(n, res)
            }
        })
        .collect()
}

/// 1차원 가우시안 공분산의 푸리에 변환 제곱근
///
/// `num_pt * sqrt(dk / sqrt(2π) * width * exp(-width² k² / 2))`
pub fn gauss_sqrt_cov_ft(k: &Array1<f64>, width: f64, num_pt: usize) -> Array1<f64> {
    let dk = if k.len() > 1 { k[1] } else { 0.0 };
    let num_pt = num_pt as f64;
    k.mapv(|kk| {
        let cov_ft = dk / (2.0 * PI).sqrt() * width * (-0.5 * width * width * kk * kk).exp();
        num_pt * cov_ft.sqrt()
    })
}

impl SpectralField {
    /// 과샘플링된 격자에서 무작위 매장의 푸리에 계수 생성
    pub fn random<R: Rng + ?Sized>(config: &ManifoldConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let kvecs = spatial_freq(&config.intrinsic_range, &config.intrinsic_num, config.expand);
        let grid_shape: Vec<usize> = config
            .intrinsic_num
            .iter()
            .map(|&n| n * config.expand)
            .collect();
        Ok(Self::from_kvecs(config.ambient_dim, kvecs, grid_shape, &config.width, rng))
    }

    /// 주어진 주파수 격자에서 계수 생성
    pub fn from_kvecs<R: Rng + ?Sized>(
        ambient_dim: usize,
        kvecs: Vec<Array1<f64>>,
        grid_shape: Vec<usize>,
        width: &[f64],
        rng: &mut R,
    ) -> Self {
        let sqrt_covs: Vec<Array1<f64>> = kvecs
            .iter()
            .zip(width)
            .zip(&grid_shape)
            .map(|((k, &w), &n)| gauss_sqrt_cov_ft(k, w, n))
            .collect();

        let mut shape: Vec<usize> = kvecs.iter().map(|k| k.len()).collect();
        shape.push(ambient_dim);
        debug!("스펙트럼 계수 생성: shape {:?}", shape);

        let mut re = ArrayD::<f64>::zeros(IxDyn(&shape));
        let mut im = ArrayD::<f64>::zeros(IxDyn(&shape));
        re.iter_mut().for_each(|x| *x = rng.sample(StandardNormal));
        im.iter_mut().for_each(|x| *x = rng.sample(StandardNormal));

        fold_conjugate(&mut re, &mut im, &grid_shape);

        let scale = 1.0 / (2.0 * ambient_dim as f64).sqrt();
        let k_dim = kvecs.len();
        let coeffs = ArrayD::from_shape_fn(re.raw_dim(), |idx| {
            let cov: f64 = (0..k_dim).map(|a| sqrt_covs[a][idx[a]]).product();
            Complex64::new(re[idx.slice()], im[idx.slice()]) * (cov * scale)
        });

        Self {
            coeffs,
            kvecs,
            grid_shape,
        }
    }

    pub fn intrinsic_dim(&self) -> usize {
        self.grid_shape.len()
    }

    pub fn ambient_dim(&self) -> usize {
        self.coeffs.len_of(Axis(self.coeffs.ndim() - 1))
    }

    /// 주어진 내재 축들에 대한 편미분을 역변환: `Π_a (i k_a) * coeffs`
    pub fn derivative(&self, axes: &[usize]) -> ArrayD<f64> {
        let mut factor = Complex64::new(1.0, 0.0);
        for _ in axes {
            factor *= Complex64::new(0.0, 1.0);
        }
        let kvecs = &self.kvecs;
        let coeffs = &self.coeffs;
        let scaled = ArrayD::from_shape_fn(coeffs.raw_dim(), |idx| {
            let k: f64 = axes.iter().map(|&a| kvecs[a][idx[a]]).product();
            coeffs[idx.slice()] * factor * k
        });
        irfftn(&scaled, &self.grid_shape)
    }
}

/// 실수 역변환을 위한 켤레 대칭 강제
///
/// 마지막 격자 축의 0 / 나이퀴스트 단면에서 `X[-k] = conj(X[k])`.
/// 자기 켤레 점은 실수이고 분산 1 을 유지한다.
fn fold_conjugate(re: &mut ArrayD<f64>, im: &mut ArrayD<f64>, grid_shape: &[usize]) {
    let last = grid_shape.len() - 1;
    let n_last = grid_shape[last];
    let mut slices = vec![0];
    if n_last % 2 == 0 && n_last > 0 {
        slices.push(n_last / 2);
    }

    for &j in &slices {
        let snap_re = re.index_axis(Axis(last), j).to_owned();
        let snap_im = im.index_axis(Axis(last), j).to_owned();
        let dims = snap_re.shape().to_vec();

        let mut re_slice = re.index_axis_mut(Axis(last), j);
        let mut im_slice = im.index_axis_mut(Axis(last), j);
        for (idx, v) in re_slice.indexed_iter_mut() {
            let (flip, self_conj) = flipped_index(idx.slice(), &dims);
            *v = (snap_re[idx.slice()] + snap_re[&flip[..]]) / SQRT_2;
            if self_conj {
                *v /= SQRT_2;
            }
        }
        for (idx, v) in im_slice.indexed_iter_mut() {
            let (flip, _) = flipped_index(idx.slice(), &dims);
            *v = (snap_im[idx.slice()] - snap_im[&flip[..]]) / SQRT_2;
        }
    }
}

/// 격자 축 인덱스를 `-k mod n` 으로 뒤집는다 (마지막 주변 좌표 축은 그대로)
fn flipped_index(idx: &[usize], dims: &[usize]) -> (Vec<usize>, bool) {
    let nd = dims.len();
    let mut flip = Vec::with_capacity(nd);
    let mut self_conj = true;
    for a in 0..nd {
        let i = idx[a];
        let f = if a + 1 < nd { (dims[a] - i) % dims[a] } else { i };
        self_conj &= f == i;
        flip.push(f);
    }
    (flip, self_conj)
}
