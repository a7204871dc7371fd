//! # 스펙트럼 필드 생성기
//!
//! 주기 직사각 격자 위의 정상 가우시안 무작위 벡터장을 푸리에 공간에서 합성한다.

pub mod fft;
pub mod field;

#[cfg(test)]
mod __tests__;

pub use fft::{irfftn, rfftn};
pub use field::{gauss_sqrt_cov_ft, spatial_freq, SpectralField};
