//! 왜곡 분포의 백분위수와 필요 투영 차원 역산

pub mod inverter;


pub use inverter::{calc_reqd_m, distortion_percentile, interp, percentile, regularize_decreasing};
