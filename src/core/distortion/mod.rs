//! 투영에 따른 현 길이와 접공간의 최대 왜곡

pub mod chord;
pub mod engine;
pub mod tangent;

#[cfg(test)]
mod __tests__;

pub use chord::{chord_pairs, chord_ratio_bounds, RatioBounds};
pub use engine::{accumulate_max, distortion_m, DistortionEngine, DistortionSamples};
pub use tangent::tangent_distortion;
