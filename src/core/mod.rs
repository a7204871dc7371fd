//! # 무작위 다양체 투영 핵심 모듈
//!
//! 스펙트럼 합성 → 미분기하 → 영역 인덱스 → 투영 표본 → 왜곡 → 백분위수 역산

pub mod config;
pub mod distortion;
pub mod error;
pub mod experiment;
pub mod geometry;
pub mod intra_cell;
pub mod percentile;
pub mod progress;
pub mod projection;
pub mod region;
pub mod spectral;

// 주요 타입들 재수출
pub use config::{
    ExperimentConfig, IntraCellConfig, ManifoldConfig, ParamRanges, SamplingConfig,
};
pub use distortion::{distortion_m, DistortionEngine, DistortionSamples};
pub use error::{ProjectionError, Result};
pub use experiment::{
    reqd_proj_dim, scan_combined, scan_separate, ExperimentResult, GeometryReport, Manifold,
};
pub use intra_cell::IntraCellResult;
pub use percentile::{calc_reqd_m, distortion_percentile};
pub use projection::make_basis;
pub use region::{region_inds_list, RegionIndices, RegionList};
pub use spectral::SpectralField;
