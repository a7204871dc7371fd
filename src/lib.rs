//! 무작위 가우시안 다양체의 무작위 투영 왜곡 라이브러리
//!
//! 몬테카를로로 왜곡 분포를 추정하고, 목표 왜곡 ε 과 실패 확률 p 를 만족하는
//! 최소 투영 차원 M 을 주변 차원 N 과 다양체 부피에 대해 구한다.

pub mod core;

// 핵심 모듈들 재수출
pub use core::{
    // 설정
    ExperimentConfig, IntraCellConfig, ManifoldConfig, ParamRanges, SamplingConfig,
    // 에러
    ProjectionError, Result,
    // 다양체
    GeometryReport, Manifold, SpectralField,
    // 투영과 왜곡
    distortion_m, make_basis, region_inds_list, DistortionEngine, DistortionSamples,
    RegionIndices, RegionList,
    // 역산과 스캔
    calc_reqd_m, distortion_percentile, reqd_proj_dim, scan_combined, scan_separate,
    ExperimentResult,
    // 셀 내부 접원뿔 실험
    IntraCellResult,
};
