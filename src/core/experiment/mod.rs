//! 실험 단위: 다양체 생성, 기하 보고서, 필요 차원 스캔, 결과 저장

pub mod manifold;
pub mod report;
pub mod result;
pub mod scan;

#[cfg(test)]
mod __tests__;

pub use manifold::{CentralRegion, Manifold};
pub use report::{GeometryReport, Summary};
pub use result::ExperimentResult;
pub use scan::{
    region_volumes, reqd_proj_dim, scan_combined, scan_separate, CombinedScan, ReqdProjDim,
    SeparateScan,
};
