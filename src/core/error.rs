//! 라이브러리 전역 에러 타입

use thiserror::Error;

/// 다양체 투영 실험 에러
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// 실행 전에 검출되는 설정 오류 (배치 크기, 파라미터 범위 등)
    #[error("설정 오류: {0}")]
    Configuration(String),

    /// 투영 차원이 주변 공간 차원보다 큼
    #[error("투영 차원 M={proj_dim} 이 주변 차원 N={ambient_dim} 보다 큼")]
    InvalidDimension { proj_dim: usize, ambient_dim: usize },

    /// 0에 가까운 노름, 특이 메트릭 등
    #[error("수치적 퇴화: {0}")]
    NumericalDegeneracy(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("배열 모양 오류: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// `bail!` 스타일의 설정 오류 생성 헬퍼
macro_rules! config_bail {
    ($($arg:tt)*) => {
        return Err($crate::core::error::ProjectionError::Configuration(format!($($arg)*)))
    };
}

pub(crate) use config_bail;
