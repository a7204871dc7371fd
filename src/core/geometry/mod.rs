//! 매장 함수의 미분기하: 기울기, 틀, 계량, 곡률, 행렬장 스펙트럼

pub mod curvature;
pub mod derivatives;
pub mod eigen;
pub mod linalg;
pub mod numeric;
pub mod vielbein;

#[cfg(test)]
mod __tests__;

pub use curvature::{numeric_curv, raise_hess};
pub use derivatives::{embed, embed_grad, embed_hess};
pub use eigen::{evals, mat_field_evals, mat_field_svals, svals_sq};
pub use numeric::{
    central_index, numeric_curvature, numeric_distance, numeric_proj, numeric_sines,
};
pub use vielbein::{induced_metric, vielbein};
