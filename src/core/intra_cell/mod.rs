//! # 셀 내부 접원뿔 실험
//!
//! 중심 접공간의 왜곡으로 셀 안 모든 접공간의 왜곡을 보장할 수 있는지 확인한다.

pub mod comparison;
pub mod cone;


pub use comparison::{comparison, Comparison, IntraCellResult};
pub use cone::{
    guarantee, guarantee_inv, make_basis_other, make_basis_perp, max_pang, subspace_distortion,
};
