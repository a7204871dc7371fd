//! 무작위 부분공간 투영

pub mod sampler;


pub use sampler::{make_basis, project_frame, project_points};
