//! 중첩 영역의 증분 인덱싱

pub mod indexer;


pub use indexer::{region_indices, region_inds_list, RegionIndices, RegionList};
