//! ndarray 뷰와 nalgebra 행렬 사이 변환

use nalgebra::{DMatrix, DVector};
use ndarray::{Array2, ArrayView1, ArrayView2};

pub fn to_dmatrix(view: ArrayView2<f64>) -> DMatrix<f64> {
    let (rows, cols) = view.dim();
    DMatrix::from_fn(rows, cols, |i, j| view[[i, j]])
}

pub fn to_dvector(view: ArrayView1<f64>) -> DVector<f64> {
    DVector::from_iterator(view.len(), view.iter().cloned())
}

pub fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}
