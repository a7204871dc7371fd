use crate::core::config::ManifoldConfig;
use crate::core::geometry::derivatives::*;
use crate::core::spectral::field::{rfftfreq, SpectralField};
use ndarray::{ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustfft::num_complex::Complex64;

/// `phi(x) = cos(k1 x)` 인 1차원, 주변 차원 1 필드
fn cosine_field(n: usize, d: f64) -> SpectralField {
    let kvec = rfftfreq(n, d);
    let mut coeffs = ArrayD::<Complex64>::zeros(IxDyn(&[kvec.len(), 1]));
    coeffs[[1, 0]] = Complex64::new(n as f64 / 2.0, 0.0);
    SpectralField {
        coeffs,
        kvecs: vec![kvec],
        grid_shape: vec![n],
    }
}

#[test]
fn 코사인_미분_해석해_비교_테스트() {
    let (n, d) = (16, 0.3);
    let field = cosine_field(n, d);
    let k1 = 2.0 * std::f64::consts::PI / (n as f64 * d);

    let emb = embed(&field);
    let grad = embed_grad(&field);
    let hess = embed_hess(&field);
    assert_eq!(grad.shape(), &[n, 1, 1]);
    assert_eq!(hess.shape(), &[n, 1, 1, 1]);

    for t in 0..n {
        let x = t as f64 * d;
        assert!((emb[[t, 0]] - (k1 * x).cos()).abs() < 1e-12);
        assert!((grad[[t, 0, 0]] + k1 * (k1 * x).sin()).abs() < 1e-12);
        assert!((hess[[t, 0, 0, 0]] + k1 * k1 * (k1 * x).cos()).abs() < 1e-12);
    }
}

#[test]
fn 헤시안_대칭성_테스트() {
    let config = ManifoldConfig {
        ambient_dim: 3,
        intrinsic_range: vec![4.0, 4.0],
        intrinsic_num: vec![8, 8],
        width: vec![1.0, 1.0],
        expand: 2,
    };
    let field = SpectralField::random(&config, &mut StdRng::seed_from_u64(2)).unwrap();
    let hess = embed_hess(&field);
    assert_eq!(hess.shape(), &[16, 16, 3, 2, 2]);

    for s in 0..16 {
        for t in 0..16 {
            for i in 0..3 {
                assert_eq!(hess[[s, t, i, 0, 1]], hess[[s, t, i, 1, 0]]);
            }
        }
    }

    let grad = embed_grad(&field);
    assert_eq!(grad.shape(), &[16, 16, 3, 2]);
    let norm: f64 = grad.iter().map(|x| x * x).sum();
    assert!(norm > 0.0, "기울기가 모두 0");
}
