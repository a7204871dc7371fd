use crate::core::config::ManifoldConfig;
use crate::core::spectral::field::*;
use crate::core::spectral::fft::rfftn;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn small_config() -> ManifoldConfig {
    ManifoldConfig {
        ambient_dim: 50,
        intrinsic_range: vec![8.0, 8.0],
        intrinsic_num: vec![32, 32],
        width: vec![1.0, 1.0],
        expand: 2,
    }
}

#[test]
fn 공간_주파수_테스트() {
    let k = fftfreq(4, 0.5);
    let scale = 2.0 * std::f64::consts::PI / 2.0;
    let expected = [0.0, 1.0, -2.0, -1.0];
    for (v, e) in k.iter().zip(expected) {
        assert!((v - e * scale).abs() < 1e-12);
    }

    let kvecs = spatial_freq(&[4.0, 6.0], &[8, 6], 2);
    assert_eq!(kvecs.len(), 2);
    assert_eq!(kvecs[0].len(), 16, "앞 축은 양측 주파수");
    assert_eq!(kvecs[1].len(), 7, "마지막 축은 단측 주파수");
    assert!(kvecs[1].iter().all(|&x| x >= 0.0));
}

#[test]
fn 공분산_스펙트럼_형태_테스트() {
    let k = fftfreq(64, 0.25);
    let sqrt_cov = gauss_sqrt_cov_ft(&k, 1.5, 64);
    assert!(sqrt_cov.iter().all(|&x| x > 0.0));
    let peak = sqrt_cov.iter().cloned().fold(f64::MIN, f64::max);
    assert_eq!(peak, sqrt_cov[0], "최댓값은 0 주파수에 있어야 함");
    // 좌우 대칭
    assert!((sqrt_cov[1] - sqrt_cov[63]).abs() < 1e-12);
}

#[test]
fn 스펙트럼_왕복_테스트() {
    let mut rng = StdRng::seed_from_u64(42);
    let field = SpectralField::random(&small_config(), &mut rng).unwrap();
    assert_eq!(field.grid_shape, vec![64, 64]);
    assert_eq!(field.coeffs.shape(), &[64, 33, 50]);

    let position = field.derivative(&[]);
    let recovered = rfftn(&position, 2);

    let scale = field.coeffs.iter().map(|c| c.norm()).fold(0.0, f64::max);
    let max_err = field
        .coeffs
        .iter()
        .zip(recovered.iter())
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    assert!(max_err < 1e-9 * scale.max(1.0), "왕복 오차가 큼: {}", max_err);
}

#[test]
fn 켤레_대칭_테스트() {
    let mut rng = StdRng::seed_from_u64(5);
    let field = SpectralField::random(&small_config(), &mut rng).unwrap();
    let n0 = field.grid_shape[0];
    let nyq = field.grid_shape[1] / 2;

    for &j in &[0, nyq] {
        for k in 0..n0 {
            let flip = (n0 - k) % n0;
            for i in 0..3 {
                let a = field.coeffs[[k, j, i]];
                let b = field.coeffs[[flip, j, i]];
                assert!((a - b.conj()).norm() < 1e-12, "X[-k] != conj(X[k])");
            }
        }
    }
    // 자기 켤레 점은 실수
    assert_eq!(field.coeffs[[0, 0, 0]].im, 0.0);
    assert_eq!(field.coeffs[[n0 / 2, nyq, 1]].im, 0.0);
}

#[test]
fn 매장_분산_정규화_테스트() {
    // 각 점에서 E|phi(x)|^2 ≈ 1
    let mut rng = StdRng::seed_from_u64(1);
    let field = SpectralField::random(&small_config(), &mut rng).unwrap();
    let position = field.derivative(&[]);
    let points = position.len() / field.ambient_dim();
    let mean_sq = position.iter().map(|x| x * x).sum::<f64>() / points as f64;
    println!("평균 제곱 노름: {:.4}", mean_sq);
    assert!(mean_sq > 0.8 && mean_sq < 1.2, "평균 제곱 노름이 1 근처가 아님: {}", mean_sq);
}

#[test]
fn 시드_재현성_테스트() {
    let a = SpectralField::random(&small_config(), &mut StdRng::seed_from_u64(9)).unwrap();
    let b = SpectralField::random(&small_config(), &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a.coeffs, b.coeffs);
}
