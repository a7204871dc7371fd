use crate::core::error::ProjectionError;
use crate::core::geometry::vielbein::*;
use ndarray::{s, Array3, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

fn random_grad(l: usize, n: usize, k: usize, seed: u64) -> Array3<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array3::from_shape_fn((l, n, k), |_| StandardNormal.sample(&mut rng))
}

#[test]
fn 틀_정규직교성_테스트() {
    let grad = random_grad(6, 10, 3, 17);
    let frame = vielbein(grad.view()).unwrap();
    assert_eq!(frame.dim(), (6, 10, 3));

    for e in frame.axis_iter(Axis(0)) {
        let gram = e.t().dot(&e);
        for a in 0..3 {
            for b in 0..3 {
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!(
                    (gram[[a, b]] - expected).abs() < 1e-12,
                    "eᵀe[{},{}] = {}",
                    a,
                    b,
                    gram[[a, b]]
                );
            }
        }
    }
}

#[test]
fn 틀_순차_생성_테스트() {
    // e[:, a] 는 처음 a+1 개 기울기가 펼치는 공간 안에 있다
    let grad = random_grad(4, 8, 3, 23);
    let frame = vielbein(grad.view()).unwrap();

    for (g, e) in grad.axis_iter(Axis(0)).zip(frame.axis_iter(Axis(0))) {
        // 첫 열은 첫 기울기와 평행
        let g0 = g.column(0);
        let cos = g0.dot(&e.column(0)) / g0.dot(&g0).sqrt();
        assert!((cos - 1.0).abs() < 1e-12);

        // 뒤 틀 벡터는 앞 기울기들과 직교
        for a in 1..3 {
            for b in 0..a {
                let overlap = g.column(b).dot(&e.column(a));
                assert!(overlap.abs() < 1e-10, "grad {} · e {} = {}", b, a, overlap);
            }
        }
    }
}

#[test]
fn 일차원_정규화_테스트() {
    let grad = random_grad(5, 7, 1, 3);
    let frame = vielbein(grad.view()).unwrap();
    for (g, e) in grad.axis_iter(Axis(0)).zip(frame.axis_iter(Axis(0))) {
        let norm = g.iter().map(|x| x * x).sum::<f64>().sqrt();
        for (gi, ei) in g.iter().zip(e.iter()) {
            assert!((gi / norm - ei).abs() < 1e-12);
        }
    }
}

#[test]
fn 선형종속_기울기_오류_테스트() {
    let mut grad = random_grad(3, 6, 2, 8);
    // 한 점에서 두 접벡터를 평행하게 만든다
    let first = grad.slice(s![1, .., 0]).to_owned();
    grad.slice_mut(s![1, .., 1]).assign(&(&first * 2.0));

    match vielbein(grad.view()) {
        Err(ProjectionError::NumericalDegeneracy(msg)) => println!("예상된 오류: {}", msg),
        other => panic!("퇴화 오류가 나야 함: {:?}", other.map(|f| f.dim())),
    }
}

#[test]
fn 유도_계량_테스트() {
    let grad = random_grad(3, 5, 2, 31);
    let metric = induced_metric(grad.view());
    assert_eq!(metric.dim(), (3, 2, 2));
    for p in 0..3 {
        for a in 0..2 {
            for b in 0..2 {
                let expected: f64 = (0..5).map(|i| grad[[p, i, a]] * grad[[p, i, b]]).sum();
                assert!((metric[[p, a, b]] - expected).abs() < 1e-12);
            }
        }
        assert_eq!(metric[[p, 0, 1]], metric[[p, 1, 0]]);
    }
}
