use crate::core::distortion::chord::*;
use ndarray::{Array2, Array3, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

#[test]
fn 현_쌍_열거_테스트() {
    let pairs: Vec<_> = chord_pairs(&[1, 2, 3], &[7]).collect();
    assert_eq!(pairs, vec![(1, 2), (1, 3), (1, 7), (2, 3), (2, 7), (3, 7)]);

    assert_eq!(chord_pairs(&[], &[1, 2]).count(), 0);
    assert_eq!(chord_pairs(&[4], &[]).count(), 0);
}

#[test]
fn 비율_왜곡_계산_테스트() {
    let b = RatioBounds {
        min_sq: 0.25,
        max_sq: 1.0,
    };
    // scale = 2: |2*0.5-1| = 0, |2*1-1| = 1
    assert!((b.distortion(4, 1) - 1.0).abs() < 1e-12);
    let b = RatioBounds {
        min_sq: 1.0,
        max_sq: 1.0,
    };
    assert!(b.distortion(9, 9).abs() < 1e-12);
}

#[test]
fn 부분공간_안의_점_비율_테스트() {
    // 처음 두 좌표만 쓰는 점들: M >= 2 에서 비율 1
    let mut rng = StdRng::seed_from_u64(21);
    let mut points = Array2::<f64>::zeros((5, 4));
    for mut p in points.axis_iter_mut(Axis(0)) {
        p[0] = StandardNormal.sample(&mut rng);
        p[1] = StandardNormal.sample(&mut rng);
    }
    let projected = points.clone().insert_axis(Axis(0));

    let bounds = chord_ratio_bounds(
        points.view(),
        projected.view(),
        &[1, 2, 4],
        &[0, 1, 2, 3, 4],
        &[],
        3,
        0.0,
    );
    assert_eq!(bounds.len(), 1);
    let b1 = bounds[0][0].unwrap();
    assert!(b1.max_sq <= 1.0 + 1e-12 && b1.min_sq >= 0.0);
    for m in 1..3 {
        let b = bounds[0][m].unwrap();
        assert!((b.min_sq - 1.0).abs() < 1e-12 && (b.max_sq - 1.0).abs() < 1e-12);
    }
}

#[test]
fn 퇴화_현_제외_테스트() {
    let mut points = Array2::<f64>::zeros((3, 2));
    points[[0, 0]] = 1.0;
    points[[1, 0]] = 1.0; // 0 과 같은 점
    points[[2, 1]] = 1.0;
    let mut projected = Array3::<f64>::zeros((1, 3, 2));
    projected[[0, 0, 0]] = 1.0;
    projected[[0, 1, 0]] = 5.0;
    projected[[0, 2, 1]] = 1.0;

    // 같은 점 쌍만 있으면 None
    let only_dup = chord_ratio_bounds(
        points.view(),
        projected.view(),
        &[2],
        &[0, 1],
        &[],
        10,
        1e-24,
    );
    assert!(only_dup[0][0].is_none());

    // (0, 2) 는 비율 1, (1, 2) 는 비율 26/2 = 13
    let all = chord_ratio_bounds(points.view(), projected.view(), &[2], &[0, 1, 2], &[], 10, 1e-24);
    let b = all[0][0].unwrap();
    assert!((b.min_sq - 1.0).abs() < 1e-12);
    assert!((b.max_sq - 13.0).abs() < 1e-12);
    assert!(b.max_sq.is_finite());
}

#[test]
fn 청크_크기_무관성_테스트() {
    let mut rng = StdRng::seed_from_u64(22);
    let points = Array2::from_shape_fn((12, 6), |_| StandardNormal.sample(&mut rng));
    let projected = Array3::from_shape_fn((3, 12, 4), |_| StandardNormal.sample(&mut rng));
    let new: Vec<usize> = (0..7).collect();
    let prev: Vec<usize> = (7..12).collect();

    let bounds_with_chunk = |chunk| {
        chord_ratio_bounds(points.view(), projected.view(), &[2, 4], &new, &prev, chunk, 0.0)
    };
    let small = bounds_with_chunk(1);
    let large = bounds_with_chunk(1000);
    assert_eq!(small, large);
}
