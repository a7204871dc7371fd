use crate::core::config::ManifoldConfig;
use crate::core::experiment::report::*;
use crate::core::geometry::central_index;
use ndarray::arr1;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn 기하_보고서_테스트() {
    let config = ManifoldConfig {
        ambient_dim: 30,
        intrinsic_range: vec![4.0, 4.0],
        intrinsic_num: vec![8, 8],
        width: vec![1.0, 1.0],
        expand: 2,
    };
    let mut rng = StdRng::seed_from_u64(200);
    let report = GeometryReport::compute(&config, &mut rng).unwrap();

    assert_eq!(report.grid_shape, vec![8, 8]);
    assert_eq!(report.distance.len(), 64);
    assert_eq!(report.sines.dim(), (64, 2));
    assert_eq!(report.curvature.dim(), (64, 2));

    let mid = central_index(&report.grid_shape);
    assert_eq!(report.distance[mid], 0.0);
    assert_eq!(report.proj[mid], 1.0);
    assert!(report.sines.row(mid).iter().all(|&s| s.abs() < 1e-6));

    // 사인은 [0, 1], 큰 것부터
    for row in report.sines.rows() {
        assert!(row.iter().all(|&s| (0.0..=1.0).contains(&s)));
        assert!(row[0] >= row[1]);
    }
    // 코사인은 (0, 1]
    assert!(report.proj.iter().all(|&c| c > 0.0 && c <= 1.0 + 1e-12));
    // 곡률은 큰 것부터, 음이 아님
    for row in report.curvature.rows() {
        if row.iter().all(|x| x.is_finite()) {
            assert!(row[0] >= row[1] && row[1] >= 0.0);
        }
    }

    let summaries = report.summaries();
    assert_eq!(summaries.len(), 6);
    assert_eq!(summaries[0].0, "distance");
    println!("{:?}", summaries);
}

#[test]
fn 요약_통계_테스트() {
    let s = Summary::of(arr1(&[1.0, f64::NAN, 3.0, 2.0]).view());
    assert_eq!(s.min, 1.0);
    assert_eq!(s.max, 3.0);
    assert_eq!(s.mean, 2.0);
}
