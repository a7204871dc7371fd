use crate::core::config::ExperimentConfig;
use crate::core::experiment::result::*;
use crate::core::experiment::scan::SeparateScan;
use ndarray::{Array2, Array3};
use tempfile::NamedTempFile;

fn same(a: &Array3<f64>, b: &Array3<f64>) -> bool {
    a.dim() == b.dim()
        && a
            .iter()
            .zip(b.iter())
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
}

#[test]
fn 결과_저장_불러오기_테스트() {
    let config = ExperimentConfig::quick();
    let mut distortion_n = Array3::<f64>::from_elem((2, 5, 3), 0.25);
    distortion_n[[0, 4, 0]] = f64::NAN;
    let scan = SeparateScan {
        reqd_n: Array3::from_elem((2, 2, 3), 42.0),
        reqd_v: Array3::from_elem((2, 2, 4), 17.5),
        distortion_n,
        distortion_v: Array3::from_elem((2, 4, 5), 0.1),
        vols: Array2::from_elem((2, 4), 3.0),
    };
    let result = ExperimentResult::from_scan(&config, scan);

    let file = NamedTempFile::new().unwrap();
    result.save_json(file.path()).unwrap();
    let loaded = ExperimentResult::load_json(file.path()).unwrap();

    assert_eq!(loaded.config, config);
    assert_eq!(loaded.created_at, result.created_at);
    assert!(same(&loaded.reqd_n, &result.reqd_n));
    assert!(same(&loaded.distortion_n, &result.distortion_n));
    assert!(loaded.distortion_n[[0, 4, 0]].is_nan());
    assert_eq!(loaded.vols, result.vols);
}

#[test]
fn 없는_파일_오류_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(ExperimentResult::load_json(missing).is_err());
}
