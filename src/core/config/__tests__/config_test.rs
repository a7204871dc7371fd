//! # 구성 설정 단위테스트
//!
//! 프리셋 값과 설정 검증 로직 확인

use crate::core::config::*;
use crate::core::error::ProjectionError;
use std::io::Write;

#[test]
fn 논문용_기본값_테스트() {
    let config = ExperimentConfig::default();

    assert_eq!(config.param_ranges.eps, vec![0.2, 0.3, 0.4]);
    assert_eq!(config.param_ranges.proj_dims.len(), 50);
    assert_eq!(config.param_ranges.proj_dims[0], 5);
    assert_eq!(*config.param_ranges.proj_dims.last().unwrap(), 250);
    assert_eq!(config.param_ranges.ambient_dims[0], 256);
    assert_eq!(config.param_ranges.ambient_dims[4], 512);
    assert_eq!(*config.param_ranges.ambient_dims.last().unwrap(), 1024);
    assert_eq!(config.param_ranges.mfld_fracs.len(), 10);
    assert!((config.param_ranges.mfld_fracs[9] - 1.0).abs() < 1e-12);
    assert_eq!(config.manifold.intrinsic_num, vec![128, 128]);
    assert!(config.validate().is_ok());
}

#[test]
fn 데모용_설정_테스트() {
    let config = ExperimentConfig::quick();

    assert_eq!(config.param_ranges.proj_dims, vec![4, 53, 102, 151, 200]);
    assert_eq!(config.param_ranges.ambient_dims, vec![200, 282, 400]);
    let fracs = &config.param_ranges.mfld_fracs;
    for (f, expected) in fracs.iter().zip([0.125, 0.25, 0.5, 1.0]) {
        assert!((f - expected).abs() < 1e-12, "비율 {} != {}", f, expected);
    }
    assert_eq!(config.sampling.samples, 20);
    assert!(config.validate().is_ok());
}

#[test]
fn 배치_나눗셈_검증_테스트() {
    let mut config = ExperimentConfig::quick();
    config.sampling.samples = 25;
    config.sampling.batch = 10;

    match config.validate() {
        Err(ProjectionError::Configuration(msg)) => assert!(msg.contains("batch")),
        other => panic!("설정 오류가 나와야 함: {:?}", other),
    }
}

#[test]
fn 잘못된_파라미터_검증_테스트() {
    let base = ExperimentConfig::quick();

    let mut bad = base.clone();
    bad.param_ranges.mfld_fracs = vec![0.5, 1.5];
    assert!(bad.validate().is_err(), "1 을 넘는 비율은 거부되어야 함");

    let mut bad = base.clone();
    bad.param_ranges.proj_dims = vec![10, 5];
    assert!(bad.validate().is_err(), "내림차순 M 은 거부되어야 함");

    let mut bad = base.clone();
    bad.param_ranges.proj_dims = vec![300];
    assert!(bad.validate().is_err(), "M > N 은 거부되어야 함");

    let mut bad = base.clone();
    bad.manifold.width = vec![1.0];
    assert!(bad.validate().is_err(), "축별 길이 불일치는 거부되어야 함");

    let mut bad = base;
    bad.sampling.prob = 1.0;
    assert!(bad.validate().is_err(), "p = 1 은 거부되어야 함");
}

#[test]
fn json_설정_로드_테스트() {
    let config = ExperimentConfig::quick();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = ExperimentConfig::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn 등간격_수열_테스트() {
    assert_eq!(linspace_int(0, 10, 6), vec![0, 2, 4, 6, 8, 10]);
    assert_eq!(linspace_int(3, 9, 1), vec![3]);
    let l = logspace(0.0, 2.0, 3, 10.0);
    assert!((l[0] - 1.0).abs() < 1e-12);
    assert!((l[1] - 10.0).abs() < 1e-9);
    assert!((l[2] - 100.0).abs() < 1e-9);
}
