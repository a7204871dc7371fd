use ndarray::Axis;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_proj_mfld::{
    calc_reqd_m, distortion_m, distortion_percentile, make_basis, region_inds_list, Manifold,
    ManifoldConfig, SamplingConfig,
};

fn paper_like_manifold() -> ManifoldConfig {
    ManifoldConfig {
        ambient_dim: 100,
        intrinsic_range: vec![4.0, 4.0],
        intrinsic_num: vec![16, 16],
        width: vec![1.0, 1.0],
        expand: 2,
    }
}

fn max_gram_error(e: ndarray::ArrayView2<f64>) -> f64 {
    let gram = e.t().dot(&e);
    let k = gram.nrows();
    let mut worst = 0.0f64;
    for a in 0..k {
        for b in 0..k {
            let expected = if a == b { 1.0 } else { 0.0 };
            worst = worst.max((gram[[a, b]] - expected).abs());
        }
    }
    worst
}

#[test]
fn 투영_차원이_클수록_왜곡이_작음() {
    println!("=== M=5 대 M=20 왜곡 비교 ===");
    let mut rng = StdRng::seed_from_u64(2024);
    let mfld = Manifold::generate(&paper_like_manifold(), &mut rng).unwrap();
    assert_eq!(mfld.points.dim(), (256, 100));

    let regions = region_inds_list(&mfld.grid_shape, &[1.0], &mut rng).unwrap();
    let sampling = SamplingConfig {
        prob: 0.05,
        samples: 50,
        batch: 10,
        chunk: 10_000,
        show_progress: false,
    };
    let proj_dims = [5, 20];
    let samples = distortion_m(
        mfld.points.view(),
        mfld.frame.view(),
        &proj_dims,
        &regions,
        &sampling,
        &mut rng,
    )
    .unwrap();
    assert_eq!(samples.shape(), (2, 1, 2, 50));
    assert!(samples.view().iter().all(|&d| d.is_finite() && d >= 0.0));

    let pct = distortion_percentile(&samples, sampling.prob).unwrap();
    for k in 0..2 {
        println!("K={}: M=5 → {:.4}, M=20 → {:.4}", k + 1, pct[[k, 0, 0]], pct[[k, 0, 1]]);
        assert!(
            pct[[k, 0, 1]] < pct[[k, 0, 0]],
            "M=20 왜곡이 M=5 보다 커짐: {:?}",
            pct
        );
    }

    // K=2 는 K=1 을 포함하므로 왜곡이 작지 않음
    for m in 0..2 {
        assert!(pct[[1, 0, m]] >= pct[[0, 0, m]]);
    }

    let reqd = calc_reqd_m(&[0.5, 2.0], &proj_dims, pct.view()).unwrap();
    assert_eq!(reqd.dim(), (2, 2, 1));
    println!("필요 M: {:?}", reqd);
}

#[test]
fn 같은_시드는_같은_왜곡() {
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = ManifoldConfig {
            ambient_dim: 30,
            intrinsic_num: vec![8, 8],
            ..paper_like_manifold()
        };
        let mfld = Manifold::generate(&config, &mut rng).unwrap();
        let regions = region_inds_list(&mfld.grid_shape, &[0.5, 1.0], &mut rng).unwrap();
        let sampling = SamplingConfig {
            prob: 0.1,
            samples: 6,
            batch: 3,
            chunk: 500,
            show_progress: false,
        };
        distortion_m(
            mfld.points.view(),
            mfld.frame.view(),
            &[4, 12],
            &regions,
            &sampling,
            &mut rng,
        )
        .unwrap()
    };

    let a = run(7);
    let b = run(7);
    assert_eq!(a.view(), b.view());
}

#[test]
fn 틀과_투영_기저의_정규직교성() {
    let mut rng = StdRng::seed_from_u64(11);
    let mfld = Manifold::generate(&paper_like_manifold(), &mut rng).unwrap();
    let frame_err = mfld
        .frame
        .axis_iter(Axis(0))
        .map(max_gram_error)
        .fold(0.0f64, f64::max);
    println!("틀 직교 오차: {:e}", frame_err);
    assert!(frame_err < 1e-10);

    let bases = make_basis(8, 100, 20, &mut rng).unwrap();
    assert_eq!(bases.dim(), (8, 100, 20));
    let basis_err = bases
        .axis_iter(Axis(0))
        .map(max_gram_error)
        .fold(0.0f64, f64::max);
    println!("기저 직교 오차: {:e}", basis_err);
    assert!(basis_err < 1e-10);
}
