use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_proj_mfld::{
    ExperimentConfig, ExperimentResult, GeometryReport, IntraCellConfig, IntraCellResult,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "rand_proj_cli")]
#[command(version = "0.1.0")]
#[command(about = "무작위 가우시안 다양체의 무작위 투영 왜곡 실험")]
struct Cli {
    /// 빠른 데모용 설정 사용
    #[arg(long, conflicts_with = "config")]
    quick: bool,

    /// JSON 설정 파일 경로
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 난수 시드 (설정 파일의 seed 를 덮어씀)
    #[arg(short, long)]
    seed: Option<u64>,

    /// 결과 JSON 저장 경로
    #[arg(short, long, value_name = "FILE", default_value = "rand_proj_result.json")]
    output: PathBuf,

    /// 스캔 대신 다양체 하나의 기하 통계만 출력
    #[arg(long, conflicts_with = "intra_cell")]
    geometry: bool,

    /// 스캔 대신 셀 내부 접원뿔 보장 실험 실행 (--config 는 IntraCellConfig JSON)
    #[arg(long)]
    intra_cell: bool,

    /// 진행 막대 숨김
    #[arg(long)]
    no_progress: bool,
}

fn load_config(cli: &Cli) -> Result<ExperimentConfig> {
    let mut config = match (&cli.config, cli.quick) {
        (Some(path), _) => ExperimentConfig::from_json_file(path)
            .with_context(|| format!("설정 파일 로드 실패: {:?}", path))?,
        (None, true) => ExperimentConfig::quick(),
        (None, false) => ExperimentConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.no_progress {
        config.sampling.show_progress = false;
    }
    config.validate()?;
    Ok(config)
}

fn print_geometry(config: &ExperimentConfig) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let report = GeometryReport::compute(&config.manifold, &mut rng)?;

    println!("📐 기하 통계 (격자 {:?}):", report.grid_shape);
    for (name, s) in report.summaries() {
        println!(
            "   {:<14} 최소 {:>10.4}  평균 {:>10.4}  최대 {:>10.4}",
            name, s.min, s.mean, s.max
        );
    }
    Ok(())
}

fn run_scan(config: &ExperimentConfig, output: &Path) -> Result<()> {
    println!("🎲 분리 스캔 시작:");
    println!("   N: {:?}", config.param_ranges.ambient_dims);
    println!("   M: {:?}", config.param_ranges.proj_dims);
    println!("   영역 비율: {:?}", config.param_ranges.mfld_fracs);
    println!("   ε: {:?}, p: {}", config.param_ranges.eps, config.sampling.prob);
    println!("   샘플: {}, 시드: {}", config.sampling.samples, config.seed);

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let result = ExperimentResult::run(config, &mut rng)?;
    result
        .save_json(output)
        .with_context(|| format!("결과 저장 실패: {:?}", output))?;

    println!("\n✅ 완료: {:.2}초", start.elapsed().as_secs_f64());
    println!("   저장: {:?}", output);
    Ok(())
}

fn load_intra_cell_config(cli: &Cli) -> Result<IntraCellConfig> {
    let mut config = match (&cli.config, cli.quick) {
        (Some(path), _) => IntraCellConfig::from_json_file(path)
            .with_context(|| format!("설정 파일 로드 실패: {:?}", path))?,
        (None, true) => IntraCellConfig::quick(),
        (None, false) => IntraCellConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.no_progress {
        config.show_progress = false;
    }
    config.validate()?;
    Ok(config)
}

fn run_intra_cell(config: &IntraCellConfig, output: &Path) -> Result<()> {
    println!("🔺 셀 내부 비교 시작:");
    println!("   N: {}, θ: {:?}", config.ambient_dim, config.thetas);
    println!("   M: {:?}, K: {:?}", config.proj_dims, config.sub_dims);
    println!("   표본: {}, 반복: {}", config.num_trials, config.num_reps);

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let result = IntraCellResult::generate(config, &mut rng)?;
    let violations = result
        .epsb
        .iter()
        .zip(result.gnti.iter())
        .filter(|(b, gi)| b > gi)
        .count();
    result
        .save_json(output)
        .with_context(|| format!("결과 저장 실패: {:?}", output))?;

    println!("\n✅ 완료: {:.2}초", start.elapsed().as_secs_f64());
    println!("   보장 위반: {} / {}", violations, result.epsb.len());
    println!("   저장: {:?}", output);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.intra_cell {
        let config = load_intra_cell_config(&cli)?;
        return run_intra_cell(&config, &cli.output);
    }
    let config = load_config(&cli)?;

    if cli.geometry {
        print_geometry(&config)
    } else {
        run_scan(&config, &cli.output)
    }
}
