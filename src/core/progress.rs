//! 긴 루프용 진행 표시 및 구간 시간 측정

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::time::Instant;

/// 진행 막대 생성. `visible == false` 이면 숨김 막대를 돌려준다.
pub fn progress_bar(len: u64, label: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    let template = format!("{} [{{bar:40}}] {{pos}}/{{len}} ({{elapsed}})", label);
    match ProgressStyle::default_bar().template(&template) {
        Ok(style) => pb.set_style(style),
        Err(e) => debug!("진행 막대 스타일 적용 실패: {}", e),
    }
    pb
}

/// 클로저 실행 시간을 debug 레벨로 기록
pub fn timed<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = Instant::now();
    let out = f();
    debug!("{}: {:.2} ms", label, start.elapsed().as_secs_f64() * 1000.0);
    out
}
