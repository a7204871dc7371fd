//! 격자 축 N차원 실수 FFT
//!
//! 배열의 마지막 축은 주변 공간 좌표이고 변환하지 않는다.
//! 반쪽 스펙트럼은 마지막 격자 축에 있다 (numpy `rfftn(axes=0..K)` 과 같은 규약).

use ndarray::{ArrayD, ArrayView1, Axis, IxDyn, Slice, Zip};
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

/// 한 축을 따라 복소 FFT 를 제자리에서 수행 (정규화 없음)
fn fft_along_axis(
    data: &mut ArrayD<Complex64>,
    axis: usize,
    inverse: bool,
    planner: &mut FftPlanner<f64>,
) {
    let n = data.len_of(Axis(axis));
    if n <= 1 {
        return;
    }
    let fft = if inverse {
        planner.plan_fft_inverse(n)
    } else {
        planner.plan_fft_forward(n)
    };
    Zip::from(data.lanes_mut(Axis(axis))).par_for_each(|mut lane| {
        let mut buffer = lane.to_vec();
        fft.process(&mut buffer);
        lane.assign(&ArrayView1::from(&buffer[..]));
    });
}

/// 반쪽 스펙트럼 길이
pub fn half_len(n: usize) -> usize {
    n / 2 + 1
}

/// 역 실수 FFT. `grid_shape` 는 실공간 격자 크기 (마지막 축 길이 복원에 필요).
///
/// 마지막 격자 축의 0 / 나이퀴스트 성분 허수부는 무시된다.
pub fn irfftn(spectrum: &ArrayD<Complex64>, grid_shape: &[usize]) -> ArrayD<f64> {
    let k_dim = grid_shape.len();
    let last = k_dim - 1;
    let mut planner = FftPlanner::new();

    let mut work = spectrum.clone();
    for axis in 0..last {
        fft_along_axis(&mut work, axis, true, &mut planner);
    }

    // 마지막 축: 에르미트 대칭으로 전체 스펙트럼 복원
    let n_last = grid_shape[last];
    let mut full_shape = work.shape().to_vec();
    full_shape[last] = n_last;
    let mut full = ArrayD::<Complex64>::zeros(IxDyn(&full_shape));
    Zip::from(full.lanes_mut(Axis(last)))
        .and(work.lanes(Axis(last)))
        .for_each(|mut dst, src| {
            let nf = src.len();
            for j in 0..n_last {
                dst[j] = if j < nf {
                    src[j]
                } else {
                    src[n_last - j].conj()
                };
            }
        });
    fft_along_axis(&mut full, last, true, &mut planner);

    let total: usize = grid_shape.iter().product();
    let norm = 1.0 / total as f64;
    full.mapv(|c| c.re * norm)
}

/// 순방향 실수 FFT (정규화 없음). `irfftn` 의 역연산.
pub fn rfftn(signal: &ArrayD<f64>, k_dim: usize) -> ArrayD<Complex64> {
    let last = k_dim - 1;
    let mut planner = FftPlanner::new();

    let mut full = signal.mapv(|x| Complex64::new(x, 0.0));
    fft_along_axis(&mut full, last, false, &mut planner);
    let nf = half_len(full.len_of(Axis(last)));
    let mut half = full
        .slice_axis(Axis(last), Slice::from(0..nf))
        .to_owned();
    for axis in 0..last {
        fft_along_axis(&mut half, axis, false, &mut planner);
    }
    half
}
