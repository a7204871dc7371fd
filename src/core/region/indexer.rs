//! 영역 비율별, 내재 차원별 점 인덱스와 증분 분할

use crate::core::error::{config_bail, Result};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 한 (영역 비율, K) 조합의 점 인덱스
///
/// `new` 와 `previous` 는 서로소이고 합집합이 `all` 이다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionIndices {
    /// 이 영역의 모든 점 (평탄화 인덱스, 오름차순)
    pub all: Vec<usize>,
    /// 이전 비율이나 낮은 K 에서 보지 못한 점
    pub new: Vec<usize>,
    /// 이미 본 점
    pub previous: Vec<usize>,
}

impl RegionIndices {
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// `regions[v][k]`: v 번째 비율, 내재 차원 `k + 1`
pub type RegionList = Vec<Vec<RegionIndices>>;

fn check_fraction(frac: f64) -> Result<()> {
    if !(frac > 0.0 && frac <= 1.0) {
        config_bail!("영역 비율은 (0, 1] 범위여야 함: {}", frac);
    }
    Ok(())
}

/// 격자 `shape` 에서 비율 `frac` 만큼 남긴 영역의 K 별 인덱스
///
/// 축마다 버릴 개수 `floor((1-f) n)` 을 앞뒤로 무작위 분배하고,
/// K 보다 높은 축은 무작위로 고른 한 점으로 접는다.
pub fn region_indices<R: Rng + ?Sized>(
    shape: &[usize],
    frac: f64,
    rng: &mut R,
) -> Result<Vec<Vec<usize>>> {
    check_fraction(frac)?;
    if shape.is_empty() || shape.contains(&0) {
        config_bail!("잘못된 격자 모양: {:?}", shape);
    }

    let mut ranges = Vec::with_capacity(shape.len());
    let mut mids = Vec::with_capacity(shape.len());
    for &siz in shape {
        let remove = ((1.0 - frac) * siz as f64 + 1e-9).floor() as usize;
        let remove = remove.min(siz - 1);
        let start = rng.gen_range(0..=remove);
        let mid = rng.gen_range(0..siz);
        ranges.push(start..siz + start - remove);
        mids.push(mid);
    }

    Ok((1..=shape.len())
        .map(|k| {
            let axes: Vec<Vec<usize>> = (0..shape.len())
                .map(|a| {
                    if a < k {
                        ranges[a].clone().collect()
                    } else {
                        vec![mids[a]]
                    }
                })
                .collect();
            ravel_product(&axes, shape)
        })
        .collect())
}

/// 축별 인덱스 목록의 데카르트 곱을 행 우선 평탄화 인덱스로
fn ravel_product(axes: &[Vec<usize>], shape: &[usize]) -> Vec<usize> {
    axes.iter().zip(shape).fold(vec![0], |acc, (idx, &n)| {
        acc.iter()
            .flat_map(|&base| idx.iter().map(move |&i| base * n + i))
            .collect()
    })
}

/// 비율 목록 전체의 증분 인덱스 집합
///
/// 바깥은 비율, 안쪽은 K 에 대한 두 단계 접기. 이전 비율의 K 별 전체 집합과
/// 같은 비율의 직전 K 집합을 들고 다니며 `new` / `previous` 를 나눈다.
pub fn region_inds_list<R: Rng + ?Sized>(
    shape: &[usize],
    fracs: &[f64],
    rng: &mut R,
) -> Result<RegionList> {
    let k_max = shape.len();
    let empty_sets = vec![BTreeSet::<usize>::new(); k_max];

    let (list, _) = fracs.iter().try_fold(
        (Vec::with_capacity(fracs.len()), empty_sets),
        |(mut list, prev_f), &frac| -> Result<_> {
            let all_inds = region_indices(shape, frac, &mut *rng)?;

            let (row, _) = all_inds.iter().zip(&prev_f).fold(
                (Vec::with_capacity(k_max), BTreeSet::new()),
                |(mut row, prev_k), (all, prev_f_k)| {
                    let seen: BTreeSet<usize> = prev_f_k.union(&prev_k).cloned().collect();
                    let (previous, new): (Vec<usize>, Vec<usize>) =
                        all.iter().copied().partition(|i| seen.contains(i));
                    row.push(RegionIndices {
                        all: all.clone(),
                        new,
                        previous,
                    });
                    (row, all.iter().cloned().collect())
                },
            );

            debug!(
                "영역 비율 {:.3}: K 별 새 점 {:?}",
                frac,
                row.iter().map(|r| r.new.len()).collect::<Vec<_>>()
            );
            list.push(row);
            let next_prev = all_inds
                .into_iter()
                .map(|v| v.into_iter().collect())
                .collect();
            Ok((list, next_prev))
        },
    )?;
    Ok(list)
}
