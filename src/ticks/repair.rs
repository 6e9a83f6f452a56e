//! Spacing analysis and gap repair of detected ticks.
//!
//! Gaps are classified against the mode of all gaps (the base spacing):
//! below `low_factor × base` is abnormally small, above
//! `high_factor × base` is a gap with missing ticks. Any small gap makes the
//! whole set untrustworthy; the set is then returned unchanged and flagged.
//! Otherwise each large gap is filled at the mean of the good gaps.
use super::TickSet;
use crate::diagnostics::DiagnosticLog;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairParams {
    pub low_factor: f64,
    pub high_factor: f64,
    /// Upper bound on ticks inserted into a single gap.
    pub max_missing_per_gap: usize,
    /// Base spacing used when no positive gap exists.
    pub fallback_spacing: i32,
}

impl Default for RepairParams {
    fn default() -> Self {
        Self {
            low_factor: 0.6,
            high_factor: 1.6,
            max_missing_per_gap: 5,
            fallback_spacing: 5,
        }
    }
}

/// Outcome of [`repair_spacing`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingStats {
    pub base_spacing: i32,
    pub mean_good_spacing: f64,
    /// Gap indices `i` (between ticks `i` and `i + 1`) below the low bound.
    pub small_gap_indices: Vec<usize>,
    /// Gap indices above the high bound.
    pub large_gap_indices: Vec<usize>,
    pub inserted_total: usize,
    pub small_gap_error: bool,
    pub log: DiagnosticLog,
}

/// Most frequent positive value; ties resolve to the smallest value.
pub fn mode_of_positive(values: &[i32], fallback: i32) -> i32 {
    let max = values.iter().copied().filter(|&v| v > 0).max();
    let Some(max) = max else {
        return fallback;
    };
    let mut bins = vec![0usize; max as usize + 1];
    for &v in values.iter().filter(|&&v| v > 0) {
        bins[v as usize] += 1;
    }
    let mut best = 0;
    let mut mode = fallback;
    for (v, &count) in bins.iter().enumerate() {
        if count > best {
            best = count;
            mode = v as i32;
        }
    }
    mode
}

/// Classify tick gaps and interpolate missing ticks.
pub fn repair_spacing(ticks: &TickSet, params: &RepairParams) -> (TickSet, SpacingStats) {
    if ticks.len() < 2 {
        return (ticks.clone(), SpacingStats::default());
    }
    let t = ticks.as_slice();
    let gaps = ticks.gaps();
    let base = mode_of_positive(&gaps, params.fallback_spacing);
    let low = params.low_factor * base as f64;
    let high = params.high_factor * base as f64;

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut is_large = vec![false; gaps.len()];
    let mut good_sum = 0.0;
    let mut good_n = 0usize;
    for (i, &g) in gaps.iter().enumerate() {
        let g = g as f64;
        if g < low {
            small.push(i);
        } else if g > high {
            large.push(i);
            is_large[i] = true;
        } else {
            good_sum += g;
            good_n += 1;
        }
    }
    let mean_good = if good_n > 0 {
        good_sum / good_n as f64
    } else {
        base as f64
    };

    let mut log = DiagnosticLog::new();
    log.info(format!(
        "tick repair: base spacing (mode) = {base} px, mean good spacing = {mean_good:.2} px"
    ));

    if !small.is_empty() {
        for &i in &small {
            log.error(format!(
                "abnormally small gap: ticks[{i}]={} -> ticks[{}]={} (gap {} px, limit < {low:.1} px)",
                t[i],
                i + 1,
                t[i + 1],
                gaps[i]
            ));
        }
        let stats = SpacingStats {
            base_spacing: base,
            mean_good_spacing: mean_good,
            small_gap_indices: small,
            large_gap_indices: large,
            inserted_total: 0,
            small_gap_error: true,
            log,
        };
        return (ticks.clone(), stats);
    }

    let mut repaired = Vec::with_capacity(t.len());
    let mut inserted = 0;
    for (i, w) in t.windows(2).enumerate() {
        let (left, right) = (w[0], w[1]);
        repaired.push(left);
        if !is_large[i] {
            continue;
        }
        let gap = gaps[i];
        let missing = ((gap as f64 / mean_good).round() as i64 - 1)
            .max(1)
            .min(params.max_missing_per_gap as i64) as usize;
        let mut added: Vec<i32> = (1..=missing)
            .map(|k| left + (k as f64 * mean_good).round() as i32)
            .filter(|&p| p < right)
            .collect();
        added.dedup();
        log.info(format!(
            "large gap repaired: i={i}, gap={gap} px, inserted {}: {added:?}",
            added.len()
        ));
        inserted += added.len();
        repaired.extend(added);
    }
    if let Some(&last) = t.last() {
        repaired.push(last);
    }

    let stats = SpacingStats {
        base_spacing: base,
        mean_good_spacing: mean_good,
        small_gap_indices: small,
        large_gap_indices: large,
        inserted_total: inserted,
        small_gap_error: false,
        log,
    };
    (TickSet::from_positions(repaired), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    #[test]
    fn mode_prefers_smallest_on_ties() {
        assert_eq!(mode_of_positive(&[10, 10, 12, 12, 30], 5), 10);
        assert_eq!(mode_of_positive(&[0, -3], 5), 5);
        assert_eq!(mode_of_positive(&[], 7), 7);
    }

    #[test]
    fn short_sets_pass_through() {
        let t = TickSet::from_positions(vec![4]);
        let (out, stats) = repair_spacing(&t, &RepairParams::default());
        assert_eq!(out, t);
        assert!(stats.log.is_empty());
        assert!(!stats.small_gap_error);
    }

    #[test]
    fn large_gap_uses_mean_good_spacing() {
        let t = TickSet::from_positions(vec![0, 10, 20, 30, 41, 51, 61]);
        // gaps 10,10,10,11,10,10 ; no large gap
        let (out, stats) = repair_spacing(&t, &RepairParams::default());
        assert_eq!(out, t);
        assert_eq!(stats.inserted_total, 0);
        assert!((stats.mean_good_spacing - 61.0 / 6.0).abs() < 1e-12);

        let t = TickSet::from_positions(vec![0, 11, 22, 33, 66, 77]);
        let (out, stats) = repair_spacing(&t, &RepairParams::default());
        assert_eq!(stats.base_spacing, 11);
        assert_eq!(stats.large_gap_indices, vec![3]);
        assert_eq!(out.as_slice(), &[0, 11, 22, 33, 44, 55, 66, 77]);
        assert_eq!(stats.log.count(Severity::Info), 2);
    }

    #[test]
    fn insertion_count_is_capped() {
        let t = TickSet::from_positions(vec![0, 10, 20, 120]);
        let params = RepairParams {
            max_missing_per_gap: 3,
            ..RepairParams::default()
        };
        let (out, stats) = repair_spacing(&t, &params);
        assert_eq!(stats.inserted_total, 3);
        assert_eq!(out.as_slice(), &[0, 10, 20, 30, 40, 50, 120]);
    }

    #[test]
    fn every_large_gap_is_filled_on_a_long_ruler() {
        // 200 ticks at pitch 10 with every 20th tick missing
        let positions: Vec<i32> = (0..200).filter(|k| k % 20 != 10).map(|k| k * 10).collect();
        let t = TickSet::from_positions(positions);
        let (out, stats) = repair_spacing(&t, &RepairParams::default());
        assert_eq!(stats.large_gap_indices.len(), 10);
        assert_eq!(stats.inserted_total, 10);
        let full: Vec<i32> = (0..200).map(|k| k * 10).collect();
        assert_eq!(out.as_slice(), full.as_slice());
    }
}
