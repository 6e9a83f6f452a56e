//! Otsu threshold over 8-bit samples.

/// Threshold maximising the between-class variance; the first maximum wins.
/// Degenerate histograms (all samples in one bin) yield 0.
pub fn otsu_threshold(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let mut hist = [0u64; 256];
    for &v in values {
        hist[v as usize] += 1;
    }
    let n = values.len() as f64;
    let mu: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum::<f64>()
        / n;

    let eps = f32::EPSILON as f64;
    let mut q1 = 0.0f64;
    let mut mu1 = 0.0f64;
    let mut best_sigma = 0.0f64;
    let mut best = 0u8;
    for (i, &c) in hist.iter().enumerate() {
        let p = c as f64 / n;
        mu1 *= q1;
        q1 += p;
        let q2 = 1.0 - q1;
        if q1.min(q2) < eps || q1.max(q2) > 1.0 - eps {
            continue;
        }
        mu1 = (mu1 + i as f64 * p) / q1;
        let mu2 = (mu - q1 * mu1) / q2;
        let sigma = q1 * q2 * (mu1 - mu2) * (mu1 - mu2);
        if sigma > best_sigma {
            best_sigma = sigma;
            best = i as u8;
        }
    }
    best
}

/// Foreground mask: samples strictly above the Otsu threshold.
pub fn otsu_mask(values: &[u8]) -> Vec<bool> {
    let t = otsu_threshold(values);
    values.iter().map(|&v| v > t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bimodal_split() {
        let vals = [10u8, 12, 11, 200, 210, 205, 10, 11];
        let t = otsu_threshold(&vals);
        assert!((12..200).contains(&t), "threshold {t}");
        assert_eq!(
            otsu_mask(&vals),
            vec![false, false, false, true, true, true, false, false]
        );
    }

    #[test]
    fn flat_input_has_empty_mask() {
        assert!(otsu_mask(&[0u8; 16]).iter().all(|&m| !m));
        assert!(otsu_mask(&[]).is_empty());
    }
}
