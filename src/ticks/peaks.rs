//! Peak picking on 1D profiles: local maxima, spacing estimate, greedy
//! suppression and centre-of-mass refinement.

/// Indices that are `>=` both neighbours and inside `mask`. End samples
/// compare against their single neighbour; a length-1 signal is a maximum
/// when masked.
pub fn local_maxima(signal: &[f64], mask: &[bool]) -> Vec<usize> {
    let n = signal.len();
    let mut out = Vec::with_capacity((n / 4).max(1));
    match n {
        0 => {}
        1 => {
            if mask[0] {
                out.push(0);
            }
        }
        _ => {
            if mask[0] && signal[0] >= signal[1] {
                out.push(0);
            }
            for x in 1..n - 1 {
                if mask[x] && signal[x] >= signal[x - 1] && signal[x] >= signal[x + 1] {
                    out.push(x);
                }
            }
            if mask[n - 1] && signal[n - 1] >= signal[n - 2] {
                out.push(n - 1);
            }
        }
    }
    out
}

/// Most frequent gap between consecutive candidates within
/// `[min_spacing, max_spacing]`; the smallest gap wins ties. Fewer than
/// three candidates give `default_step`. Never below `min_spacing`.
pub fn estimate_step(
    candidates: &[usize],
    min_spacing: usize,
    max_spacing: usize,
    default_step: usize,
) -> usize {
    if candidates.len() < 3 {
        return default_step.max(min_spacing);
    }
    let mut bins = vec![0usize; max_spacing + 1];
    for w in candidates.windows(2) {
        let d = w[1] - w[0];
        if (min_spacing..=max_spacing).contains(&d) {
            bins[d] += 1;
        }
    }
    let mut step = 0;
    let mut best = 0;
    for (d, &count) in bins.iter().enumerate() {
        if count > best {
            best = count;
            step = d;
        }
    }
    step.max(min_spacing)
}

/// Greedy suppression by descending amplitude.
///
/// `positions` must be sorted ascending and `amplitudes` parallel to it.
/// Each accepted position suppresses every other position within
/// `min_sep`. Equal amplitudes are visited in positional order. Returns the
/// kept positions, sorted.
pub fn suppress_1d(positions: &[usize], amplitudes: &[f64], min_sep: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by(|&a, &b| amplitudes[b].total_cmp(&amplitudes[a]));

    let mut taken = vec![false; positions.len()];
    let mut keep = Vec::new();
    for oi in order {
        if taken[oi] {
            continue;
        }
        let cx = positions[oi];
        keep.push(cx);
        let left_bound = cx.saturating_sub(min_sep);
        let right_bound = cx + min_sep;
        let mut lo = oi;
        while lo > 0 && positions[lo - 1] >= left_bound {
            lo -= 1;
        }
        let mut hi = oi;
        while hi + 1 < positions.len() && positions[hi + 1] <= right_bound {
            hi += 1;
        }
        for t in &mut taken[lo..=hi] {
            *t = true;
        }
    }
    keep.sort_unstable();
    keep
}

/// Move each centre to the weighted mean of `weights` over
/// `[c − half, c + half]`, rounded. Windows with weight sum ≤ 1e−6 keep
/// their centre. The result is sorted and distinct.
pub fn refine_centre_of_mass(weights: &[f64], centres: &[usize], half: usize) -> Vec<usize> {
    let n = weights.len();
    let mut out: Vec<usize> = centres
        .iter()
        .map(|&c| {
            let s = c.saturating_sub(half);
            let e = (c + half + 1).min(n);
            let mut wsum = 0.0;
            let mut xsum = 0.0;
            for (x, &w) in weights.iter().enumerate().take(e).skip(s) {
                wsum += w;
                xsum += w * x as f64;
            }
            if wsum <= 1e-6 {
                c
            } else {
                (xsum / wsum).round() as usize
            }
        })
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Walk sorted centres; one closer than `min_sep` to the last kept centre
/// replaces it only when its darkness is higher.
pub fn keep_darker_within(centres: &[usize], darkness: &[f64], min_sep: usize) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(centres.len());
    for &x in centres {
        match kept.last_mut() {
            Some(last) if x - *last < min_sep => {
                if darkness[x] > darkness[*last] {
                    *last = x;
                }
            }
            _ => kept.push(x),
        }
    }
    kept
}
