use log::trace;

use crate::peaks::RETRY_LIMIT;
use crate::random::RandomSource;

// New height between `p1` and `p2`: the (floored) midpoint plus a random
// offset of at most midpoint/passes in either direction.
// The offset is redrawn while the result leaves [min_y, max_y]; after
// RETRY_LIMIT draws the last one is kept even if it is still out of bounds.
pub fn subdivide(
    rng: &mut impl RandomSource,
    p1: f64,
    p2: f64,
    passes: usize,
    min_y: f64,
    max_y: f64,
) -> f64 {
    let diff = (p1 - p2).abs();
    let low = p1.min(p2);
    let midpoint = (diff / 2.0).floor() + low;
    let spread = (midpoint / passes.max(1) as f64).floor();

    let out_of_bounds = |delta: f64| midpoint + delta > max_y || midpoint + delta < min_y;

    let mut delta = (rng.next_f64() * spread).floor();
    let mut retry = 1;
    while retry < RETRY_LIMIT && out_of_bounds(delta) {
        delta = (rng.next_f64() * spread).floor();
        retry += 1;
    }
    if out_of_bounds(delta) {
        trace!(
            "jitter for midpoint {} kept out of [{}, {}] after {} draws",
            midpoint, min_y, max_y, retry
        );
    }

    // coin flip for direction
    if (rng.next_f64() * 2.0).floor() == 1.0 {
        delta = -delta;
    }

    midpoint + delta
}

// Midpoint displacement over a whole height sequence.
// Each pass reads the previous sequence and produces a fresh one with a
// displaced midpoint between every adjacent pair, so n heights become
// 2n - 1. Zero passes (or a single height) returns the input unchanged.
pub fn subdivide_peaks(
    rng: &mut impl RandomSource,
    heights: &[f64],
    passes: usize,
    min_y: f64,
    max_y: f64,
) -> Vec<f64> {
    let mut current = heights.to_vec();

    for _ in 0..passes {
        if current.len() < 2 {
            break;
        }
        let mut next = Vec::with_capacity(current.len() * 2 - 1);
        next.push(current[0]);
        for pair in current.windows(2) {
            next.push(subdivide(rng, pair[0], pair[1], passes, min_y, max_y));
            next.push(pair[1]);
        }
        current = next;
    }

    current
}
