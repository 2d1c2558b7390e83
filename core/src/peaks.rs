use crate::random::RandomSource;

// Upper bound on redraws for a single random height
pub const RETRY_LIMIT: usize = 100;

// A random apex height in [peak_min_y, peak_max_y), whole units
pub fn peak_y(rng: &mut impl RandomSource, peak_min_y: f64, peak_max_y: f64) -> f64 {
    (rng.next_f64() * (peak_max_y - peak_min_y) + peak_min_y).floor()
}

// A random valley height in [valley_min_y, peak_min_y), whole units
pub fn valley_y(rng: &mut impl RandomSource, peak_min_y: f64, valley_min_y: f64) -> f64 {
    (rng.next_f64() * (peak_min_y - valley_min_y) + valley_min_y).floor()
}

// Lay out the coarse skeleton of the range: `count` major peaks separated
// by valley floors. Without `start_with_peak` the sequence is
//   [valley, peak, valley, peak, ..., valley]            (2*count + 1)
// and with it the outer points sit at `peak_min_y` around a drawn valley:
//   [peak_min, valley, peak, valley, ..., peak_min]      (2*count + 3)
//
// Valley floors inserted between peaks are always `valley_min_y`. A valley
// height is still drawn for every peak and then dropped, which keeps the
// random stream identical to the historical layout.
pub fn define_peaks(
    rng: &mut impl RandomSource,
    count: usize,
    valley_min_y: f64,
    peak_min_y: f64,
    peak_max_y: f64,
    start_with_peak: bool,
) -> Vec<f64> {
    let mut heights = Vec::with_capacity(2 * count + 3);
    if start_with_peak {
        heights.push(peak_min_y);
        heights.push(valley_y(rng, peak_min_y, valley_min_y));
    } else {
        heights.push(valley_min_y);
    }

    for _ in 0..count {
        let mut peak = peak_y(rng, peak_min_y, peak_max_y);
        let mut retry = 1;
        while retry < RETRY_LIMIT && peak > peak_max_y {
            peak = peak_y(rng, peak_min_y, peak_max_y);
            retry += 1;
        }

        let mut valley = valley_y(rng, peak_min_y, valley_min_y);
        let mut retry = 1;
        while retry < RETRY_LIMIT && valley < valley_min_y {
            valley = valley_y(rng, peak_min_y, valley_min_y);
            retry += 1;
        }

        heights.push(peak);
        heights.push(valley_min_y);
    }

    if start_with_peak {
        heights.push(peak_min_y);
    }
    heights
}

#[cfg(test)]
mod tests {
    use super::define_peaks;
    use crate::random::{ScriptedRandom, SeededRandom};

    #[test]
    fn peaks_layout_length() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(define_peaks(&mut rng, 0, 50.0, 200.0, 300.0, false).len(), 1);
        assert_eq!(define_peaks(&mut rng, 1, 50.0, 200.0, 300.0, false).len(), 3);
        assert_eq!(define_peaks(&mut rng, 4, 50.0, 200.0, 300.0, false).len(), 9);
        assert_eq!(define_peaks(&mut rng, 0, 50.0, 200.0, 300.0, true).len(), 3);
        assert_eq!(define_peaks(&mut rng, 3, 50.0, 200.0, 300.0, true).len(), 9);
    }

    #[test]
    fn peaks_scripted_values() {
        // peak draw, discarded valley draw, per peak
        let mut rng = ScriptedRandom::new(vec![0.5, 0.9, 0.25, 0.1]).unwrap();
        let heights = define_peaks(&mut rng, 2, 50.0, 200.0, 300.0, false);
        assert_eq!(heights, vec![50.0, 250.0, 50.0, 225.0, 50.0]);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn peaks_start_with_peak() {
        // middle valley, then peak + discarded valley
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0, 0.3]).unwrap();
        let heights = define_peaks(&mut rng, 1, 50.0, 200.0, 300.0, true);
        assert_eq!(heights, vec![200.0, 125.0, 200.0, 50.0, 200.0]);
    }

    #[test]
    fn peaks_statistical_bounds() {
        for seed in 0..200 {
            let mut rng = SeededRandom::new(seed);
            let heights = define_peaks(&mut rng, 5, 50.0, 200.0, 300.0, false);
            for (i, &h) in heights.iter().enumerate() {
                if i % 2 == 0 {
                    assert_eq!(h, 50.0, "valley {} of seed {} is {}", i, seed, h);
                } else {
                    assert!(h >= 200.0 && h < 300.0, "peak {} of seed {} is {}", i, seed, h);
                }
            }
        }
    }
}
