use log::debug;

use crate::config::{MountainConfig, PeaksConfig, ValleysConfig};
use crate::coords::{Point, Stage, map_to_stage};
use crate::error::Result;
use crate::flats::{FlatSpec, define_flats};
use crate::peaks::define_peaks;
use crate::random::RandomSource;
use crate::subdivide::subdivide_peaks;

// Mountain range silhouette generator:
// peak layout -> midpoint displacement -> stage mapping -> plateau leveling
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: MountainConfig,
}

impl TerrainGenerator {
    // Validates up front so `generate` can only fail on the same checks
    pub fn new(config: MountainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MountainConfig {
        &self.config
    }

    // Unmapped heights after layout and subdivision
    pub fn heights(&self, rng: &mut impl RandomSource) -> Vec<f64> {
        let peaks = &self.config.peaks;
        let valleys = &self.config.valleys;

        let skeleton = match self.config.init_peaks.as_deref() {
            Some(init) if !init.is_empty() => init.to_vec(),
            _ => define_peaks(
                rng,
                peaks.count as usize,
                valleys.min_y,
                peaks.min_y,
                peaks.max_y,
                peaks.start_with_peak,
            ),
        };
        debug!(
            "skeleton of {} heights, {} subdivision passes",
            skeleton.len(),
            peaks.detail
        );

        subdivide_peaks(
            rng,
            &skeleton,
            peaks.detail as usize,
            valleys.min_y,
            peaks.max_y,
        )
    }

    // Ordered silhouette points in canvas space
    pub fn generate(&self, rng: &mut impl RandomSource) -> Vec<Point> {
        let heights = self.heights(rng);
        let mut points = map_to_stage(&self.config.stage, &heights);
        if let Some(flats) = &self.config.flats {
            define_flats(&mut points, flats);
        }
        debug!("generated {} points", points.len());
        points
    }
}

// Generate a silhouette from loose parts.
// `init_peaks`, when given and non-empty, replaces the random peak layout
// but is still subdivided `peaks.detail` times. Inconsistent settings fail
// with InvalidConfig before any random number is drawn.
pub fn generate(
    stage: &Stage,
    init_peaks: Option<&[f64]>,
    peaks: &PeaksConfig,
    valleys: &ValleysConfig,
    flats: Option<&[FlatSpec]>,
    rng: &mut impl RandomSource,
) -> Result<Vec<Point>> {
    let config = MountainConfig {
        stage: *stage,
        init_peaks: init_peaks.map(<[f64]>::to_vec),
        peaks: peaks.clone(),
        valleys: valleys.clone(),
        flats: flats.map(<[FlatSpec]>::to_vec),
        ..Default::default()
    };
    Ok(TerrainGenerator::new(config)?.generate(rng))
}

#[cfg(test)]
mod tests {
    use super::{TerrainGenerator, generate};
    use crate::config::{MountainConfig, PeaksConfig, ValleysConfig};
    use crate::coords::Stage;
    use crate::error::TerrainError;
    use crate::flats::{Align, FlatSpec};
    use crate::random::{ScriptedRandom, SeededRandom};

    fn config(count: u32, detail: u32, start_with_peak: bool) -> MountainConfig {
        MountainConfig {
            peaks: PeaksConfig {
                count,
                detail,
                start_with_peak,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn expected_len(count: usize, detail: usize, start_with_peak: bool) -> usize {
        let mut len = 2 * count + if start_with_peak { 3 } else { 1 };
        for _ in 0..detail {
            len += len - 1;
        }
        len
    }

    #[test]
    fn length_small_cases() {
        let mut rng = SeededRandom::new(1);
        let g = TerrainGenerator::new(config(1, 0, false)).unwrap();
        assert_eq!(g.generate(&mut rng).len(), 3);
        let g = TerrainGenerator::new(config(1, 1, false)).unwrap();
        assert_eq!(g.generate(&mut rng).len(), 5);
    }

    #[test]
    fn length_invariant() {
        let mut rng = SeededRandom::new(99);
        for count in 0..4 {
            for detail in 0..5 {
                for start in [false, true] {
                    let g = TerrainGenerator::new(config(count, detail, start)).unwrap();
                    assert_eq!(
                        g.generate(&mut rng).len(),
                        expected_len(count as usize, detail as usize, start),
                        "count {} detail {} start {}",
                        count,
                        detail,
                        start
                    );
                }
            }
        }
    }

    #[test]
    fn x_strictly_increasing_and_spans_stage() {
        for seed in 0..20 {
            let mut rng = SeededRandom::new(seed);
            let points = TerrainGenerator::new(config(3, 4, seed % 2 == 0))
                .unwrap()
                .generate(&mut rng);
            for w in points.windows(2) {
                assert!(w[0].x < w[1].x, "seed {}: {} !< {}", seed, w[0].x, w[1].x);
            }
            assert_eq!(points[0].x, 0.0);
            assert!((points[points.len() - 1].x - 600.0).abs() < 1e-9);
        }
    }

    #[test]
    fn deterministic_with_scripted_source() {
        let g = TerrainGenerator::new(config(2, 3, false)).unwrap();
        let script = vec![0.13, 0.72, 0.4, 0.99, 0.05, 0.61];
        let a = g.generate(&mut ScriptedRandom::new(script.clone()).unwrap());
        let b = g.generate(&mut ScriptedRandom::new(script).unwrap());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn deterministic_with_seed() {
        let g = TerrainGenerator::new(config(4, 4, true)).unwrap();
        assert_eq!(
            g.generate(&mut SeededRandom::new(2025)),
            g.generate(&mut SeededRandom::new(2025))
        );
    }

    #[test]
    fn explicit_peaks_bypass_layout() {
        let stage = Stage {
            width: 100.0,
            height: 300.0,
        };
        let peaks = PeaksConfig {
            detail: 1,
            ..Default::default()
        };
        // no jitter, keep sign: midpoints are exact
        let mut rng = ScriptedRandom::new(vec![0.0]).unwrap();
        let points = generate(
            &stage,
            Some(&[100.0, 50.0, 200.0]),
            &peaks,
            &ValleysConfig::default(),
            None,
            &mut rng,
        )
        .unwrap();
        let heights: Vec<f64> = points.iter().map(|p| 300.0 - p.y).collect();
        assert_eq!(heights, vec![100.0, 75.0, 50.0, 125.0, 200.0]);
        // two subdivisions, two draws each, nothing for the layout
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn empty_init_peaks_falls_back_to_layout() {
        let mut c = config(2, 0, false);
        c.init_peaks = Some(vec![]);
        let points = TerrainGenerator::new(c)
            .unwrap()
            .generate(&mut SeededRandom::new(5));
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn single_height_without_passes() {
        let mut c = config(0, 0, false);
        c.peaks.detail = 3;
        let points = TerrainGenerator::new(c)
            .unwrap()
            .generate(&mut SeededRandom::new(5));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[0].y, 250.0);
    }

    #[test]
    fn no_flats_means_no_tags() {
        let points = TerrainGenerator::new(config(3, 4, false))
            .unwrap()
            .generate(&mut SeededRandom::new(8));
        assert!(points.iter().all(|p| p.flat_name.is_none()));
    }

    #[test]
    fn plateau_on_explicit_ramp() {
        let stage = Stage {
            width: 100.0,
            height: 100.0,
        };
        let peaks = PeaksConfig {
            detail: 0,
            ..Default::default()
        };
        let flats = [FlatSpec {
            pos: 0.5,
            width: 20.0,
            align: Align::Center,
            name: "runway".to_string(),
        }];
        let points = generate(
            &stage,
            Some(&[0.0, 10.0, 20.0, 30.0, 40.0, 30.0, 20.0, 10.0, 0.0]),
            &peaks,
            &ValleysConfig { min_y: 0.0 },
            Some(&flats),
            &mut SeededRandom::new(0),
        )
        .unwrap();
        let anchor = points
            .iter()
            .position(|p| p.flat_name.as_deref() == Some("runway"))
            .unwrap();
        assert_eq!(anchor, 4);
        for p in points.iter().skip(anchor) {
            if p.x - points[anchor].x <= 20.0 {
                assert_eq!(p.y, points[anchor].y);
            }
        }
        assert_eq!(points[6].y, 80.0);
    }

    #[test]
    fn invalid_config_fails_before_drawing() {
        let mut rng = ScriptedRandom::new(vec![0.5]).unwrap();
        let peaks = PeaksConfig {
            min_y: 400.0,
            ..Default::default()
        };
        let err = generate(
            &Stage::default(),
            None,
            &peaks,
            &ValleysConfig::default(),
            None,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, TerrainError::InvalidConfig { .. }));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn oversized_detail_fails_before_drawing() {
        let mut rng = ScriptedRandom::new(vec![0.5]).unwrap();
        let peaks = PeaksConfig {
            detail: 40,
            ..Default::default()
        };
        let err = generate(
            &Stage::default(),
            None,
            &peaks,
            &ValleysConfig::default(),
            None,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TerrainError::InvalidConfig { field: "peaks.detail", .. }
        ));
        assert_eq!(rng.draws(), 0);
    }
}
