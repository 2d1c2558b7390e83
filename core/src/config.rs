use serde::{Deserialize, Serialize};

use crate::coords::Stage;
use crate::error::{Result, TerrainError};
use crate::flats::FlatSpec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeaksConfig {
    pub count: u32,  // major peaks
    pub detail: u32, // subdivision passes
    pub min_y: f64,
    pub max_y: f64,
    pub start_with_peak: bool,
}

impl Default for PeaksConfig {
    fn default() -> Self {
        Self {
            count: 1,
            detail: 4,
            min_y: 200.0,
            max_y: 300.0,
            start_with_peak: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValleysConfig {
    pub min_y: f64,
}

impl Default for ValleysConfig {
    fn default() -> Self {
        Self { min_y: 50.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: String,
    #[serde(rename = "stop-color")]
    pub stop_color: String,
}

// Linear gradient in SVG terms; coordinates are kept as written ("0%", "1", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
}

// Shadows use the same paint options as the main fill
pub type ShadowStyle = FillStyle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RidgeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

// Fully resolved settings for one mountain range: the defaults with a set
// of ConfigOverrides laid on top, or straight from JSON via `from_json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountainConfig {
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_peaks: Option<Vec<f64>>,
    pub peaks: PeaksConfig,
    pub valleys: ValleysConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flats: Option<Vec<FlatSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ridge: Option<RidgeStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageOverrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeaksOverrides {
    pub count: Option<u32>,
    pub detail: Option<u32>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    pub start_with_peak: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValleysOverrides {
    pub min_y: Option<f64>,
}

// Partial user settings; anything left as None keeps the base value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub stage: Option<StageOverrides>,
    pub init_peaks: Option<Vec<f64>>,
    pub peaks: Option<PeaksOverrides>,
    pub valleys: Option<ValleysOverrides>,
    pub flats: Option<Vec<FlatSpec>>,
    pub fill: Option<FillStyle>,
    pub shadow: Option<ShadowStyle>,
    pub ridge: Option<RidgeStyle>,
}

// Upper bound on the final number of points. Each subdivision pass
// roughly doubles the sequence, so this also caps `peaks.detail`.
pub const MAX_POINTS: usize = 1 << 20;

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

// Merge a nested optional record field by field, starting from the
// default record when the base has none yet
fn merge_record<T: Default>(target: &mut Option<T>, value: Option<T>, merge: impl FnOnce(&mut T, T)) {
    if let Some(v) = value {
        merge(target.get_or_insert_with(T::default), v);
    }
}

fn merge_fill(target: &mut FillStyle, value: FillStyle) {
    if value.color.is_some() {
        target.color = value.color;
    }
    // gradients are replaced whole
    if value.gradient.is_some() {
        target.gradient = value.gradient;
    }
}

fn merge_ridge(target: &mut RidgeStyle, value: RidgeStyle) {
    if value.color.is_some() {
        target.color = value.color;
    }
    if value.thickness.is_some() {
        target.thickness = value.thickness;
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TerrainError::invalid(field, format!("{value} is not a finite number")))
    }
}

impl MountainConfig {
    // Parse partial settings from JSON and lay them over the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        let mut config = Self::default();
        config.merge(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(stage) = overrides.stage {
            set(&mut self.stage.width, stage.width);
            set(&mut self.stage.height, stage.height);
        }
        if let Some(peaks) = overrides.peaks {
            set(&mut self.peaks.count, peaks.count);
            set(&mut self.peaks.detail, peaks.detail);
            set(&mut self.peaks.min_y, peaks.min_y);
            set(&mut self.peaks.max_y, peaks.max_y);
            set(&mut self.peaks.start_with_peak, peaks.start_with_peak);
        }
        if let Some(valleys) = overrides.valleys {
            set(&mut self.valleys.min_y, valleys.min_y);
        }

        // arrays replace the base wholesale
        if overrides.init_peaks.is_some() {
            self.init_peaks = overrides.init_peaks;
        }
        if overrides.flats.is_some() {
            self.flats = overrides.flats;
        }

        merge_record(&mut self.fill, overrides.fill, merge_fill);
        merge_record(&mut self.shadow, overrides.shadow, merge_fill);
        merge_record(&mut self.ridge, overrides.ridge, merge_ridge);
    }

    pub fn merged(mut self, overrides: ConfigOverrides) -> Self {
        self.merge(overrides);
        self
    }

    // Final sequence length, or an error naming the field that pushes it
    // past MAX_POINTS. Stops early so huge pass counts cost nothing.
    pub fn point_count(&self) -> Result<usize> {
        let too_many = |field: &'static str| {
            TerrainError::invalid(field, format!("would produce more than {MAX_POINTS} points"))
        };

        let mut len = match self.init_peaks.as_deref() {
            Some(init) if !init.is_empty() => {
                if init.len() > MAX_POINTS {
                    return Err(too_many("initPeaks"));
                }
                init.len()
            }
            _ => {
                let ends = if self.peaks.start_with_peak { 3 } else { 1 };
                (self.peaks.count as usize)
                    .checked_mul(2)
                    .and_then(|n| n.checked_add(ends))
                    .filter(|&n| n <= MAX_POINTS)
                    .ok_or_else(|| too_many("peaks.count"))?
            }
        };

        for _ in 0..self.peaks.detail {
            if len < 2 {
                break;
            }
            len = len
                .checked_mul(2)
                .map(|n| n - 1)
                .filter(|&n| n <= MAX_POINTS)
                .ok_or_else(|| too_many("peaks.detail"))?;
        }
        Ok(len)
    }

    fn check_point_count(&self) -> Result<()> {
        self.point_count().map(|_| ())
    }

    // Reject settings the generator cannot honour. Runs before any
    // random draw so a bad config never produces partial output.
    pub fn validate(&self) -> Result<()> {
        check_finite("stage.width", self.stage.width)?;
        check_finite("stage.height", self.stage.height)?;
        if self.stage.width <= 0.0 {
            return Err(TerrainError::invalid("stage.width", "must be greater than zero"));
        }
        if self.stage.height < 0.0 {
            return Err(TerrainError::invalid("stage.height", "must not be negative"));
        }

        check_finite("peaks.minY", self.peaks.min_y)?;
        check_finite("peaks.maxY", self.peaks.max_y)?;
        check_finite("valleys.minY", self.valleys.min_y)?;
        if self.peaks.min_y > self.peaks.max_y {
            return Err(TerrainError::invalid(
                "peaks.minY",
                format!("{} is above peaks.maxY {}", self.peaks.min_y, self.peaks.max_y),
            ));
        }
        if self.valleys.min_y > self.peaks.min_y {
            return Err(TerrainError::invalid(
                "valleys.minY",
                format!("{} is above peaks.minY {}", self.valleys.min_y, self.peaks.min_y),
            ));
        }

        if let Some(init) = &self.init_peaks {
            for &h in init {
                check_finite("initPeaks", h)?;
            }
        }
        self.check_point_count()?;
        for flat in self.flats.iter().flatten() {
            check_finite("flats.pos", flat.pos)?;
            check_finite("flats.width", flat.width)?;
        }
        if let Some(t) = self.ridge.as_ref().and_then(|r| r.thickness) {
            check_finite("ridge.thickness", t)?;
        }
        Ok(())
    }
}
