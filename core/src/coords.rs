use serde::{Deserialize, Serialize};

// Target canvas. x runs over [0, width], y is flipped so that
// canvas_y = height - terrain_height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
        }
    }
}

// One vertex of the silhouette in canvas space (y grows downwards).
// `flat_name` is set only on the first point of a leveled plateau.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_name: Option<String>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            flat_name: None,
        }
    }
}

// Spread the heights evenly across the stage width and flip them into
// canvas orientation. A lone height sits at x = 0.
pub fn map_to_stage(stage: &Stage, heights: &[f64]) -> Vec<Point> {
    let x_inc = if heights.len() > 1 {
        stage.width / (heights.len() - 1) as f64
    } else {
        0.0
    };

    heights
        .iter()
        .enumerate()
        .map(|(i, &h)| Point::new(x_inc * i as f64, stage.height - h))
        .collect()
}
