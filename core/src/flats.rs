use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::coords::Point;

// Which edge of the plateau `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

// Request to level a band of the range, e.g. a road or a lake.
// `pos` is a fraction of the range's horizontal extent, `width` is in
// canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatSpec {
    pub pos: f64,
    pub width: f64,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub name: String,
}

// Level one plateau in place. The first point strictly right of the
// aligned start becomes the anchor and gets the plateau's name; every later
// point within `width` of it takes the anchor's y.
// Returns the anchor index, or None when the plateau starts past the end.
pub fn level_area(points: &mut [Point], flat: &FlatSpec) -> Option<usize> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.x, last.x),
        _ => return None,
    };
    let span = last - first;

    let mut desired_x = (span * flat.pos).floor();
    match flat.align {
        Align::Left => {}
        Align::Center => desired_x -= (flat.width / 2.0).floor(),
        Align::Right => desired_x -= flat.width,
    }

    let mut anchor: Option<(usize, f64, f64)> = None;
    for (i, point) in points.iter_mut().enumerate() {
        match anchor {
            None if point.x > desired_x => {
                point.flat_name = Some(flat.name.clone());
                anchor = Some((i, point.x, point.y));
            }
            Some((_, ax, ay)) if point.x - ax <= flat.width => point.y = ay,
            Some(_) => break,
            None => {}
        }
    }

    anchor.map(|(i, _, _)| i)
}

// Apply every plateau in order; a later plateau wins where two overlap
pub fn define_flats(points: &mut [Point], flats: &[FlatSpec]) {
    for flat in flats {
        match level_area(points, flat) {
            Some(index) => debug!("flat '{}' anchored at point {}", flat.name, index),
            None => warn!(
                "flat '{}' at pos {} starts beyond the last point, nothing leveled",
                flat.name, flat.pos
            ),
        }
    }
}
