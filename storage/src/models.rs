use bson::oid::ObjectId;
use mountain_core::{MountainConfig, Point};
use serde::{Deserialize, Serialize};

// One saved range: the merged settings, the seed that drove generation
// and the resulting points, so it can be redrawn or regenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub seed: i64,
    pub config: MountainConfig,
    pub points: Vec<Point>,
}

impl RangeDoc {
    pub fn new(name: impl Into<String>, seed: i64, config: MountainConfig, points: Vec<Point>) -> Self {
        Self {
            id: None,
            name: name.into(),
            seed,
            config,
            points,
        }
    }

    // Names of the plateaus present in the stored points, left to right
    pub fn flat_names(&self) -> Vec<&str> {
        self.points
            .iter()
            .filter_map(|p| p.flat_name.as_deref())
            .collect()
    }
}
