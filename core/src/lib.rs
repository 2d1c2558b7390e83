// core holds the silhouette pipeline, its configuration and the SVG renderer
pub mod config;
pub mod coords;
pub mod error;
pub mod flats;
pub mod generator;
pub mod peaks;
pub mod random;
pub mod render;
pub mod subdivide;

pub use config::{ConfigOverrides, MountainConfig, PeaksConfig, ValleysConfig};
pub use coords::{Point, Stage};
pub use error::TerrainError;
pub use flats::{Align, FlatSpec};
pub use generator::{TerrainGenerator, generate};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use render::{render_config_svg, render_svg};
