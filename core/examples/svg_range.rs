use mountain_core::{MountainConfig, SeededRandom, TerrainGenerator, render_config_svg};
use std::path::Path;

// Generate a styled range from JSON settings and write it as SVG
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = MountainConfig::from_json(
        r##"{
            "stage": { "width": 800, "height": 300 },
            "peaks": { "count": 3, "detail": 5, "minY": 180, "maxY": 280 },
            "valleys": { "minY": 40 },
            "fill": { "gradient": { "x1": "0", "y1": "0", "x2": "0", "y2": "1",
                "stops": [ { "offset": "0%", "stop-color": "#5b6b7f" },
                           { "offset": "100%", "stop-color": "#1f2a38" } ] } },
            "shadow": { "color": "rgba(0,0,0,0.25)" },
            "ridge": { "color": "#e8eef5", "thickness": 1.5 }
        }"##,
    )?;

    let seed = 2025;
    let mut rng = SeededRandom::new(seed);
    let points = TerrainGenerator::new(config.clone())?.generate(&mut rng);
    let svg = render_config_svg(&config, &points, &mut rng);

    let path = Path::new("mountain_range.svg");
    std::fs::write(path, svg)?;
    println!("Saved {} points (seed {}) to {:?}", points.len(), seed, path);
    Ok(())
}
