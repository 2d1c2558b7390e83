use mountain_core::{Align, FlatSpec, MountainConfig, SeededRandom, TerrainGenerator};

// Print a range with two leveled areas, marking where each one starts
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config = MountainConfig::default();
    config.peaks.count = 2;
    config.flats = Some(vec![
        FlatSpec {
            pos: 0.3,
            width: 60.0,
            align: Align::Center,
            name: "lake".into(),
        },
        FlatSpec {
            pos: 0.8,
            width: 40.0,
            align: Align::Right,
            name: "road".into(),
        },
    ]);

    let points = TerrainGenerator::new(config)?.generate(&mut SeededRandom::new(7));
    for p in &points {
        match &p.flat_name {
            Some(name) => println!("{:>8.2} {:>8.2}  <- {}", p.x, p.y, name),
            None => println!("{:>8.2} {:>8.2}", p.x, p.y),
        }
    }
    Ok(())
}
