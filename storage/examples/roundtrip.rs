use mountain_core::{MountainConfig, SeededRandom, TerrainGenerator};
use mountain_storage::RangeStore;
use mountain_storage::models::RangeDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = 2025;
    let mut config = MountainConfig::default();
    config.peaks.count = 3;
    config.peaks.detail = 6;
    let points = TerrainGenerator::new(config.clone())?.generate(&mut SeededRandom::new(seed));

    let store = RangeStore::init("mongodb://localhost:27017", "mountain_db", "ranges").await?;
    store.create(RangeDoc::new("alps", seed as i64, config, points)).await?;

    match store.read_by_seed(seed as i64).await? {
        Some(found) => println!(
            "Round-trip success: {} points, first y = {}",
            found.points.len(),
            found.points[0].y
        ),
        None => println!("Document not found!"),
    }

    store.delete_by_seed(seed as i64).await?;
    Ok(())
}
