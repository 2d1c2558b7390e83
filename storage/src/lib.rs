// storage keeps generated ranges in MongoDB

pub mod models;

use crate::models::RangeDoc;
use bson::doc;
use futures_util::stream::TryStreamExt;
use log::{debug, info};
use mongodb::{Client, Collection, IndexModel, options::ClientOptions};

pub struct RangeStore {
    col: Collection<RangeDoc>,
}

impl RangeStore {
    // Connect and make sure the (name, seed) index exists
    pub async fn init(uri: &str, db_name: &str, col_name: &str) -> mongodb::error::Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("MountainRange".to_string());
        let client = Client::with_options(opts)?;
        let col = client.database(db_name).collection(col_name);

        let index_model = IndexModel::builder()
            .keys(doc! { "name": 1, "seed": 1 })
            .build();
        col.create_index(index_model).await?;
        info!("range store ready at {}/{}", db_name, col_name);

        Ok(Self { col })
    }

    pub async fn list_names(&self) -> mongodb::error::Result<Vec<String>> {
        let mut cursor = self.col.find(doc! {}).await?;
        let mut names = Vec::new();
        while let Some(range) = cursor.try_next().await? {
            names.push(range.name);
        }
        Ok(names)
    }

    pub async fn read_by_name(&self, name: &str) -> mongodb::error::Result<Option<RangeDoc>> {
        self.col.find_one(doc! { "name": name }).await
    }

    // Store a range, replacing any earlier one with the same name and seed
    // in a single upsert
    pub async fn create(&self, range: RangeDoc) -> mongodb::error::Result<()> {
        let filter = doc! { "name": &range.name, "seed": range.seed };
        let result = self.col.replace_one(filter, &range).upsert(true).await?;
        if result.matched_count > 0 {
            debug!("replaced range '{}' (seed {})", range.name, range.seed);
        }
        Ok(())
    }

    pub async fn read_by_seed(&self, seed: i64) -> mongodb::error::Result<Option<RangeDoc>> {
        self.col.find_one(doc! { "seed": seed }).await
    }

    pub async fn delete_by_seed(&self, seed: i64) -> mongodb::error::Result<()> {
        self.col.delete_one(doc! { "seed": seed }).await?;
        Ok(())
    }
}
