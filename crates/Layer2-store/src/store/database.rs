//! Whole-listings operations: export, import, clear, stats

use super::LocalRecordStore;
use crate::coerce;
use crate::model::{DatabaseStats, Envelope, House, ListingsEnvelope};
use maison_foundation::{time, Error, KeyValueStorage, Result, LISTINGS_KEY};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{info, warn};

/// Export artifact: suggested file name plus 2-space indented JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseExport {
    pub file_name: String,
    pub contents: String,
}

impl<S: KeyValueStorage> LocalRecordStore<S> {
    // ========================================================================
    // Export
    // ========================================================================

    /// Serialize the listings envelope as `<prefix>-YYYY-MM-DD.json`
    pub fn export_database(&self) -> Result<DatabaseExport> {
        let envelope = self.load::<ListingsEnvelope>()?;
        let contents = serde_json::to_string_pretty(&envelope)?;

        Ok(DatabaseExport {
            file_name: format!("{}-{}.json", self.export_prefix, time::today()),
            contents,
        })
    }

    /// Write the export artifact into `dir` and return its path
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let export = self.export_database()?;
        let dir = dir.as_ref();

        std::fs::create_dir_all(dir)?;
        let path = dir.join(&export.file_name);
        std::fs::write(&path, &export.contents)?;

        info!("Exported listings to {}", path.display());
        Ok(path)
    }

    // ========================================================================
    // Import
    // ========================================================================

    /// Read an exported envelope from `reader` and append its listings.
    ///
    /// Imported listings go after the existing ones as-is: ids are neither
    /// checked nor renumbered, and `lastId` becomes the larger of the two
    /// stored counters. Items that are not objects are skipped. Fails with
    /// [`Error::InvalidFormat`] unless the text is a JSON object with a
    /// `houses` array; on failure nothing is written.
    pub async fn import_database<R>(&self, mut reader: R) -> Result<ListingsEnvelope>
    where
        R: AsyncRead + Unpin,
    {
        let mut contents = String::new();
        reader.read_to_string(&mut contents).await?;
        self.merge_import(&contents)
    }

    /// [`import_database`](Self::import_database) from a file on disk
    pub async fn import_database_file(&self, path: impl AsRef<Path>) -> Result<ListingsEnvelope> {
        let file = tokio::fs::File::open(path.as_ref()).await?;
        self.import_database(file).await
    }

    /// Synchronous merge step of an import
    pub fn merge_import(&self, contents: &str) -> Result<ListingsEnvelope> {
        let imported = parse_import(contents)?;
        let current: ListingsEnvelope = self.read_slot(ListingsEnvelope::SLOT)?.unwrap_or_default();

        let imported_count = imported.houses.len();
        let now = time::now_iso();

        let mut houses = current.houses;
        houses.extend(imported.houses);

        let merged = ListingsEnvelope {
            houses,
            last_id: current.last_id.max(imported.last_id),
            created_at: current.created_at.or_else(|| Some(now.clone())),
            updated_at: Some(now),
        };
        self.save(&merged)?;

        info!(
            "Imported {} houses ({} total, lastId {})",
            imported_count,
            merged.houses.len(),
            merged.last_id
        );
        Ok(merged)
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop every listing and reset the counter. Users and session stay.
    pub fn clear_database(&self) -> Result<()> {
        self.storage.remove(LISTINGS_KEY)?;
        self.init_slot::<ListingsEnvelope>()?;
        info!("Cleared listings");
        Ok(())
    }

    pub fn get_database_stats(&self) -> Result<DatabaseStats> {
        Ok(self.load::<ListingsEnvelope>()?.stats())
    }
}

struct ImportedListings {
    houses: Vec<House>,
    last_id: i64,
}

fn parse_import(contents: &str) -> Result<ImportedListings> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| Error::InvalidFormat(format!("not valid JSON: {}", e)))?;

    let Some(Value::Array(items)) = value.get("houses") else {
        return Err(Error::InvalidFormat("missing \"houses\" array".to_string()));
    };

    let houses = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(fields) => Some(House::from(fields.clone())),
            other => {
                warn!("Skipping imported house #{}: not an object ({})", i, other);
                None
            }
        })
        .collect();

    let last_id = value.get("lastId").and_then(coerce::int_of).unwrap_or(0);

    Ok(ImportedListings { houses, last_id })
}
