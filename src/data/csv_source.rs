use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{DataSource, TableName, Tables};
use crate::error::{PipelineError, Result};

/// Loads the source tables from a directory of `olist_*_dataset.csv` files.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    dir: PathBuf,
}

impl CsvDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Maps table keys to file paths for every CSV in the directory, in
    /// sorted file-name order.
    fn discover(&self) -> Result<HashMap<String, PathBuf>> {
        let mut paths = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut files = HashMap::new();
        for path in paths {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.insert(table_key(name), path.clone());
            }
        }

        Ok(files)
    }
}

impl DataSource for CsvDataSource {
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    fn load(&self) -> Result<Tables> {
        let files = self.discover()?;

        for key in files.keys() {
            if !TableName::ALL.iter().any(|t| t.key() == key) {
                debug!(table = %key, "Ignoring table not used by the pipeline");
            }
        }

        let tables = Tables {
            orders: read_table(&files, TableName::Orders)?,
            order_items: read_table(&files, TableName::OrderItems)?,
            order_reviews: read_table(&files, TableName::OrderReviews)?,
            customers: read_table(&files, TableName::Customers)?,
            sellers: read_table(&files, TableName::Sellers)?,
            geolocation: read_table(&files, TableName::Geolocation)?,
        };

        info!("Source tables loaded");
        Ok(tables)
    }
}

fn read_table<T: DeserializeOwned>(
    files: &HashMap<String, PathBuf>,
    table: TableName,
) -> Result<Vec<T>> {
    let path = files
        .get(table.key())
        .ok_or_else(|| PipelineError::MissingTable(table.key().to_string()))?;

    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: T = result?;
        rows.push(record);
    }

    debug!(table = table.key(), rows = rows.len(), "Table read");
    Ok(rows)
}

/// Derives a table key from a file name:
/// `olist_order_items_dataset.csv` becomes `order_items`.
pub fn table_key(file_name: &str) -> String {
    file_name
        .replace("olist_", "")
        .replace("_dataset.csv", "")
        .replace(".csv", "")
}

/// `~/.workintech/olist/data/csv`, falling back to a relative path when no
/// home directory is set.
pub fn default_data_dir() -> PathBuf {
    let relative = Path::new(".workintech").join("olist").join("data").join("csv");
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(relative),
        None => relative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_table_key_naming_convention() {
        assert_eq!(table_key("olist_order_items_dataset.csv"), "order_items");
        assert_eq!(table_key("olist_geolocation_dataset.csv"), "geolocation");
        assert_eq!(
            table_key("product_category_name_translation.csv"),
            "product_category_name_translation"
        );
    }

    #[test]
    fn test_missing_table_is_fatal() {
        let dir = temp_dir("olist_features_test_missing_table");
        fs::write(
            dir.join("olist_sellers_dataset.csv"),
            "seller_id,seller_zip_code_prefix\ns1,1000\n",
        )
        .unwrap();

        let result = CsvDataSource::new(&dir).load();
        assert!(matches!(result, Err(PipelineError::MissingTable(ref t)) if t == "orders"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unreadable_directory_is_fatal() {
        let result = CsvDataSource::new("/nonexistent/olist/csv").load();
        assert!(matches!(result, Err(PipelineError::Io(_))));
    }

    #[test]
    fn test_default_data_dir_suffix() {
        assert!(default_data_dir().ends_with(".workintech/olist/data/csv"));
    }
}
