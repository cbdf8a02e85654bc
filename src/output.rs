//! Output formatting and persistence for the training table.
//!
//! Supports JSON logging and CSV export.

use anyhow::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use tracing::{debug, info};

use crate::frame::FeatureFrame;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes the frame as CSV, replacing any existing file. With `gzip` the
/// stream is gzip-compressed.
pub fn write_csv(path: &Path, frame: &FeatureFrame, gzip: bool) -> Result<()> {
    debug!(path = %path.display(), gzip, rows = frame.len(), "Writing training table");

    let file = BufWriter::new(File::create(path)?);

    if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        frame.write_csv(&mut encoder)?;
        encoder.finish()?.flush()?;
    } else {
        let mut file = file;
        frame.write_csv(&mut file)?;
        file.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;
    use flate2::read::GzDecoder;
    use std::env;
    use std::fs;
    use std::io::Read;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("{}_{}", std::process::id(), name))
    }

    fn frame() -> FeatureFrame {
        FeatureFrame::new(vec!["o1".to_string(), "o2".to_string()])
            .with_column("price", Column::Float(vec![Some(10.5), Some(3.0)]))
            .unwrap()
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&crate::stats::FrameSummary::from_frame(&frame())).unwrap();
    }

    #[test]
    fn test_write_csv_plain() {
        let path = temp_path("olist_features_test_plain.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &frame(), false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["order_id,price", "o1,10.5", "o2,3"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_overwrites() {
        let path = temp_path("olist_features_test_overwrite.csv");
        write_csv(&path, &frame(), false).unwrap();
        write_csv(&path, &frame(), false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_gzip() {
        let path = temp_path("olist_features_test.csv.gz");
        let _ = fs::remove_file(&path);

        write_csv(&path, &frame(), true).unwrap();

        let mut decoded = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert!(decoded.starts_with("order_id,price\n"));

        fs::remove_file(&path).unwrap();
    }
}
