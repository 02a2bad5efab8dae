use crate::error::{Result, SurfaceError};
use polars::prelude::*;
use std::path::Path;
use tracing::warn;

/// Run `op` on a dedicated rayon pool with `num_threads` workers.
///
/// `0` lets rayon pick the number of threads (usually one per core). If the
/// pool cannot be built, `op` runs on the global pool instead.
pub fn run_with_threads<F, R>(num_threads: usize, op: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
    {
        Ok(pool) => pool.install(op),
        Err(e) => {
            warn!("Failed to build thread pool, using the global pool: {e}");
            op()
        }
    }
}

/// Write a DataFrame to `file_path`, replacing its extension with the one of `file_type`.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<()> {
    let mut file = std::fs::File::create(file_path.with_extension(file_type.to_string()))?;
    let written = match file_type {
        DataFrameFileType::Csv => CsvWriter::new(&mut file).finish(df),
        DataFrameFileType::Parquet => ParquetWriter::new(&mut file).finish(df).map(|_| ()),
        DataFrameFileType::Json => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::Json)
            .finish(df),
        DataFrameFileType::NDJson => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::JsonLines)
            .finish(df),
    };
    written.map_err(|e| SurfaceError::Export(e.to_string()))
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_with_threads() {
        assert_eq!(run_with_threads(2, rayon::current_num_threads), 2);
        assert_eq!(run_with_threads(1, || 40 + 2), 42);
    }

    #[test]
    fn test_file_type_extensions() {
        assert_eq!(DataFrameFileType::Csv.to_string(), "csv");
        assert_eq!(DataFrameFileType::Parquet.to_string(), "parquet");
        assert_eq!(DataFrameFileType::NDJson.to_string(), "ndjson");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut df = df!("x" => [1.0_f64, 2.0], "atom_index" => [0_u32, 1]).unwrap();
        write_df_to_file(&mut df, &dir.path().join("table.txt"), DataFrameFileType::Csv).unwrap();

        let written = std::fs::read_to_string(dir.path().join("table.csv")).unwrap();
        assert!(written.starts_with("x,atom_index"), "{written}");
        assert_eq!(written.lines().count(), 3);
    }
}
