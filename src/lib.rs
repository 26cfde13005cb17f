//! Benchmark dataset generation for Hive-compatible data warehouses.
//!
//! [`DatasetGenerator`] produces TPC-H, TPC-DS, or SSB data at a requested
//! scale factor as one Parquet file per table, laid out under
//! `<output_dir>/parquet/<table>/<table>.parquet`, together with the Hive DDL
//! file and the executable load script that bring the data into a warehouse.
//!
//! TPC-H is generated natively with the `tpchgen` crates; TPC-DS and SSB wrap
//! the standard external generator tools and convert their flat-file output.
//!
//! ```no_run
//! use benchgen::{schema::Benchmark, DatasetGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> std::io::Result<()> {
//! DatasetGenerator::builder(Benchmark::Tpch)
//!     .with_scale_factor(1.0)
//!     .with_output_dir("tpch")
//!     .build()
//!     .generate()
//!     .await
//! # }
//! ```

mod convert;
pub mod hive;
mod parquet;
mod progress;
pub mod schema;
mod statistics;
mod tpch;

pub use hive::TableSummary;
pub use progress::{IncrementType, ProgressTracker};

use crate::schema::Benchmark;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

/// Default target size of a Parquet row group, in bytes.
pub const DEFAULT_PARQUET_ROW_GROUP_BYTES: i64 = 64 * 1024 * 1024;

/// Parquet block compression, parsed from strings like `SNAPPY` or `ZSTD(1)`.
// `::parquet` paths: the dependency shares its name with our parquet module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compression(::parquet::basic::Compression);

impl Compression {
    pub const SNAPPY: Compression = Compression(::parquet::basic::Compression::SNAPPY);

    fn inner(&self) -> ::parquet::basic::Compression {
        self.0
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ::parquet::basic::Compression::from_str(s)
            .map(Compression)
            .map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates one benchmark dataset plus its Hive artifacts.
///
/// Construct with [`DatasetGenerator::builder`].
#[derive(Debug)]
pub struct DatasetGenerator {
    benchmark: Benchmark,
    scale_factor: f64,
    output_dir: PathBuf,
    tables: Option<Vec<String>>,
    num_threads: usize,
    compression: Compression,
    row_group_bytes: i64,
    external_location: Option<String>,
    generator_bin: Option<PathBuf>,
    keep_staging: bool,
}

#[derive(Debug)]
pub struct DatasetGeneratorBuilder {
    inner: DatasetGenerator,
}

impl DatasetGeneratorBuilder {
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.inner.scale_factor = scale_factor;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.inner.output_dir = output_dir.into();
        self
    }

    /// Restrict generation to a subset of the benchmark's tables.
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.inner.tables = Some(tables);
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.inner.num_threads = num_threads.max(1);
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.inner.compression = compression;
        self
    }

    pub fn with_row_group_bytes(mut self, row_group_bytes: i64) -> Self {
        self.inner.row_group_bytes = row_group_bytes;
        self
    }

    /// Emit EXTERNAL tables rooted at this URI instead of managed tables.
    pub fn with_external_location(mut self, location: impl Into<String>) -> Self {
        self.inner.external_location = Some(location.into());
        self
    }

    /// Path to the external generator executable (`dsdgen` for TPC-DS, the
    /// SSB `dbgen` for SSB). Defaults to looking the tool up on `PATH`.
    pub fn with_generator_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.inner.generator_bin = Some(bin.into());
        self
    }

    /// Keep the staging directory holding the raw external generator output.
    pub fn with_keep_staging(mut self, keep_staging: bool) -> Self {
        self.inner.keep_staging = keep_staging;
        self
    }

    pub fn build(self) -> DatasetGenerator {
        self.inner
    }
}

impl DatasetGenerator {
    pub fn builder(benchmark: Benchmark) -> DatasetGeneratorBuilder {
        DatasetGeneratorBuilder {
            inner: DatasetGenerator {
                benchmark,
                scale_factor: 1.,
                output_dir: PathBuf::from(benchmark.name()),
                tables: None,
                num_threads: num_cpus::get(),
                compression: Compression::SNAPPY,
                row_group_bytes: DEFAULT_PARQUET_ROW_GROUP_BYTES,
                external_location: None,
                generator_bin: None,
                keep_staging: false,
            },
        }
    }

    /// Runs the generation end to end: data, DDL, and load script.
    pub async fn generate(self) -> io::Result<()> {
        let start = Instant::now();
        let tables = resolve_tables(self.benchmark, self.tables.as_deref())?;
        fs::create_dir_all(&self.output_dir)?;
        info!(
            "generating {} SF{} into {}",
            self.benchmark.display_name(),
            self.scale_factor,
            self.output_dir.display()
        );

        let progress = ProgressTracker::new(
            tables
                .iter()
                .map(|&table| (table, self.planned_parts(table)))
                .collect(),
        );

        let summaries = match self.benchmark {
            Benchmark::Tpch => {
                tpch::generate(tpch::NativeJob {
                    scale_factor: self.scale_factor,
                    output_dir: self.output_dir.clone(),
                    tables,
                    num_threads: self.num_threads,
                    compression: self.compression.inner(),
                    row_group_bytes: self.row_group_bytes,
                    progress,
                })
                .await?
            }
            Benchmark::Tpcds | Benchmark::Ssb => {
                convert::generate(convert::ExternalJob {
                    benchmark: self.benchmark,
                    scale_factor: self.scale_factor,
                    output_dir: self.output_dir.clone(),
                    tables,
                    num_threads: self.num_threads,
                    compression: self.compression.inner(),
                    row_group_bytes: self.row_group_bytes,
                    generator_bin: self.generator_bin.clone().unwrap_or_else(|| {
                        PathBuf::from(default_generator_bin(self.benchmark))
                    }),
                    keep_staging: self.keep_staging,
                    progress,
                })
                .await?
            }
        };

        let ddl_path = hive::write_ddl_file(
            &self.output_dir,
            self.benchmark,
            self.scale_factor,
            &summaries,
            self.external_location.as_deref(),
        )?;
        let script_path = hive::write_load_script(
            &self.output_dir,
            self.benchmark,
            self.scale_factor,
            self.external_location.as_deref(),
        )?;

        let total_rows: u64 = summaries.iter().map(|s| s.rows).sum();
        info!(
            "wrote {total_rows} rows across {} tables in {:.2?}",
            summaries.len(),
            start.elapsed()
        );
        info!("Parquet files: {}", self.output_dir.join("parquet").display());
        info!("Hive DDL file: {}", ddl_path.display());
        info!(
            "load script: {} (usage: {} <data-dir>)",
            script_path.display(),
            script_path.display()
        );
        Ok(())
    }

    fn planned_parts(&self, table: &'static str) -> usize {
        match self.benchmark {
            Benchmark::Tpch => {
                tpch::part_count(table, self.scale_factor, self.row_group_bytes) as usize
            }
            // external tables are converted as a single unit
            Benchmark::Tpcds | Benchmark::Ssb => 1,
        }
    }
}

fn default_generator_bin(benchmark: Benchmark) -> &'static str {
    match benchmark {
        Benchmark::Tpcds => "dsdgen",
        Benchmark::Ssb => "dbgen",
        Benchmark::Tpch => unreachable!("TPC-H is generated natively"),
    }
}

/// Validates a requested table subset against the benchmark catalog.
fn resolve_tables(
    benchmark: Benchmark,
    requested: Option<&[String]>,
) -> io::Result<Vec<&'static str>> {
    let Some(requested) = requested else {
        return Ok(benchmark.tables().to_vec());
    };
    requested
        .iter()
        .map(|name| {
            let lowered = name.to_ascii_lowercase();
            benchmark
                .tables()
                .iter()
                .copied()
                .find(|&table| table == lowered)
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!(
                            "unknown {} table: {name} (expected one of: {})",
                            benchmark,
                            benchmark.tables().join(", ")
                        ),
                    )
                })
        })
        .collect()
}

/// Parquet output path for a table, creating its directory.
pub(crate) fn table_parquet_path(output_dir: &Path, table: &str) -> io::Result<PathBuf> {
    let table_dir = output_dir.join("parquet").join(table);
    fs::create_dir_all(&table_dir)?;
    Ok(table_dir.join(format!("{table}.parquet")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_parses_common_codecs() {
        assert_eq!(Compression::from_str("SNAPPY").unwrap(), Compression::SNAPPY);
        assert!(Compression::from_str("UNCOMPRESSED").is_ok());
        assert!(Compression::from_str("ZSTD(1)").is_ok());
        assert!(Compression::from_str("not-a-codec").is_err());
    }

    #[test]
    fn resolve_defaults_to_all_tables() {
        let tables = resolve_tables(Benchmark::Tpch, None).unwrap();
        assert_eq!(tables, Benchmark::Tpch.tables());
    }

    #[test]
    fn resolve_accepts_case_insensitive_subset() {
        let requested = vec!["LINEITEM".to_string(), "orders".to_string()];
        let tables = resolve_tables(Benchmark::Tpch, Some(&requested)).unwrap();
        assert_eq!(tables, vec!["lineitem", "orders"]);
    }

    #[test]
    fn resolve_rejects_unknown_table() {
        let requested = vec!["store_sales".to_string()];
        let err = resolve_tables(Benchmark::Tpch, Some(&requested)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("store_sales"));
    }

    #[test]
    fn parquet_paths_follow_the_hive_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_parquet_path(dir.path(), "nation").unwrap();
        assert!(path.ends_with("parquet/nation/nation.parquet"));
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn builder_defaults() {
        let generator = DatasetGenerator::builder(Benchmark::Tpcds).build();
        assert_eq!(generator.scale_factor, 1.);
        assert_eq!(generator.output_dir, PathBuf::from("tpcds"));
        assert_eq!(generator.row_group_bytes, DEFAULT_PARQUET_ROW_GROUP_BYTES);
        assert!(generator.tables.is_none());
        assert!(!generator.keep_staging);
    }
}
