//! Native TPC-H table generation.
//!
//! TPC-H is the one benchmark with a first-class Rust generator, so it never
//! shells out: each table is produced by `tpchgen` and converted to Arrow
//! batches by `tpchgen-arrow`. Tables are split into parts sized from the
//! target row group bytes, and the parts are encoded in parallel by the
//! pipeline in [`crate::parquet`].

use crate::hive::TableSummary;
use crate::parquet::{write_parquet, BatchSource};
use crate::progress::{IncrementType, ProgressTracker};
use crate::table_parquet_path;
use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use log::debug;
use parquet::basic::Compression;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tpchgen::generators::{
    CustomerGenerator, LineItemGenerator, NationGenerator, OrderGenerator, PartGenerator,
    PartSuppGenerator, RegionGenerator, SupplierGenerator,
};
use tpchgen_arrow::{
    CustomerArrow, LineItemArrow, NationArrow, OrderArrow, PartArrow, PartSuppArrow,
    RecordBatchIterator, RegionArrow, SupplierArrow,
};

/// Rows generated per batch within a part.
const BATCH_ROWS: usize = 8 * 1024;

/// Parquet files are limited to 32k row groups.
const MAX_PARTS: i64 = 32_000;

pub(crate) struct NativeJob {
    pub scale_factor: f64,
    pub output_dir: PathBuf,
    pub tables: Vec<&'static str>,
    pub num_threads: usize,
    pub compression: Compression,
    pub row_group_bytes: i64,
    pub progress: ProgressTracker,
}

/// Approximate row count of a table at a scale factor, for part planning.
fn estimated_rows(table: &str, scale_factor: f64) -> f64 {
    match table {
        "region" => 5.,
        "nation" => 25.,
        "supplier" => 10_000. * scale_factor,
        "customer" => 150_000. * scale_factor,
        "part" => 200_000. * scale_factor,
        "partsupp" => 800_000. * scale_factor,
        "orders" => 1_500_000. * scale_factor,
        "lineitem" => 6_000_000. * scale_factor,
        _ => 0.,
    }
}

/// Rough uncompressed bytes per row, for part planning.
fn row_bytes(table: &str) -> f64 {
    match table {
        "region" | "nation" => 110.,
        "supplier" => 140.,
        "customer" => 160.,
        "part" => 120.,
        "partsupp" => 145.,
        "orders" => 110.,
        "lineitem" => 130.,
        _ => 128.,
    }
}

/// Number of parts (row groups) a table is split into.
pub(crate) fn part_count(table: &str, scale_factor: f64, row_group_bytes: i64) -> i32 {
    let total_bytes = estimated_rows(table, scale_factor) * row_bytes(table);
    let parts = (total_bytes / row_group_bytes.max(1) as f64).ceil() as i64;
    parts.clamp(1, MAX_PARTS) as i32
}

/// A part of a table, reporting progress as it is consumed.
struct Part<T> {
    inner: T,
    progress: ProgressTracker,
    table: &'static str,
    finished: bool,
}

impl<T> Part<T> {
    fn new(inner: T, progress: ProgressTracker, table: &'static str) -> Self {
        Self { inner, progress, table, finished: false }
    }
}

impl<T: RecordBatchIterator> Iterator for Part<T> {
    type Item = RecordBatch;

    fn next(&mut self) -> Option<RecordBatch> {
        match self.inner.next() {
            Some(batch) => {
                self.progress.increment(self.table, IncrementType::Buffer);
                Some(batch)
            }
            None => {
                if !self.finished {
                    self.finished = true;
                    self.progress.increment(self.table, IncrementType::Part);
                }
                None
            }
        }
    }
}

impl<T: RecordBatchIterator> BatchSource for Part<T> {
    fn schema(&self) -> &SchemaRef {
        self.inner.schema()
    }
}

pub(crate) async fn generate(job: NativeJob) -> io::Result<Vec<TableSummary>> {
    let NativeJob {
        scale_factor,
        output_dir,
        tables,
        num_threads,
        compression,
        row_group_bytes,
        progress,
    } = job;

    let mut summaries = Vec::with_capacity(tables.len());
    for table in tables {
        let parts = part_count(table, scale_factor, row_group_bytes);
        let path = table_parquet_path(&output_dir, table)?;
        let file = File::create(&path)?;
        debug!("generating {table} in {parts} parts to {}", path.display());

        let rows = match table {
            "region" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        RegionArrow::new(RegionGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            "nation" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        NationArrow::new(NationGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            "supplier" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        SupplierArrow::new(SupplierGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            "customer" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        CustomerArrow::new(CustomerGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            "part" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        PartArrow::new(PartGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            "partsupp" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        PartSuppArrow::new(PartSuppGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            "orders" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        OrderArrow::new(OrderGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            "lineitem" => {
                write_split(file, num_threads, compression, parts, progress.clone(), table,
                    move |part, parts| {
                        LineItemArrow::new(LineItemGenerator::new(scale_factor, part, parts))
                            .with_batch_size(BATCH_ROWS)
                    })
                .await?
            }
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown TPC-H table: {other}"),
                ))
            }
        };
        progress.finish(table);
        summaries.push(TableSummary { table, rows });
    }
    Ok(summaries)
}

/// Writes one table split into `parts` row groups built by `make_part`.
async fn write_split<T, F>(
    file: File,
    num_threads: usize,
    compression: Compression,
    parts: i32,
    progress: ProgressTracker,
    table: &'static str,
    make_part: F,
) -> io::Result<u64>
where
    T: RecordBatchIterator + Send + 'static,
    F: Fn(i32, i32) -> T + 'static,
{
    let sources =
        (1..=parts).map(move |part| Part::new(make_part(part, parts), progress.clone(), table));
    write_parquet(file, sources, num_threads, compression).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_tables_get_one_part() {
        assert_eq!(part_count("region", 1000., 64 * 1024 * 1024), 1);
        assert_eq!(part_count("nation", 1000., 64 * 1024 * 1024), 1);
    }

    #[test]
    fn lineitem_splits_at_scale() {
        let small = part_count("lineitem", 1., 64 * 1024 * 1024);
        let large = part_count("lineitem", 100., 64 * 1024 * 1024);
        assert!(small >= 1);
        assert!(large > small);
    }

    #[test]
    fn part_count_is_capped() {
        assert_eq!(part_count("lineitem", 1e9, 1024), MAX_PARTS as i32);
    }

    #[test]
    fn part_count_survives_zero_row_group_bytes() {
        assert!(part_count("orders", 1., 0) >= 1);
    }
}
