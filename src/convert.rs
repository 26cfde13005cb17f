//! TPC-DS and SSB generation by wrapping the standard external tools.
//!
//! Row generation for these benchmarks stays with the industry tools
//! (`dsdgen` and the SSB `dbgen`). The tool is run into a staging directory
//! under the output directory, its pipe-delimited flat files are parsed with
//! the Arrow CSV reader against the catalog schemas, and each table is
//! re-encoded as a single Parquet file. The staging directory is removed
//! afterwards unless the caller asks to keep it.

use crate::hive::TableSummary;
use crate::progress::{IncrementType, ProgressTracker};
use crate::schema::{self, Benchmark};
use crate::table_parquet_path;
use arrow::datatypes::{DataType, Schema, SchemaRef};
use arrow::error::ArrowError;
use futures::StreamExt;
use log::{debug, info, warn};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;

/// Rows per batch handed from the CSV reader to the Parquet writer.
const CSV_BATCH_ROWS: usize = 8192;

/// Field terminator used by dsdgen and dbgen output.
const DELIMITER: u8 = b'|';

pub(crate) struct ExternalJob {
    pub benchmark: Benchmark,
    pub scale_factor: f64,
    pub output_dir: PathBuf,
    pub tables: Vec<&'static str>,
    pub num_threads: usize,
    pub compression: Compression,
    pub row_group_bytes: i64,
    pub generator_bin: PathBuf,
    pub keep_staging: bool,
    pub progress: ProgressTracker,
}

pub(crate) async fn generate(job: ExternalJob) -> io::Result<Vec<TableSummary>> {
    let staging = job.output_dir.join(format!(".{}-staging", job.benchmark.name()));
    fs::create_dir_all(&staging)?;

    let result = run_and_convert(&job, &staging).await;

    // staging is removed even when the run fails
    if job.keep_staging {
        info!("keeping staging directory {}", staging.display());
    } else if let Err(e) = fs::remove_dir_all(&staging) {
        warn!("failed to remove staging directory {}: {e}", staging.display());
    }
    result
}

async fn run_and_convert(job: &ExternalJob, staging: &Path) -> io::Result<Vec<TableSummary>> {
    run_generator(job, staging).await?;

    // convert tables to Parquet in parallel
    let mut conversions = futures::stream::iter(job.tables.iter().copied().map(|table| {
        let staging = staging.to_path_buf();
        let output_dir = job.output_dir.clone();
        let benchmark = job.benchmark;
        let compression = job.compression;
        let row_group_bytes = job.row_group_bytes;
        let progress = job.progress.clone();
        tokio::task::spawn_blocking(move || -> io::Result<TableSummary> {
            let flat_path = staging.join(schema::flat_file_name(benchmark, table));
            if !flat_path.exists() {
                warn!(
                    "{} did not produce {}, skipping {table}",
                    benchmark,
                    flat_path.display()
                );
                progress.finish(table);
                return Ok(TableSummary { table, rows: 0 });
            }
            let table_schema = schema::table_schema(benchmark, table).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("no schema for {benchmark} table {table}"),
                )
            })?;
            let parquet_path = table_parquet_path(&output_dir, table)?;
            debug!("converting {} to {}", flat_path.display(), parquet_path.display());
            let rows = convert_table(
                &flat_path,
                &parquet_path,
                table_schema,
                compression,
                row_group_bytes,
                &progress,
                table,
            )?;
            progress.increment(table, IncrementType::Part);
            progress.finish(table);
            Ok(TableSummary { table, rows })
        })
    }))
    .buffered(job.num_threads);

    let mut summaries = Vec::with_capacity(job.tables.len());
    while let Some(converted) = conversions.next().await {
        summaries.push(converted.expect("conversion task panicked")?);
    }
    Ok(summaries)
}

/// Runs the external generator into the staging directory.
async fn run_generator(job: &ExternalJob, staging: &Path) -> io::Result<()> {
    let staging = staging.canonicalize()?;
    let scale = integral_scale(job.scale_factor);
    let bin_dir = job
        .generator_bin
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty());

    let mut cmd = Command::new(&job.generator_bin);
    match job.benchmark {
        Benchmark::Tpcds => {
            cmd.arg("-SCALE")
                .arg(scale.to_string())
                .arg("-DIR")
                .arg(&staging)
                .arg("-FORCE")
                .arg("Y");
            // dsdgen resolves tpcds.idx relative to its working directory
            if let Some(dir) = bin_dir {
                cmd.current_dir(dir);
            }
        }
        Benchmark::Ssb => {
            cmd.arg("-s").arg(scale.to_string()).arg("-T").arg("a").arg("-f");
            // dbgen writes its .tbl files into the working directory and
            // finds dists.dss through DSS_CONFIG
            cmd.current_dir(&staging);
            if let Some(dir) = bin_dir {
                cmd.env("DSS_CONFIG", dir);
            }
        }
        Benchmark::Tpch => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "TPC-H is generated natively",
            ))
        }
    }

    info!(
        "running {} at scale {scale} into {}",
        job.generator_bin.display(),
        staging.display()
    );
    debug!("generator command: {:?}", cmd.as_std());
    let status = cmd.status().await.map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("failed to run {}: {e}", job.generator_bin.display()),
        )
    })?;
    if !status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} exited with {status}", job.generator_bin.display()),
        ));
    }
    Ok(())
}

/// dsdgen and dbgen only accept whole-number scale factors.
fn integral_scale(scale_factor: f64) -> u64 {
    let scale = scale_factor.ceil().max(1.) as u64;
    if scale as f64 != scale_factor {
        warn!("external generators take integer scale factors; using scale {scale}");
    }
    scale
}

/// Strips one trailing field terminator per record.
///
/// Both tools terminate every record with a final `|` before the newline;
/// without stripping it the CSV reader sees an extra empty column.
pub struct StripTrailingDelimiter<R> {
    inner: R,
    delimiter: u8,
    line: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> StripTrailingDelimiter<R> {
    pub fn new(inner: R, delimiter: u8) -> Self {
        Self { inner, delimiter, line: Vec::new(), pos: 0 }
    }

    fn refill(&mut self) -> io::Result<()> {
        self.line.clear();
        self.pos = 0;
        let read = self.inner.read_until(b'\n', &mut self.line)?;
        if read == 0 {
            return Ok(()); // EOF
        }
        if self.line.ends_with(&[self.delimiter, b'\n']) {
            self.line.remove(self.line.len() - 2);
        } else if self.line.ends_with(&[self.delimiter]) {
            // final record without a newline
            self.line.pop();
        }
        Ok(())
    }
}

impl<R: BufRead> Read for StripTrailingDelimiter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.line.len() {
            self.refill()?;
            if self.line.is_empty() {
                return Ok(0);
            }
        }
        let n = buf.len().min(self.line.len() - self.pos);
        buf[..n].copy_from_slice(&self.line[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn arrow_to_io(e: ArrowError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Converts one delimited flat file to Parquet, returning the rows written.
pub fn convert_table(
    flat_path: &Path,
    parquet_path: &Path,
    schema: SchemaRef,
    compression: Compression,
    row_group_bytes: i64,
    progress: &ProgressTracker,
    table: &str,
) -> io::Result<u64> {
    let input = BufReader::new(File::open(flat_path)?);
    let input = StripTrailingDelimiter::new(input, DELIMITER);
    let reader = arrow::csv::ReaderBuilder::new(Arc::clone(&schema))
        .with_header(false)
        .with_delimiter(DELIMITER)
        .with_batch_size(CSV_BATCH_ROWS)
        .build(input)
        .map_err(arrow_to_io)?;

    let properties = WriterProperties::builder()
        .set_compression(compression)
        .set_max_row_group_size(rows_per_row_group(&schema, row_group_bytes))
        .build();
    let file = File::create(parquet_path)?;
    let mut writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(properties))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let mut rows: u64 = 0;
    for batch in reader {
        let batch = batch.map_err(arrow_to_io)?;
        rows += batch.num_rows() as u64;
        writer.write(&batch).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        progress.increment(table, IncrementType::Buffer);
    }
    writer.close().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(rows)
}

/// Row group row limit derived from the target byte size.
fn rows_per_row_group(schema: &Schema, row_group_bytes: i64) -> usize {
    let row_bytes = estimated_row_bytes(schema);
    (row_group_bytes.max(1) as u64 / row_bytes).clamp(1024, 8 * 1024 * 1024) as usize
}

/// Rough uncompressed bytes per row for a schema.
fn estimated_row_bytes(schema: &Schema) -> u64 {
    let total: u64 = schema
        .fields()
        .iter()
        .map(|field| match field.data_type() {
            DataType::Boolean | DataType::Int8 => 1,
            DataType::Int16 => 2,
            DataType::Int32 | DataType::Float32 | DataType::Date32 => 4,
            DataType::Int64 | DataType::Float64 | DataType::Date64 => 8,
            DataType::Decimal128(_, _) => 16,
            DataType::Utf8 => 24,
            _ => 16,
        })
        .sum();
    total.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array, StringArray};
    use arrow::datatypes::Field;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use std::io::Write as _;

    fn strip(input: &str) -> String {
        let mut reader =
            StripTrailingDelimiter::new(BufReader::new(input.as_bytes()), DELIMITER);
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn strips_one_trailing_delimiter_per_line() {
        assert_eq!(strip("1|a|\n2|b|\n"), "1|a\n2|b\n");
    }

    #[test]
    fn preserves_lines_without_trailing_delimiter() {
        assert_eq!(strip("1|a\n2|b\n"), "1|a\n2|b\n");
    }

    #[test]
    fn strips_final_line_without_newline() {
        assert_eq!(strip("1|a|\n2|b|"), "1|a\n2|b");
    }

    #[test]
    fn keeps_embedded_and_null_fields() {
        // only the terminator goes; an empty (NULL) last field survives
        assert_eq!(strip("1||a||\n"), "1||a|\n");
    }

    #[test]
    fn empty_input() {
        assert_eq!(strip(""), "");
    }

    #[test]
    fn integral_scales() {
        assert_eq!(integral_scale(1.0), 1);
        assert_eq!(integral_scale(100.0), 100);
        assert_eq!(integral_scale(0.1), 1);
        assert_eq!(integral_scale(1.5), 2);
    }

    #[test]
    fn row_group_rows_scale_with_schema_width() {
        let narrow = Schema::new(vec![Field::new("a", DataType::Int32, true)]);
        let wide = Schema::new(vec![
            Field::new("a", DataType::Utf8, true),
            Field::new("b", DataType::Utf8, true),
            Field::new("c", DataType::Decimal128(7, 2), true),
        ]);
        let bytes = 64 * 1024 * 1024;
        assert!(rows_per_row_group(&narrow, bytes) > rows_per_row_group(&wide, bytes));
        assert!(rows_per_row_group(&wide, 0) >= 1024);
    }

    #[test]
    fn converts_flat_file_to_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let flat = dir.path().join("supplier.tbl");
        let mut f = File::create(&flat).unwrap();
        writeln!(f, "1|Supplier#1|addr one|CITY A|NATION|REGION|11-111|").unwrap();
        writeln!(f, "2|Supplier#2||CITY B|NATION|REGION|22-222|").unwrap();
        drop(f);

        let schema = schema::table_schema(Benchmark::Ssb, "supplier").unwrap();
        let out = dir.path().join("supplier.parquet");
        let progress = ProgressTracker::new(vec![("supplier", 1)]);
        let rows = convert_table(
            &flat,
            &out,
            Arc::clone(&schema),
            Compression::SNAPPY,
            64 * 1024 * 1024,
            &progress,
            "supplier",
        )
        .unwrap();
        assert_eq!(rows, 2);

        let mut reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&out).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let batch = reader.next().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 7);

        let keys = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(keys.value(0), 1);
        assert_eq!(keys.value(1), 2);

        let names = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(names.value(0), "Supplier#1");
        assert_eq!(names.value(1), "Supplier#2");
    }
}
