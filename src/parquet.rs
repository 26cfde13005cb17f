//! Parquet output pipeline

use crate::statistics::WriteStatistics;
use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use futures::StreamExt;
use log::debug;
use parquet::arrow::arrow_writer::{compute_leaves, ArrowColumnChunk};
use parquet::arrow::ArrowSchemaConverter;
use parquet::basic::Compression;
use parquet::errors::ParquetError;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::types::SchemaDescPtr;
use std::io;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// A source of record batches that all share one schema.
///
/// The pipeline encodes the batches of each source as a single Parquet row
/// group, so a source should yield roughly one row group's worth of rows.
pub trait BatchSource: Iterator<Item = RecordBatch> {
    fn schema(&self) -> &SchemaRef;
}

pub trait IntoSize {
    /// Convert the object into a size
    fn into_size(self) -> Result<usize, io::Error>;
}

impl IntoSize for std::fs::File {
    fn into_size(self) -> Result<usize, io::Error> {
        Ok(self.metadata()?.len() as usize)
    }
}

fn to_io(e: ParquetError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

/// Converts a set of [`BatchSource`]s into a Parquet file
///
/// Row groups are encoded on up to `num_threads` blocking tasks; a dedicated
/// blocking task appends the finished column chunks to the file so no worker
/// ever waits on IO. Returns the total number of rows written.
pub async fn write_parquet<W, I>(
    writer: W,
    sources: I,
    num_threads: usize,
    compression: Compression,
) -> Result<u64, io::Error>
where
    W: Write + Send + IntoSize + 'static,
    I: Iterator<Item: BatchSource + Send + 'static> + 'static,
{
    debug!("writing Parquet with {num_threads} threads, using {compression} compression");
    let mut sources = sources.peekable();

    // get the schema from the first source
    let Some(first) = sources.peek() else {
        return Ok(0); // no data
    };
    let schema = Arc::clone(first.schema());

    let writer_properties = Arc::new(
        WriterProperties::builder()
            .set_compression(compression)
            .build(),
    );
    let parquet_schema = Arc::new(
        ArrowSchemaConverter::new()
            .with_coerce_types(writer_properties.coerce_types())
            .convert(&schema)
            .map_err(to_io)?,
    );

    // a stream that encodes the data for each row group in parallel
    let mut row_group_stream = futures::stream::iter(sources)
        .map(|source| {
            let parquet_schema = Arc::clone(&parquet_schema);
            let writer_properties = Arc::clone(&writer_properties);
            let schema = Arc::clone(&schema);
            tokio::task::spawn_blocking(move || {
                encode_row_group(parquet_schema, writer_properties, schema, source)
            })
        })
        .buffered(num_threads);

    let statistics = WriteStatistics::new("row groups");

    // A blocking task appends each completed row group to the file.
    let root_schema = parquet_schema.root_schema_ptr();
    let writer_properties_captured = Arc::clone(&writer_properties);
    let (tx, mut rx): (
        Sender<(Vec<ArrowColumnChunk>, usize)>,
        Receiver<(Vec<ArrowColumnChunk>, usize)>,
    ) = tokio::sync::mpsc::channel(num_threads);
    let writer_task = tokio::task::spawn_blocking(move || {
        let mut writer = SerializedFileWriter::new(writer, root_schema, writer_properties_captured)
            .map_err(to_io)?;
        let mut rows: u64 = 0;

        while let Some((chunks, chunk_rows)) = rx.blocking_recv() {
            let mut row_group_writer = writer.next_row_group().map_err(to_io)?;
            for chunk in chunks {
                chunk
                    .append_to_row_group(&mut row_group_writer)
                    .map_err(to_io)?;
            }
            row_group_writer.close().map_err(to_io)?;
            statistics.increment_chunks(1);
            rows += chunk_rows as u64;
        }
        let size = writer.into_inner().map_err(to_io)?.into_size()?;
        statistics.increment_bytes(size);
        Ok(rows) as Result<u64, io::Error>
    });

    // drive the encoding stream and feed the writer task
    while let Some(encoded) = row_group_stream.next().await {
        let encoded = encoded.expect("row group task panicked")?;
        if let Err(e) = tx.send(encoded).await {
            debug!("Error sending chunks to writer: {e}");
            break; // stop early
        }
    }
    // signal the writer task that we are done
    drop(tx);

    writer_task.await?
}

/// Encodes the data of one row group
///
/// Returns the finished [`ArrowColumnChunk`]s and the number of rows encoded.
fn encode_row_group<S>(
    parquet_schema: SchemaDescPtr,
    writer_properties: Arc<WriterProperties>,
    schema: SchemaRef,
    source: S,
) -> Result<(Vec<ArrowColumnChunk>, usize), io::Error>
where
    S: BatchSource,
{
    #[allow(deprecated)]
    let mut col_writers = parquet::arrow::arrow_writer::get_column_writers(
        &parquet_schema,
        &writer_properties,
        &schema,
    )
    .map_err(to_io)?;

    let mut rows = 0;
    for batch in source {
        rows += batch.num_rows();
        let columns = batch.columns().iter();
        let col_writers = col_writers.iter_mut();
        let fields = schema.fields().iter();

        for ((col_writer, field), arr) in col_writers.zip(fields).zip(columns) {
            for leaves in compute_leaves(field.as_ref(), arr).map_err(to_io)? {
                col_writer.write(&leaves).map_err(to_io)?;
            }
        }
    }
    let chunks = col_writers
        .into_iter()
        .map(|col_writer| col_writer.close().map_err(to_io))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((chunks, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use std::fs::File;

    struct FixedSource {
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    }

    impl FixedSource {
        fn new(values: &[i64]) -> Self {
            let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, false)]));
            let batch = RecordBatch::try_new(
                Arc::clone(&schema),
                vec![Arc::new(Int64Array::from(values.to_vec()))],
            )
            .unwrap();
            Self { schema, batches: vec![batch] }
        }
    }

    impl Iterator for FixedSource {
        type Item = RecordBatch;
        fn next(&mut self) -> Option<RecordBatch> {
            self.batches.pop()
        }
    }

    impl BatchSource for FixedSource {
        fn schema(&self) -> &SchemaRef {
            &self.schema
        }
    }

    #[tokio::test]
    async fn one_row_group_per_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.parquet");
        let file = File::create(&path).unwrap();

        let sources = vec![
            FixedSource::new(&[1, 2, 3]),
            FixedSource::new(&[4, 5]),
            FixedSource::new(&[6]),
        ];
        let rows = write_parquet(file, sources.into_iter(), 2, Compression::SNAPPY)
            .await
            .unwrap();
        assert_eq!(rows, 6);

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
        assert_eq!(reader.metadata().num_row_groups(), 3);
        let read_rows: usize = reader
            .build()
            .unwrap()
            .map(|b| b.unwrap().num_rows())
            .sum();
        assert_eq!(read_rows, 6);
    }

    #[tokio::test]
    async fn empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        let file = File::create(&path).unwrap();
        let rows = write_parquet(
            file,
            std::iter::empty::<FixedSource>(),
            2,
            Compression::UNCOMPRESSED,
        )
        .await
        .unwrap();
        assert_eq!(rows, 0);
    }
}
