//! End-to-end generation of the small fixed TPC-H tables.

use benchgen::{schema::Benchmark, DatasetGenerator};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::{self, File};

#[tokio::test]
async fn generates_parquet_ddl_and_load_script() {
    let dir = tempfile::tempdir().unwrap();

    DatasetGenerator::builder(Benchmark::Tpch)
        .with_scale_factor(0.01)
        .with_output_dir(dir.path())
        .with_tables(vec!["region".to_string(), "nation".to_string()])
        .with_num_threads(2)
        .build()
        .generate()
        .await
        .unwrap();

    // nation and region are fixed-size tables at every scale factor
    let nation = dir.path().join("parquet/nation/nation.parquet");
    let region = dir.path().join("parquet/region/region.parquet");
    assert!(nation.is_file());
    assert!(region.is_file());

    let rows: usize = ParquetRecordBatchReaderBuilder::try_new(File::open(&nation).unwrap())
        .unwrap()
        .build()
        .unwrap()
        .map(|batch| batch.unwrap().num_rows())
        .sum();
    assert_eq!(rows, 25);

    let hql = fs::read_to_string(dir.path().join("tpch_sf0_01_hive.hql")).unwrap();
    assert!(hql.contains("CREATE DATABASE IF NOT EXISTS tpch_sf0_01;"));
    assert!(hql.contains("-- Table: nation (25 rows)"));
    assert!(hql.contains("-- Table: region (5 rows)"));
    assert!(hql.contains("CREATE TABLE IF NOT EXISTS nation"));
    assert!(hql.contains("STORED AS PARQUET;"));

    let script = fs::read_to_string(dir.path().join("load_tpch_data.sh")).unwrap();
    assert!(script.starts_with("#!/bin/bash\n"));
    assert!(script.contains("hive -f \"$TPCH_DATA_DIR/tpch_sf0_01_hive.hql\""));
}

#[tokio::test]
async fn rejects_unknown_table_before_generating() {
    let dir = tempfile::tempdir().unwrap();

    let err = DatasetGenerator::builder(Benchmark::Tpch)
        .with_output_dir(dir.path())
        .with_tables(vec!["store_sales".to_string()])
        .build()
        .generate()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert!(!dir.path().join("parquet").exists());
}
