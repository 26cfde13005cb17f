//! Hive DDL and load-script emission.
//!
//! Each run produces two warehouse-facing artifacts next to the Parquet
//! files: a `.hql` file that creates the database and one `STORED AS PARQUET`
//! table per relation, and an executable `load_<bench>_data.sh` script that
//! takes the data directory as its only argument and pushes every table into
//! Hive through HDFS.

use crate::schema::{self, Benchmark};
use arrow::datatypes::DataType;
use chrono::Local;
use log::debug;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Per-table result of a generation run, consumed by the DDL writer.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub table: &'static str,
    pub rows: u64,
}

/// Maps an Arrow type to the Hive type used in generated DDL.
///
/// Unknown types fall back to STRING, mirroring how permissive warehouse
/// loaders treat unrecognized source types.
pub fn hive_type(data_type: &DataType) -> String {
    match data_type {
        DataType::Boolean => "BOOLEAN".to_string(),
        DataType::Int8 => "TINYINT".to_string(),
        DataType::Int16 => "SMALLINT".to_string(),
        DataType::Int32 => "INT".to_string(),
        DataType::Int64 => "BIGINT".to_string(),
        DataType::Float32 => "FLOAT".to_string(),
        DataType::Float64 => "DOUBLE".to_string(),
        DataType::Decimal128(precision, scale) => format!("DECIMAL({precision},{scale})"),
        DataType::Date32 | DataType::Date64 => "DATE".to_string(),
        DataType::Timestamp(_, _) => "TIMESTAMP".to_string(),
        DataType::Binary | DataType::LargeBinary => "BINARY".to_string(),
        _ => "STRING".to_string(),
    }
}

/// Renders the CREATE TABLE statement for one relation.
///
/// With an external location the table is declared EXTERNAL and pointed at
/// `<location>/<table>`; otherwise it is a managed table that the load script
/// fills with `LOAD DATA INPATH`.
pub fn create_table_ddl(
    table: &str,
    schema: &arrow::datatypes::Schema,
    external_location: Option<&str>,
) -> String {
    let table_kind = if external_location.is_some() {
        "CREATE EXTERNAL TABLE"
    } else {
        "CREATE TABLE"
    };
    let columns = schema
        .fields()
        .iter()
        .map(|field| format!("  {} {}", field.name(), hive_type(field.data_type())))
        .collect::<Vec<_>>()
        .join(",\n");

    let mut ddl = format!("{table_kind} IF NOT EXISTS {table} (\n{columns}\n)\nSTORED AS PARQUET");
    if let Some(location) = external_location {
        let location = location.trim_end_matches('/');
        write!(ddl, "\nLOCATION '{location}/{table}'").expect("writing to a String cannot fail");
    }
    ddl.push(';');
    ddl
}

/// Writes `<bench>_sf<tag>_hive.hql` and returns its path.
pub fn write_ddl_file(
    output_dir: &Path,
    benchmark: Benchmark,
    scale_factor: f64,
    summaries: &[TableSummary],
    external_location: Option<&str>,
) -> io::Result<PathBuf> {
    let database = schema::database_name(benchmark, scale_factor);
    let path = output_dir.join(format!("{database}_hive.hql"));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "-- Hive DDL for {} SF{scale_factor}",
        benchmark.display_name()
    );
    let _ = writeln!(out, "-- Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);
    let _ = writeln!(out, "CREATE DATABASE IF NOT EXISTS {database};");
    let _ = writeln!(out, "USE {database};");
    let _ = writeln!(out);

    for summary in summaries {
        let schema = schema::table_schema(benchmark, summary.table).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("no schema for {} table {}", benchmark, summary.table),
            )
        })?;
        let _ = writeln!(out, "-- Table: {} ({} rows)", summary.table, summary.rows);
        out.push_str(&create_table_ddl(summary.table, &schema, external_location));
        out.push_str("\n\n");
    }

    fs::write(&path, out)?;
    debug!("wrote Hive DDL to {}", path.display());
    Ok(path)
}

/// Writes the executable `load_<bench>_data.sh` loader and returns its path.
pub fn write_load_script(
    output_dir: &Path,
    benchmark: Benchmark,
    scale_factor: f64,
    external_location: Option<&str>,
) -> io::Result<PathBuf> {
    let bench = benchmark.name();
    let database = schema::database_name(benchmark, scale_factor);
    let path = output_dir.join(format!("load_{bench}_data.sh"));
    let data_dir_var = format!("{}_DATA_DIR", bench.to_uppercase());

    let mut out = String::new();
    let _ = writeln!(out, "#!/bin/bash");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "# Load {} SF{scale_factor} data into Hive.",
        benchmark.display_name()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{data_dir_var}=\"$1\"");
    let _ = writeln!(out);
    let _ = writeln!(out, "if [ -z \"${data_dir_var}\" ]; then");
    let _ = writeln!(out, "    echo \"usage: ./load_{bench}_data.sh /path/to/{bench}/data\"");
    let _ = writeln!(out, "    exit 1");
    let _ = writeln!(out, "fi");
    let _ = writeln!(out);
    let _ = writeln!(out, "echo \"Creating Hive tables...\"");
    let _ = writeln!(out, "hive -f \"${data_dir_var}/{database}_hive.hql\"");
    let _ = writeln!(out);
    let _ = writeln!(out, "echo \"Loading data into Hive tables...\"");
    let _ = writeln!(out, "for table_dir in \"${data_dir_var}/parquet\"/*; do");
    let _ = writeln!(out, "    table_name=$(basename \"$table_dir\")");
    let _ = writeln!(out, "    parquet_file=\"$table_dir/$table_name.parquet\"");
    let _ = writeln!(out, "    echo \"Loading $table_name...\"");
    match external_location {
        // External tables read straight from their LOCATION; put the file there.
        Some(location) => {
            let location = location.trim_end_matches('/');
            let _ = writeln!(out, "    hdfs dfs -mkdir -p {location}/$table_name");
            let _ = writeln!(out, "    hdfs dfs -put -f \"$parquet_file\" {location}/$table_name/");
        }
        // Managed tables go through an HDFS staging directory and LOAD DATA.
        None => {
            let _ = writeln!(out, "    hdfs dfs -mkdir -p /tmp/{bench}_load");
            let _ = writeln!(out, "    hdfs dfs -put -f \"$parquet_file\" /tmp/{bench}_load/");
            let _ = writeln!(
                out,
                "    hive -e \"LOAD DATA INPATH '/tmp/{bench}_load/$table_name.parquet' \
                 OVERWRITE INTO TABLE {database}.$table_name;\""
            );
        }
    }
    let _ = writeln!(out, "done");
    let _ = writeln!(out);
    if external_location.is_none() {
        let _ = writeln!(out, "echo \"Cleaning up temporary files...\"");
        let _ = writeln!(out, "hdfs dfs -rm -r -skipTrash /tmp/{bench}_load");
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "echo \"Data load complete.\"");

    fs::write(&path, out)?;
    make_executable(&path)?;
    debug!("wrote load script to {}", path.display());
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::TimeUnit;

    #[test]
    fn hive_type_mapping() {
        assert_eq!(hive_type(&DataType::Int32), "INT");
        assert_eq!(hive_type(&DataType::Int64), "BIGINT");
        assert_eq!(hive_type(&DataType::Decimal128(15, 2)), "DECIMAL(15,2)");
        assert_eq!(hive_type(&DataType::Utf8), "STRING");
        assert_eq!(hive_type(&DataType::Date32), "DATE");
        assert_eq!(hive_type(&DataType::Float64), "DOUBLE");
        assert_eq!(hive_type(&DataType::Timestamp(TimeUnit::Microsecond, None)), "TIMESTAMP");
        // unmapped types degrade to STRING
        assert_eq!(hive_type(&DataType::Duration(TimeUnit::Second)), "STRING");
    }

    #[test]
    fn managed_table_ddl() {
        let schema = schema::table_schema(Benchmark::Tpch, "nation").unwrap();
        let ddl = create_table_ddl("nation", &schema, None);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS nation (\n"));
        assert!(ddl.contains("  n_nationkey BIGINT,\n"));
        assert!(ddl.contains("  n_comment STRING\n"));
        assert!(ddl.ends_with("STORED AS PARQUET;"));
    }

    #[test]
    fn external_table_ddl() {
        let schema = schema::table_schema(Benchmark::Tpch, "region").unwrap();
        let ddl = create_table_ddl("region", &schema, Some("hdfs:///warehouse/tpch/"));
        assert!(ddl.starts_with("CREATE EXTERNAL TABLE IF NOT EXISTS region"));
        assert!(ddl.ends_with("LOCATION 'hdfs:///warehouse/tpch/region';"));
    }

    #[test]
    fn ddl_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let summaries = vec![
            TableSummary { table: "region", rows: 5 },
            TableSummary { table: "nation", rows: 25 },
        ];
        let path =
            write_ddl_file(dir.path(), Benchmark::Tpch, 1.0, &summaries, None).unwrap();
        assert_eq!(path.file_name().unwrap(), "tpch_sf1_hive.hql");

        let hql = fs::read_to_string(&path).unwrap();
        assert!(hql.contains("-- Hive DDL for TPC-H SF1"));
        assert!(hql.contains("CREATE DATABASE IF NOT EXISTS tpch_sf1;"));
        assert!(hql.contains("USE tpch_sf1;"));
        assert!(hql.contains("-- Table: nation (25 rows)"));
        assert!(hql.contains("CREATE TABLE IF NOT EXISTS region"));
    }

    #[test]
    fn ddl_file_rejects_unknown_table() {
        let dir = tempfile::tempdir().unwrap();
        let summaries = vec![TableSummary { table: "bogus", rows: 0 }];
        let err = write_ddl_file(dir.path(), Benchmark::Tpch, 1.0, &summaries, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn load_script_managed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_load_script(dir.path(), Benchmark::Tpcds, 1.0, None).unwrap();
        assert_eq!(path.file_name().unwrap(), "load_tpcds_data.sh");

        let script = fs::read_to_string(&path).unwrap();
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("TPCDS_DATA_DIR=\"$1\""));
        assert!(script.contains("usage: ./load_tpcds_data.sh /path/to/tpcds/data"));
        assert!(script.contains("hive -f \"$TPCDS_DATA_DIR/tpcds_sf1_hive.hql\""));
        assert!(script.contains("OVERWRITE INTO TABLE tpcds_sf1.$table_name;"));
        assert!(script.contains("hdfs dfs -rm -r -skipTrash /tmp/tpcds_load"));
    }

    #[test]
    fn load_script_external() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            write_load_script(dir.path(), Benchmark::Ssb, 1.0, Some("hdfs:///warehouse/ssb")).unwrap();
        let script = fs::read_to_string(&path).unwrap();
        assert!(script.contains("hdfs dfs -put -f \"$parquet_file\" hdfs:///warehouse/ssb/$table_name/"));
        assert!(!script.contains("LOAD DATA INPATH"));
    }

    #[cfg(unix)]
    #[test]
    fn load_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = write_load_script(dir.path(), Benchmark::Tpch, 1.0, None).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
