//! Benchmark data generation CLI for Hive-compatible warehouses.
//!
//! One subcommand per benchmark. Each run writes Parquet data, a Hive DDL
//! file, and an executable load script into the output directory.
//!
//! See the documentation on [`Cli`] for more information on the command line

use benchgen::{schema::Benchmark, Compression, DatasetGenerator, DEFAULT_PARQUET_ROW_GROUP_BYTES};
use clap::Parser;
use log::{info, LevelFilter};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "benchgen")]
#[command(version)]
#[command(
    // -h output
    about = "Benchmark Dataset Generator for Hive",
    // --help output
    long_about = r#"
Benchmark Dataset Generator for Hive-compatible warehouses

Each table is written to <output_dir>/parquet/<table>/<table>.parquet,
together with a Hive DDL file and a load script:

    <output_dir>/<bench>_sf<tag>_hive.hql
    <output_dir>/load_<bench>_data.sh

Load the generated data with:

    bash <output_dir>/load_<bench>_data.sh <output_dir>

Examples

# Generate TPC-H at scale factor 1 (1GB) into ./tpch:

benchgen tpch -s 1 -o tpch

# Generate only the lineitem table at scale factor 100 with zstd compression:

benchgen tpch -s 100 --tables=lineitem -c 'ZSTD(1)' -o tpch

# Generate TPC-DS at scale factor 10 with a dsdgen built from the TPC kit:

benchgen tpcds -s 10 -o tpcds --generator-bin /opt/tpcds-kit/tools/dsdgen

# Generate SSB as EXTERNAL tables under an HDFS warehouse path:

benchgen ssb -s 1 -o ssb --external-location hdfs:///warehouse/ssb

# Generate scale factor one in current directory, seeing debug output

RUST_LOG=debug benchgen tpch -s 1 -o .
"#
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate the TPC-H dataset (native generator)
    Tpch(TpchArgs),
    /// Generate the TPC-DS dataset (wraps the external dsdgen tool)
    Tpcds(ExternalArgs),
    /// Generate the SSB dataset (wraps the external SSB dbgen tool)
    Ssb(ExternalArgs),
}

#[derive(clap::Args)]
struct Args {
    /// Scale factor to create
    #[arg(short, long, default_value_t = 1.)]
    scale_factor: f64,

    /// Output directory for generated files (default: the benchmark name)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Which tables to generate (default: all)
    #[arg(short = 'T', long = "tables", value_delimiter = ',')]
    tables: Option<Vec<String>>,

    /// The number of threads for parallel generation, defaults to the number of CPUs
    #[arg(short, long, default_value_t = num_cpus::get())]
    num_threads: usize,

    /// Parquet block compression format.
    ///
    /// Supported values: UNCOMPRESSED, ZSTD(N), SNAPPY, GZIP, LZO, BROTLI, LZ4
    ///
    /// Note to use zstd you must supply the "compression" level (1-22)
    /// as a number in parentheses, e.g. `ZSTD(1)` for level 1 compression.
    #[arg(short = 'c', long, default_value = "SNAPPY")]
    compression: Compression,

    /// Target size in row group bytes in Parquet files
    ///
    /// Row groups are the typical unit of parallel processing and compression
    /// with many query engines. Typical values range from 10MB to 100MB.
    #[arg(long, default_value_t = DEFAULT_PARQUET_ROW_GROUP_BYTES)]
    row_group_bytes: i64,

    /// Emit EXTERNAL tables with a LOCATION under this URI
    /// (e.g. hdfs:///warehouse/tpch)
    #[arg(long)]
    external_location: Option<String>,

    /// Verbose output
    ///
    /// When specified, sets the log level to `info` and ignores the `RUST_LOG`
    /// environment variable. When not specified, uses `RUST_LOG`
    #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode - only show error-level logs
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::Args)]
struct TpchArgs {
    #[command(flatten)]
    common: Args,
}

#[derive(clap::Args)]
struct ExternalArgs {
    #[command(flatten)]
    common: Args,

    /// Path to the external generator executable (dsdgen for TPC-DS, the SSB
    /// dbgen for SSB). Defaults to looking the tool up on PATH.
    #[arg(long)]
    generator_bin: Option<PathBuf>,

    /// Keep the staging directory with the raw generator output
    #[arg(long, default_value_t = false)]
    keep_staging: bool,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();
    cli.main().await
}

impl Cli {
    async fn main(self) -> io::Result<()> {
        match self.command {
            Commands::Tpch(args) => args.run().await,
            Commands::Tpcds(args) => args.run(Benchmark::Tpcds).await,
            Commands::Ssb(args) => args.run(Benchmark::Ssb).await,
        }
    }
}

impl Args {
    fn into_builder(self, benchmark: Benchmark) -> benchgen::DatasetGeneratorBuilder {
        configure_logging(self.verbose, self.quiet);

        let mut builder = DatasetGenerator::builder(benchmark)
            .with_scale_factor(self.scale_factor)
            .with_num_threads(self.num_threads)
            .with_compression(self.compression)
            .with_row_group_bytes(self.row_group_bytes);

        if let Some(output_dir) = self.output_dir {
            builder = builder.with_output_dir(output_dir);
        }
        if let Some(tables) = self.tables {
            builder = builder.with_tables(tables);
        }
        if let Some(location) = self.external_location {
            builder = builder.with_external_location(location);
        }
        builder
    }
}

impl TpchArgs {
    async fn run(self) -> io::Result<()> {
        self.common
            .into_builder(Benchmark::Tpch)
            .build()
            .generate()
            .await
    }
}

impl ExternalArgs {
    async fn run(self, benchmark: Benchmark) -> io::Result<()> {
        let mut builder = self
            .common
            .into_builder(benchmark)
            .with_keep_staging(self.keep_staging);

        if let Some(bin) = self.generator_bin {
            builder = builder.with_generator_bin(bin);
        }

        builder.build().generate().await
    }
}

fn configure_logging(verbose: bool, quiet: bool) {
    if quiet {
        env_logger::builder()
            .filter_level(LevelFilter::Error)
            .init();
    } else if verbose {
        env_logger::builder().filter_level(LevelFilter::Info).init();
        info!("Verbose output enabled (ignoring RUST_LOG environment variable)");
    } else {
        env_logger::builder()
            .filter_level(LevelFilter::Warn)
            .parse_default_env()
            .init();
    }
}
