mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "footprint",
    version,
    about = "Packaging footprint and EPR classification tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a BOM workbook (derives per-consumer-unit consumption)
    Bom {
        /// Path to the BOM xlsx file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the normalized table to an xlsx file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Classify a material spec workbook (EPR categories, capacity buckets)
    Spec {
        /// Path to the material spec xlsx file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the classified table to an xlsx file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Run the full pipeline and write the enriched sales workbook
    Sales {
        /// Path to the sales xlsx file
        input_file: PathBuf,

        /// Path to the raw BOM xlsx file
        #[arg(long, value_name = "FILE")]
        bom: PathBuf,

        /// Path to the raw material spec xlsx file
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Where to write the enriched workbook
        #[arg(
            short = 'O',
            long = "out",
            value_name = "FILE",
            default_value = "Sales_bom_mat.xlsx"
        )]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bom {
            input_file,
            output,
            out,
        } => commands::bom::run(input_file, &output, out),
        Commands::Spec {
            input_file,
            output,
            out,
        } => commands::spec::run(input_file, &output, out),
        Commands::Sales {
            input_file,
            bom,
            spec,
            output,
            out,
        } => commands::sales::run(input_file, bom, spec, &output, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
