// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser};
use muldicat::{load_graph, output, RelationStats, SchemeConfig};

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Convert glossary spreadsheet to SKOS
    Rdfize {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Rdfxml)]
        format: Format,
        /// Input glossary, .csv or .xlsx
        input: std::path::PathBuf,
    },
    /// Render glossary as XHTML+RDFa
    Rdfa {
        /// Input glossary (.csv, .xlsx) or RDF/XML (.rdf, .xml)
        input: std::path::PathBuf,
    },
    /// Show relation type counts by language
    Relations {
        /// Input glossary, .csv or .xlsx
        input: std::path::PathBuf,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Rdfxml,
    Ntriples,
}

fn main() -> std::process::ExitCode {
    env_logger::init();

    // parse commandline
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:?}", err);
            eprintln!("muldicat: {}", err);
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> muldicat::Result<()> {
    use std::io::Write;

    // Load scheme metadata
    let scheme = if let Some(cfg_file) = &cli.config {
        SchemeConfig::with_config(cfg_file)?
    } else {
        SchemeConfig::new()?
    };

    // whole document is built before anything is written
    let document = match cli.command {
        Some(Commands::Rdfize { format, input }) => {
            let graph = load_graph(&input, &scheme)?;
            match format {
                Format::Rdfxml => output::rdfxml(&graph)?,
                Format::Ntriples => output::ntriples(&graph),
            }
        }
        Some(Commands::Rdfa { input }) => {
            let graph = load_graph(&input, &scheme)?;
            output::xhtml(&graph)?
        }
        Some(Commands::Relations { input }) => {
            RelationStats::tally(muldicat::read_path(&input)?)?.to_string()
        }
        None => {
            // Print help
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
