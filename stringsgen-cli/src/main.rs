use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use stringsgen::{
    Error, GeneratorOptions, SwiftVersion, Visibility, compile, formats::read_raw_strings,
    skeleton_for,
};
use stringsgen_cli::output::Destination;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log output (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate Swift accessors for a strings table.
    Strings {
        /// The `.strings` or `.json` file to compile
        input: PathBuf,

        /// `console` or the path of the Swift file to write
        #[arg(short = 'o', long, default_value = "console")]
        destination: Destination,

        /// Name of the root type
        #[arg(long, default_value = "Strings")]
        type_name: String,

        /// Visibility of generated declarations (internal or public)
        #[arg(long, default_value = "internal")]
        visibility: Visibility,

        /// Strings table the values are looked up in (defaults to Localizable)
        #[arg(long)]
        table_name: Option<String>,

        /// Swift language version of the generated code (3, 4 or 5)
        #[arg(long, default_value = "4")]
        swift_version: SwiftVersion,

        /// Do not generate NSAttributedString variants of templates
        #[arg(long)]
        no_attributed_templates: bool,

        /// Do not import the plural runtime module
        #[arg(long)]
        no_runtime_import: bool,
    },

    /// Print the skeleton of a strings table as JSON.
    Skeleton {
        /// The `.strings` or `.json` file to inspect
        input: PathBuf,

        /// `console` or the path of the JSON file to write
        #[arg(short = 'o', long, default_value = "console")]
        output: Destination,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(commands: Commands) -> Result<(), Error> {
    match commands {
        Commands::Strings {
            input,
            destination,
            type_name,
            visibility,
            table_name,
            swift_version,
            no_attributed_templates,
            no_runtime_import,
        } => {
            let options = GeneratorOptions::new()
                .with_type_name(type_name)
                .with_visibility(visibility)
                .with_table_name(table_name)
                .with_swift_version(swift_version)
                .with_attributed_templates(!no_attributed_templates)
                .with_runtime_import(!no_runtime_import);
            debug!(?options, "generator options");

            let raw = read_raw_strings(&input)?;
            info!(input = %input.display(), entries = raw.len(), "compiling");
            let swift = compile(&raw, &options)?;
            destination.write(&swift)?;
        }
        Commands::Skeleton { input, output } => {
            let raw = read_raw_strings(&input)?;
            let skeleton = skeleton_for(&raw)?;
            let mut json = serde_json::to_string_pretty(&skeleton)?;
            json.push('\n');
            output.write(&json)?;
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args.commands) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
