use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use log::LevelFilter;
use std::{fs, process};

use strxlate_cli::{
    FileConfig, run_translate,
    extract::{ExtractArgs, run_extract},
    translate::TranslateArgs,
};

#[derive(Parser, Debug)]
#[command(name = "strxlate", author, version, about, long_about = None)]
struct Args {
    /// Verbose logging, debug dumps and detailed errors
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a strings.xml file into one or more languages.
    Translate(TranslateArgs),

    /// Print the strings that would be sent for translation, as JSON.
    Extract(ExtractArgs),

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    match args.commands {
        Commands::Translate(translate) => {
            let config = match &translate.config {
                Some(path) => FileConfig::load(path).unwrap_or_else(|e| fail(e)),
                None => FileConfig::default(),
            };
            let settings = translate
                .resolve(&config, args.debug)
                .unwrap_or_else(|e| fail(e));
            let translator = settings.translator().unwrap_or_else(|e| fail(e));

            if let Err(e) = run_translate(&settings, translator.as_ref()).await {
                eprintln!("Error: {}", e);
                if args.debug {
                    if let Some(detail) = e.detail() {
                        eprintln!("{}", detail);
                    }
                }
                process::exit(1);
            }
        }
        Commands::Extract(extract) => {
            let json = run_extract(&extract).unwrap_or_else(|e| fail(e));
            match &extract.output {
                Some(path) => {
                    if let Err(e) = fs::write(path, &json) {
                        fail(format!("Cannot write {}: {}", path, e));
                    }
                }
                None => println!("{}", json),
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            generate(shell, &mut cmd, "strxlate", &mut std::io::stdout());
        }
    }
}
