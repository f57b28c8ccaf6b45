//! Command-line interface implementation for mdtemplate.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for mdtemplate.
#[derive(Parser, Debug)]
#[command(author, version, about = "mdtemplate: Markdown sources for named templates", long_about = None)]
pub struct Args {
    /// Glob pattern of Markdown units, or a single file with --name
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Register PATTERN as a single file under this template name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Root name of the namespace. Defaults to the first unit's name
    #[arg(short, long)]
    pub root: Option<String>,

    /// Configuration file (defaults to mdtemplate.json/.yml/.yaml in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the generated source of every registered template
    #[arg(short, long)]
    pub print: bool,

    /// Fail when a template calls a template that is not defined
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let printed = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                if printed.is_err() {
                    eprintln!("{e}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
