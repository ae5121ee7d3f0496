//! Command-line interface implementation for scaffold.
//! Provides argument parsing and help text formatting using clap.

use crate::answers::{AnswerOptions, PromptFailurePolicy};
use crate::config::DEFAULT_CONFIG_FILE;
use clap::{error::ErrorKind, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for scaffold.
#[derive(Parser, Debug)]
#[command(
    name = "scaffold",
    author,
    version,
    about = "scaffold - a scaffolding tool to generate projects from templated directories",
    long_about = None
)]
pub struct Args {
    /// Activate verbose mode for more details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colors on logs
    #[arg(short, long, global = true)]
    pub no_color: bool,

    /// Run without writing anything to disk
    #[arg(short, long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Runs the builder on a scaffold project
    Run(RunArgs),

    /// Version of the scaffold cli application
    Version,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Template directory, defaults to the current directory
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Configuration file describing the prompts
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Ask booleans as typed yes/no answers instead of a TRUE/FALSE list
    #[arg(long)]
    pub free_form_booleans: bool,

    /// Use an empty value instead of aborting when a prompt fails
    #[arg(long)]
    pub lenient_prompts: bool,
}

impl RunArgs {
    pub fn answer_options(&self) -> AnswerOptions {
        AnswerOptions {
            free_form_booleans: self.free_form_booleans,
            on_failure: if self.lenient_prompts {
                PromptFailurePolicy::Fallback
            } else {
                PromptFailurePolicy::Abort
            },
        }
    }
}

/// Parses command line arguments.
///
/// # Exits
/// * With clap's default handling for help and version output
/// * With status code 1 for any other argument error
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    }
}
