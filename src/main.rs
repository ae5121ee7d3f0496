//! Scaffold's main application entry point.
//! Handles command-line argument parsing, logging setup and interrupt
//! handling, and turns any error into exit status 1.

use scaffold::{
    cli::{get_args, Args, Command},
    error::{default_error_handler, Result},
    logger::init_logger,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    runner::{run, RunOptions},
    settings::{Settings, SETTINGS_DIR},
    version::{commit_hash, version_line},
};

/// Terminates immediately on SIGINT/SIGTERM.
///
/// This is an unconditional abort: an output directory being generated at
/// that moment is not rolled back.
fn install_interrupt_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("Forced exited the cli...");
        std::process::exit(1);
    }) {
        log::warn!("Could not install interrupt handler: {}", e);
    }
}

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose, args.no_color, args.dry_run);
    install_interrupt_handler();

    if let Err(err) = execute(args) {
        default_error_handler(err);
    }
}

fn execute(args: Args) -> Result<()> {
    let settings = Settings::load(SETTINGS_DIR)?;
    log::debug!("Using settings {:?}", settings);

    match args.command {
        Command::Version => {
            println!("{}", version_line(&settings, commit_hash().as_deref()));
        }
        Command::Run(run_args) => {
            if run_args.path == std::path::Path::new(".") {
                log::info!("No path provided, assuming path is current path: .");
            }
            let options = RunOptions {
                template: run_args.path.clone(),
                config: run_args.config.clone(),
                dry_run: args.dry_run,
                answers: run_args.answer_options(),
            };
            let report = run(&options, &DialoguerPrompter::new(), &MiniJinjaRenderer::new())?;

            if report.dry_run {
                println!(
                    "Dry run completed: {} directories and {} files would be generated in {}.",
                    report.summary.directories,
                    report.summary.files,
                    report.output_root.display()
                );
            } else {
                println!(
                    "Template generation completed successfully in {}.",
                    report.output_root.display()
                );
            }
        }
    }
    Ok(())
}
