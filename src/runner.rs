//! Generation pipeline.
//! Ties schema loading, answer resolution, hooks and the tree walk together
//! inside an output transaction.

use crate::answers::{get_answers, to_context, AnswerOptions, VariableMapping};
use crate::config::load_schema;
use crate::error::{Error, Result};
use crate::hooks::{render_pre_gen_hook, report_hook, Hook};
use crate::processor::{Processor, WalkSummary, OUTPUT_DIR};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::transaction::OutputTransaction;
use log::{debug, error, info};
use std::path::PathBuf;

/// Inputs of a single generation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Template directory; the output is created inside it.
    pub template: PathBuf,
    /// Per-run configuration file.
    pub config: PathBuf,
    /// Render everything, write nothing.
    pub dry_run: bool,
    pub answers: AnswerOptions,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct RunReport {
    pub output_root: PathBuf,
    pub answers: VariableMapping,
    pub summary: WalkSummary,
    pub dry_run: bool,
}

/// Runs the whole pipeline.
///
/// # Flow
/// 1. Checks the template path
/// 2. Loads the prompt schema
/// 3. Resolves answers in schema order
/// 4. Renders the pre_gen_project hook in place
/// 5. Creates the output directory and walks the template into it
/// 6. Reports a post_gen_project hook, if any
///
/// # Errors
/// Any error during the walk rolls the output directory back before it is returned.
pub fn run(
    options: &RunOptions,
    prompter: &dyn Prompter,
    renderer: &dyn TemplateRenderer,
) -> Result<RunReport> {
    let template_root = &options.template;
    debug!("Getting path provided: {}", template_root.display());
    if !template_root.exists() {
        return Err(Error::PathNotFound { path: template_root.display().to_string() });
    }

    debug!("Loading configuration file...");
    let schema = load_schema(&options.config)?;

    report_hook(template_root, Hook::PrePrompt);
    let answers = get_answers(&schema, prompter, options.answers)?;
    let context = to_context(&answers);
    debug!("New Compiled Results params={:?}", answers);

    render_pre_gen_hook(template_root, renderer, &context, options.dry_run)?;

    let output_root = template_root.join(OUTPUT_DIR);
    let processor = Processor::new(
        renderer,
        &context,
        template_root,
        &output_root,
        schema.path(),
        options.dry_run,
    )?;

    let transaction = OutputTransaction::begin(&output_root, options.dry_run)?;
    let summary = match processor.walk() {
        Ok(summary) => {
            transaction.commit()?;
            summary
        }
        Err(err) => {
            if let Err(rollback_err) = transaction.rollback() {
                error!("{}", rollback_err);
            }
            return Err(err);
        }
    };
    info!(
        "Generated {} directories and {} files ({} skipped)",
        summary.directories, summary.files, summary.skipped
    );

    report_hook(template_root, Hook::PostGenProject);

    Ok(RunReport { output_root, answers, summary, dry_run: options.dry_run })
}
