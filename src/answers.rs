//! Answer resolution.
//! Walks the schema in ascending order and turns every definition into exactly
//! one string value, asking the user only when the definition requires it.

use crate::config::{PromptDefinition, PromptKind, Schema};
use crate::error::{Error, Result};
use crate::prompt::{normalize_bool, Prompter};
use indexmap::IndexMap;
use log::{debug, warn};
use std::io;

/// Resolved answers keyed by variable name.
pub type VariableMapping = IndexMap<String, String>;

/// Namespace the answers are exposed under in templates: `{{ scaffold.name }}`.
pub const CONTEXT_NAMESPACE: &str = "scaffold";

const BOOL_ITEMS: [&str; 2] = ["TRUE", "FALSE"];

/// What to do when the input provider fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptFailurePolicy {
    /// Any failure aborts the whole run.
    #[default]
    Abort,
    /// Text, numeric and choice prompts become empty, free-form booleans become `FALSE`.
    Fallback,
}

/// Options controlling how answers are collected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerOptions {
    /// Ask booleans as typed yes/no answers instead of a TRUE/FALSE list.
    pub free_form_booleans: bool,
    pub on_failure: PromptFailurePolicy,
}

fn label(definition: &PromptDefinition) -> String {
    format!("Select {} [{}]", definition.key, definition.default)
}

/// Applies the failure policy to a prompt outcome.
fn settle(
    key: &str,
    outcome: io::Result<String>,
    fallback: &str,
    policy: PromptFailurePolicy,
) -> Result<String> {
    match (outcome, policy) {
        (Ok(value), _) => Ok(value),
        (Err(source), PromptFailurePolicy::Abort) => {
            Err(Error::PromptFailure { key: key.to_string(), source })
        }
        (Err(source), PromptFailurePolicy::Fallback) => {
            warn!("Prompt for '{}' failed ({}), using '{}'", key, source, fallback);
            Ok(fallback.to_string())
        }
    }
}

/// Resolves a single definition into its string value.
pub fn get_answer(
    definition: &PromptDefinition,
    prompter: &dyn Prompter,
    options: AnswerOptions,
) -> Result<String> {
    let key = definition.key.as_str();
    let default = definition.default.to_string();

    if definition.is_private() {
        debug!("'{}' is private, using its default", key);
        return Ok(default);
    }

    let policy = options.on_failure;
    match &definition.kind {
        PromptKind::SingleChoice(items) => {
            let default_index = items.iter().position(|item| *item == default).unwrap_or(0);
            let outcome = prompter
                .select(&label(definition), items, default_index)
                .and_then(|index| {
                    items.get(index).cloned().ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!("selection {index} is out of range"),
                        )
                    })
                });
            settle(key, outcome, "", policy)
        }
        PromptKind::Text => settle(key, prompter.text(&label(definition), &default), "", policy),
        PromptKind::Integer | PromptKind::Real => {
            settle(key, prompter.number(&label(definition), &default), "", policy)
        }
        PromptKind::Boolean if options.free_form_booleans => {
            let seed = normalize_bool(&default);
            let outcome = prompter
                .yes_no(&label(definition), seed)
                .map(|answer| normalize_bool(&answer).to_string());
            settle(key, outcome, "FALSE", policy)
        }
        PromptKind::Boolean => {
            let items: Vec<String> = BOOL_ITEMS.iter().map(|s| s.to_string()).collect();
            let default_index = if normalize_bool(&default) == "TRUE" { 0 } else { 1 };
            let outcome = prompter
                .select(&label(definition), &items, default_index)
                .map(|index| if index == 0 { "TRUE" } else { "FALSE" }.to_string());
            settle(key, outcome, "", policy)
        }
    }
}

/// Prompts for every definition of the schema in ascending order.
///
/// # Returns
/// * `Result<VariableMapping>` - exactly one entry per schema key
///
/// # Errors
/// * `Error::PromptFailure` if the input provider fails under [`PromptFailurePolicy::Abort`]
pub fn get_answers(
    schema: &Schema,
    prompter: &dyn Prompter,
    options: AnswerOptions,
) -> Result<VariableMapping> {
    let mut answers = VariableMapping::with_capacity(schema.len());

    for definition in schema.definitions() {
        let value = get_answer(definition, prompter, options)?;
        debug!("Resolved '{}' = '{}'", definition.key, value);
        answers.insert(definition.key.clone(), value);
    }

    Ok(answers)
}

/// Wraps the answers into the rendering context.
pub fn to_context(answers: &VariableMapping) -> serde_json::Value {
    serde_json::json!({ CONTEXT_NAMESPACE: answers })
}
