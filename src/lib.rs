//! Scaffold generates projects from templated directory trees.
//! A configuration file describes the variables, the user answers prompts for
//! them, and the template tree is copied with its names and contents rendered.

/// Answer resolution: turns prompt definitions into template variables
pub mod answers;

/// Command-line interface module for the scaffold application
pub mod cli;

/// Prompt schema loading
/// Supports YAML and JSON configuration files
pub mod config;

/// Error types and handling for the scaffold application
pub mod error;

/// Hook detection
/// Recognises scripts in:
/// - hooks/pre_prompt
/// - hooks/pre_gen_project
/// - hooks/post_gen_project
pub mod hooks;

pub mod logger;

/// Template tree classification and processing
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering functionality
pub mod renderer;

/// Generation pipeline orchestration
pub mod runner;

/// Process-wide settings from config/base.yaml
pub mod settings;

/// Rollback-capable output directory
pub mod transaction;

pub mod version;
