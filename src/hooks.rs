//! Hook detection.
//!
//! Templates may carry scripts in `hooks/`:
//! - hooks/pre_prompt.{py,go,sh}
//! - hooks/pre_gen_project.{py,go,sh}
//! - hooks/post_gen_project.{py,go,sh}
//!
//! Hooks are never executed and never copied into the output. The only action
//! taken is rendering `pre_gen_project` in place before generation.

use crate::error::{Error, Result};
use crate::processor::overwrite_in_place;
use crate::renderer::TemplateRenderer;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the hooks directory inside a template.
pub const HOOKS_DIR: &str = "hooks";

/// Script extensions recognised for hook files.
pub const HOOK_EXTENSIONS: [&str; 3] = ["py", "go", "sh"];

/// The hook scripts a template may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    PrePrompt,
    PreGenProject,
    PostGenProject,
}

impl Hook {
    pub const ALL: [Hook; 3] = [Hook::PrePrompt, Hook::PreGenProject, Hook::PostGenProject];

    pub fn file_stem(&self) -> &'static str {
        match self {
            Hook::PrePrompt => "pre_prompt",
            Hook::PreGenProject => "pre_gen_project",
            Hook::PostGenProject => "post_gen_project",
        }
    }
}

/// Builds the set of patterns matching hook files anywhere under a `hooks` directory.
pub fn hook_file_patterns() -> Result<GlobSet> {
    let stems: Vec<_> = Hook::ALL.iter().map(Hook::file_stem).collect();
    let pattern =
        format!("**/{}/{{{}}}.{{{}}}", HOOKS_DIR, stems.join(","), HOOK_EXTENSIONS.join(","));

    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new(&pattern)?);
    Ok(builder.build()?)
}

/// Returns `true` if the last component of `path` is the hooks directory name.
pub fn is_hooks_folder(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == HOOKS_DIR)
}

/// Finds the script for `hook` in the template, trying each known extension.
pub fn find_hook<P: AsRef<Path>>(template_root: P, hook: Hook) -> Option<PathBuf> {
    let hooks_dir = template_root.as_ref().join(HOOKS_DIR);
    HOOK_EXTENSIONS
        .iter()
        .map(|ext| hooks_dir.join(format!("{}.{}", hook.file_stem(), ext)))
        .find(|candidate| candidate.is_file())
}

/// Logs hooks that are present but whose execution is not supported.
pub fn report_hook<P: AsRef<Path>>(template_root: P, hook: Hook) -> Option<PathBuf> {
    let found = find_hook(template_root, hook);
    if let Some(path) = &found {
        warn!(
            "Found {} hook '{}'; hook execution is not supported, skipping.",
            hook.file_stem(),
            path.display()
        );
    }
    found
}

/// Renders the `pre_gen_project` hook in place, if the template has one.
///
/// In dry mode the hook is rendered but not written back.
pub fn render_pre_gen_hook<P: AsRef<Path>>(
    template_root: P,
    renderer: &dyn TemplateRenderer,
    context: &serde_json::Value,
    dry_run: bool,
) -> Result<Option<PathBuf>> {
    let Some(hook_path) = find_hook(template_root, Hook::PreGenProject) else {
        debug!("No pre_gen_project hook found");
        return Ok(None);
    };

    info!("Rendering pre_gen_project hook '{}'", hook_path.display());
    let content = fs::read_to_string(&hook_path).map_err(|e| Error::io("read", &hook_path, e))?;
    if content.is_empty() {
        return Ok(Some(hook_path));
    }

    let rendered = renderer.render(&content, context).map_err(|e| Error::RenderFailure {
        path: hook_path.display().to_string(),
        reason: e.to_string(),
    })?;

    if dry_run {
        debug!("Dry run: not writing rendered hook '{}'", hook_path.display());
    } else {
        overwrite_in_place(&hook_path, rendered.as_bytes())?;
    }

    Ok(Some(hook_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_patterns() {
        let patterns = hook_file_patterns().unwrap();

        assert!(patterns.is_match("/tmp/template/hooks/pre_gen_project.go"));
        assert!(patterns.is_match("/tmp/template/hooks/post_gen_project.sh"));
        assert!(patterns.is_match("template/hooks/pre_prompt.py"));
        assert!(patterns.is_match("hooks/pre_prompt.py"));
        assert!(!patterns.is_match("/tmp/template/hooks/helper.go"));
        assert!(!patterns.is_match("/tmp/template/pre_gen_project.go"));
        assert!(!patterns.is_match("/tmp/template/hooks/pre_gen_project.rb"));
    }

    #[test]
    fn test_is_hooks_folder() {
        assert!(is_hooks_folder(Path::new("/tmp/template/hooks")));
        assert!(is_hooks_folder(Path::new("/tmp/template/hooks/")));
        assert!(!is_hooks_folder(Path::new("/tmp/template/hooks/pre_gen_project.go")));
        assert!(!is_hooks_folder(Path::new("/tmp/template/webhooks")));
    }
}
