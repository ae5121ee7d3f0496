//! Template tree processing.
//! Classifies every entry of the template tree, computes its rendered
//! destination and performs the directory creation, copy and in-place render.

use crate::error::{Error, Result};
use crate::hooks::{hook_file_patterns, is_hooks_folder};
use crate::renderer::TemplateRenderer;
use crate::transaction::dir_builder;
use globset::GlobSet;
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Name of the directory generated projects are written to, inside the template.
pub const OUTPUT_DIR: &str = "output";

/// What to do with a visited template entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClassification {
    SkipSelf,
    SkipConfigFile,
    SkipHooksFolder,
    SkipHooksFile,
    SkipOutputSubtree,
    /// Symlinks to nothing, sockets, fifos and the like.
    SkipUnsupported,
    Directory,
    RegularFile,
}

impl PathClassification {
    pub fn is_skip(&self) -> bool {
        !matches!(self, PathClassification::Directory | PathClassification::RegularFile)
    }
}

/// Everything classification needs to know about a run.
#[derive(Debug)]
pub struct ClassifyContext {
    pub template_root: PathBuf,
    pub output_root: PathBuf,
    pub config_name: Option<OsString>,
    pub hook_patterns: GlobSet,
}

impl ClassifyContext {
    pub fn new(template_root: &Path, output_root: &Path, config_path: &Path) -> Result<Self> {
        Ok(Self {
            template_root: template_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            config_name: config_path.file_name().map(|name| name.to_os_string()),
            hook_patterns: hook_file_patterns()?,
        })
    }
}

/// Classifies `path`; the rules are checked in order and the first match wins.
pub fn classify(path: &Path, ctx: &ClassifyContext) -> PathClassification {
    if same_path(path, &ctx.template_root) {
        return PathClassification::SkipSelf;
    }
    if ctx.config_name.is_some() && path.file_name() == ctx.config_name.as_deref() {
        return PathClassification::SkipConfigFile;
    }
    if is_hooks_folder(path) {
        return PathClassification::SkipHooksFolder;
    }
    if ctx.hook_patterns.is_match(path) {
        return PathClassification::SkipHooksFile;
    }
    if path.starts_with(&ctx.output_root) {
        return PathClassification::SkipOutputSubtree;
    }
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => PathClassification::Directory,
        Ok(metadata) if metadata.is_file() => PathClassification::RegularFile,
        _ => PathClassification::SkipUnsupported,
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    a.components().eq(b.components())
}

/// Returns `path` relative to `base`, slash separated.
///
/// Trailing separators on either side are ignored, so `relative_path(base, base)`
/// is empty. A `path` outside `base` keeps all of its components except the root.
pub fn relative_path<B: AsRef<Path>, P: AsRef<Path>>(base: B, path: P) -> String {
    let path = path.as_ref();
    let relative = path.strip_prefix(base.as_ref()).unwrap_or(path);

    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// A rendered path is unusable when a templated name rendered to nothing.
pub fn is_rendered_path_valid(rendered: &str) -> bool {
    !rendered.is_empty() && !rendered.contains("//") && !rendered.ends_with('/')
}

/// Counters reported after a walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub directories: usize,
    pub files: usize,
    pub skipped: usize,
}

/// Reproduces a template tree under the output root.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    context: &'a serde_json::Value,
    classify_ctx: ClassifyContext,
    dry_run: bool,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        context: &'a serde_json::Value,
        template_root: &Path,
        output_root: &Path,
        config_path: &Path,
        dry_run: bool,
    ) -> Result<Self> {
        let classify_ctx = ClassifyContext::new(template_root, output_root, config_path)?;
        Ok(Self { renderer, context, classify_ctx, dry_run })
    }

    fn template_root(&self) -> &Path {
        &self.classify_ctx.template_root
    }

    fn output_root(&self) -> &Path {
        &self.classify_ctx.output_root
    }

    /// Renders the destination of `path` by joining its relative path onto the
    /// output root and passing the result through the template engine.
    pub fn render_target(&self, path: &Path) -> Result<String> {
        let relative = relative_path(self.template_root(), path);
        let templated = self.output_root().join(relative);
        let templated = templated.to_string_lossy();

        let rendered = self
            .renderer
            .render(&templated, self.context)
            .map_err(|e| Error::RenderFailure { path: templated.to_string(), reason: e.to_string() })?;

        debug!("jinja template templated={} rendered={}", templated, rendered);
        Ok(rendered)
    }

    /// Walks the template tree in file name order.
    ///
    /// Stops at the first error; nothing after it is visited.
    pub fn walk(&self) -> Result<WalkSummary> {
        let mut summary = WalkSummary::default();
        let mut entries = WalkDir::new(self.template_root()).sort_by_file_name().into_iter();

        while let Some(entry) = entries.next() {
            let entry = entry?;
            let path = entry.path();
            let is_dir = match classify(path, &self.classify_ctx) {
                PathClassification::SkipSelf => continue,
                PathClassification::Directory => true,
                PathClassification::RegularFile => false,
                skip => {
                    debug!("Skipping '{}' ({:?})", path.display(), skip);
                    summary.skipped += 1;
                    if entry.file_type().is_dir() {
                        entries.skip_current_dir();
                    }
                    continue;
                }
            };

            let rendered = self.render_target(path)?;
            if !is_rendered_path_valid(&rendered) {
                debug!("Skipping '{}': rendered to an empty name '{}'", path.display(), rendered);
                summary.skipped += 1;
                if is_dir {
                    entries.skip_current_dir();
                }
                continue;
            }
            let target = PathBuf::from(rendered);

            if is_dir {
                self.create_directory(&target)?;
                summary.directories += 1;
            } else {
                self.process_file(path, &target)?;
                summary.files += 1;
            }
        }

        Ok(summary)
    }

    fn create_directory(&self, target: &Path) -> Result<()> {
        if self.dry_run {
            info!("Dry run: would create directory '{}'", target.display());
            return Ok(());
        }
        info!("Creating directory '{}'", target.display());
        dir_builder(true).create(target).map_err(|e| Error::io("create directory", target, e))
    }

    fn process_file(&self, source: &Path, target: &Path) -> Result<()> {
        if self.dry_run {
            info!("Dry run: would write file '{}'", target.display());
            // Render anyway so template errors surface without writing anything.
            let content = fs::read(source).map_err(|e| Error::io("read", source, e))?;
            render_bytes(target, &content, self.renderer, self.context)?;
            return Ok(());
        }

        let bytes = copy_file(source, target)?;
        info!("Processed '{}' ({} bytes)", target.display(), bytes);
        render_file_content(target, self.renderer, self.context)
    }
}

/// Byte-copies `source` to `target`, creating missing parent directories.
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        if !parent.exists() {
            dir_builder(true).create(parent).map_err(|e| Error::io("create directory", parent, e))?;
        }
    }
    fs::copy(source, target).map_err(|e| Error::io("copy file to", target, e))
}

fn render_bytes(
    path: &Path,
    content: &[u8],
    renderer: &dyn TemplateRenderer,
    context: &serde_json::Value,
) -> Result<Option<String>> {
    if content.is_empty() {
        return Ok(None);
    }
    let Ok(text) = std::str::from_utf8(content) else {
        debug!("'{}' is not UTF-8, leaving it as copied", path.display());
        return Ok(None);
    };

    renderer
        .render(text, context)
        .map(Some)
        .map_err(|e| Error::RenderFailure { path: path.display().to_string(), reason: e.to_string() })
}

/// Renders the content of `path` in place, preserving its permission bits.
///
/// Empty and non-UTF-8 files are left untouched.
pub fn render_file_content(
    path: &Path,
    renderer: &dyn TemplateRenderer,
    context: &serde_json::Value,
) -> Result<()> {
    let content = fs::read(path).map_err(|e| Error::io("read", path, e))?;

    let Some(rendered) = render_bytes(path, &content, renderer, context)? else {
        return Ok(());
    };

    overwrite_in_place(path, rendered.as_bytes())
}

/// Replaces the content of an existing file, keeping its permission bits.
///
/// Files without owner write permission are made writable for the duration
/// of the write and get their original mode back afterwards.
pub(crate) fn overwrite_in_place(path: &Path, content: &[u8]) -> Result<()> {
    let original = fs::metadata(path).map_err(|e| Error::io("read metadata of", path, e))?.permissions();

    let mut writable = original.clone();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        writable.set_mode(original.mode() | 0o200);
    }
    #[cfg(not(unix))]
    #[allow(clippy::permissions_set_readonly_false)]
    writable.set_readonly(false);

    if writable != original {
        debug!("'{}' is not writable, lifting write protection for rendering", path.display());
        fs::set_permissions(path, writable).map_err(|e| Error::io("set permissions of", path, e))?;
    }

    fs::write(path, content).map_err(|e| Error::io("write", path, e))?;
    fs::set_permissions(path, original).map_err(|e| Error::io("set permissions of", path, e))
}
