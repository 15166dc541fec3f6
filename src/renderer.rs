//! Render orchestration.
//! Wires the pipeline together for one call: resolve the source, embed
//! data, stage the engine's config and output artifacts, invoke the
//! engine, translate error coordinates, and release every temp file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::artifacts::{self, CleanupGuard, TempFiles};
use crate::config::{serialize_config, EngineConfig, TagSyntax};
use crate::embed::{build_preamble, shift_line_numbers};
use crate::error::{Error, Result};
use crate::includes::{patch_config, patch_source};
use crate::invoker::run_engine;
use crate::resolve::resolve_source_path;

/// Construction-time options for [`Freemarker`].
#[derive(Debug, Default)]
pub struct Options {
    /// Root directory template references resolve against.
    /// Defaults to the temp directory.
    pub root: Option<PathBuf>,
    /// Template file suffix without the leading dot. Defaults to `ftl`.
    pub suffix: Option<String>,
    /// Tag syntax the engine parses templates with
    pub tag_syntax: TagSyntax,
    /// Directory temp artifacts are staged in.
    /// Defaults to `std::env::temp_dir()`.
    pub temp_dir: Option<PathBuf>,
    /// Engine installation directory; the binary is expected under its
    /// `bin/` folder with the platform executable extension
    pub install_dir: Option<PathBuf>,
    /// Explicit engine binary path, overriding `install_dir`
    pub command: Option<PathBuf>,
    /// Kill the engine process after this long. No timeout by default;
    /// a hung engine then blocks the call indefinitely.
    pub timeout: Option<Duration>,
}

/// Per-call rendering options.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Real folder the virtual includes root maps to. When set, include
    /// directives are rewritten and the binding is added to the config.
    pub includes_folder: Option<PathBuf>,
}

fn engine_command(install_dir: Option<&Path>) -> PathBuf {
    let binary = if cfg!(windows) { "fmpp.bat" } else { "fmpp" };
    match install_dir {
        Some(dir) => dir.join("bin").join(binary),
        None => PathBuf::from(binary),
    }
}

fn data_is_empty(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Renders templates by delegating to the external FMPP engine.
///
/// All state is immutable configuration fixed at construction; every
/// render call stages its own randomly named artifacts, so concurrent
/// calls on one instance need no locking.
#[derive(Debug)]
pub struct Freemarker {
    temp: TempFiles,
    source_root: PathBuf,
    suffix: String,
    tag_syntax: TagSyntax,
    command: PathBuf,
    timeout: Option<Duration>,
}

impl Freemarker {
    pub fn new(options: Options) -> Self {
        let temp_dir = options.temp_dir.unwrap_or_else(std::env::temp_dir);
        let source_root = options.root.unwrap_or_else(|| temp_dir.clone());
        let suffix = format!(".{}", options.suffix.as_deref().unwrap_or("ftl"));
        let command = options
            .command
            .unwrap_or_else(|| engine_command(options.install_dir.as_deref()));

        Self {
            temp: TempFiles::new(temp_dir),
            source_root,
            suffix,
            tag_syntax: options.tag_syntax,
            command,
            timeout: options.timeout,
        }
    }

    /// A fresh temp path carrying the template suffix.
    fn temp_source_path(&self) -> PathBuf {
        let mut path = self.temp.new_path().into_os_string();
        path.push(&self.suffix);
        PathBuf::from(path)
    }

    /// Renders a template given as a source string.
    ///
    /// # Arguments
    /// * `source` - Template source text
    /// * `data` - Mapping of template variable names to values
    /// * `options` - Per-call options
    ///
    /// # Returns
    /// * `Result<String>` - Rendered output text
    pub fn render_text(
        &self,
        source: &str,
        data: &Value,
        options: &RenderOptions,
    ) -> Result<String> {
        let source = if options.includes_folder.is_some() {
            patch_source(source)
        } else {
            source.to_string()
        };

        let mut guard = self.temp.guard();
        let source_file = guard.track(self.temp_source_path());
        artifacts::write_artifact(&source_file, &source)?;

        self.render_file(&source_file.to_string_lossy(), data, options)
    }

    /// Renders a template referenced by identifier or absolute path.
    ///
    /// The reference is resolved against the configured source root
    /// with the canonical suffix applied. A non-empty `data` mapping is
    /// bound to template variables via a generated preamble; line
    /// numbers in engine errors are translated back to the original
    /// source coordinates.
    ///
    /// # Errors
    /// * `Error::ResolutionError` if `file` is empty
    /// * `Error::DataEmbeddingError` if `data` cannot be embedded
    /// * `Error::ProcessSpawnError` if the engine fails to start
    /// * `Error::RenderFailureError` if the engine reports failure
    pub fn render_file(
        &self,
        file: &str,
        data: &Value,
        options: &RenderOptions,
    ) -> Result<String> {
        if file.is_empty() {
            return Err(Error::ResolutionError("empty template reference".to_string()));
        }

        let resolved = resolve_source_path(file, &self.source_root, &self.suffix);
        debug!("Resolved template reference '{}' to {}", file, resolved.display());

        let mut guard = self.temp.guard();

        let (source_file, line_offset) = if data_is_empty(data) {
            (resolved, 0)
        } else {
            let preamble = build_preamble(data, self.tag_syntax)?;
            let original = artifacts::read_artifact(&resolved)?;
            let combined = guard.track(self.temp_source_path());
            artifacts::write_artifact(&combined, &format!("{}{}", preamble.text, original))?;
            debug!("Embedded data as a {}-line preamble", preamble.line_count);
            (combined, preamble.line_count)
        };

        self.invoke(&source_file, line_offset, options, &mut guard)
    }

    fn invoke(
        &self,
        source_file: &Path,
        line_offset: usize,
        options: &RenderOptions,
        guard: &mut CleanupGuard,
    ) -> Result<String> {
        let output_file = guard.track(self.temp.new_path());
        let data_file = guard.track(self.temp.new_path());
        let config_file = guard.track(self.temp.new_path());

        let mut config = EngineConfig::new();
        config.insert("sourceRoot".to_string(), self.source_root.display().to_string());
        config.insert("tagSyntax".to_string(), self.tag_syntax.as_str().to_string());
        config.insert("outputFile".to_string(), output_file.display().to_string());
        config.insert("sourceEncoding".to_string(), "UTF-8".to_string());
        config.insert("outputEncoding".to_string(), "UTF-8".to_string());
        config.insert("data".to_string(), format!("tdd({})", data_file.display()));

        if let Some(folder) = &options.includes_folder {
            patch_config(&mut config, folder);
        }

        // Top-level data travels via the preamble; the tdd side channel
        // stays an empty pass-through.
        artifacts::write_artifact(&data_file, "{}")?;
        artifacts::write_artifact(&config_file, &serialize_config(&config))?;

        let run = run_engine(&self.command, source_file, &config_file, self.timeout)?;

        if run.success {
            artifacts::read_artifact(&output_file)
        } else {
            let output = if line_offset > 0 {
                shift_line_numbers(&run.exit_log, line_offset)
            } else {
                run.exit_log
            };
            Err(Error::RenderFailureError { output })
        }
    }
}
