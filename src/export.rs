use crate::error::{ExportError, WorkflowError};
use crate::metadata;
use crate::resolver::PromptResolver;
use crate::workflow::WorkflowDocument;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, FileTimes};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// What gets written for each processed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// The positive prompt (or the negative one if that is all there is) as `.txt`.
    #[default]
    Prompt,
    /// Both prompts as `{"positive": ..., "negative": ...}` in `.json`.
    Both,
    /// The whole embedded workflow, pretty-printed, as `.json`.
    Workflow,
}

impl ExportMode {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportMode::Prompt => "txt",
            ExportMode::Both | ExportMode::Workflow => "json",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ExportMode::Prompt => "prompt",
            ExportMode::Both => "prompts JSON",
            ExportMode::Workflow => "workflow JSON",
        }
    }
}

/// Settings shared by every file of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub output_dir: PathBuf,
    pub mode: ExportMode,
    /// Overwrite outputs that already exist instead of skipping them.
    pub force: bool,
}

impl ExtractOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            mode: ExportMode::default(),
            force: false,
        }
    }

    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// `<output_dir>/<input stem>.<txt|json>`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
        name.push(".");
        name.push(self.mode.extension());
        self.output_dir.join(name)
    }
}

/// What happened to one input image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    /// The output already existed and `force` was off.
    Skipped(PathBuf),
    /// The image carries no embedded workflow.
    NoWorkflow,
    /// A workflow was found but no prompt could be recovered from it.
    NoPrompt,
}

/// Extracts from one image according to `options`.
///
/// Timestamp mirroring is best effort: a failure is logged and the file still
/// counts as written.
pub fn process_image(
    input: &Path,
    options: &ExtractOptions,
    resolver: &PromptResolver,
) -> Result<FileOutcome, ExportError> {
    let output = options.output_path(input);
    if output.exists() {
        if !options.force {
            info!(
                input = %input.display(),
                output = %output.display(),
                "skipping, {} file already exists (use --force to overwrite)",
                options.mode.describe()
            );
            return Ok(FileOutcome::Skipped(output));
        }
        info!(output = %output.display(), "overwriting existing {} file", options.mode.describe());
    }

    info!(input = %input.display(), "processing");
    let Some(text) = metadata::workflow_text_from_file(input)? else {
        info!(input = %input.display(), "no workflow metadata found");
        return Ok(FileOutcome::NoWorkflow);
    };

    let contents = match options.mode {
        ExportMode::Workflow => {
            let value: Value =
                serde_json::from_str(&text).map_err(|e| WorkflowError::Decode(e.to_string()))?;
            to_pretty_json(&value)?
        }
        ExportMode::Both => {
            let document: WorkflowDocument = text.parse()?;
            to_pretty_json(&resolver.resolve(&document)?)?
        }
        ExportMode::Prompt => {
            let document: WorkflowDocument = text.parse()?;
            let prompts = resolver.resolve(&document)?;
            match prompts.primary() {
                Some(prompt) => prompt.to_string(),
                None => {
                    info!(input = %input.display(), "no prompt found, no output file created");
                    return Ok(FileOutcome::NoPrompt);
                }
            }
        }
    };

    fs::write(&output, contents).map_err(|e| io_error(&output, e))?;
    info!(output = %output.display(), "created {} file", options.mode.describe());

    match copy_timestamps(input, &output) {
        Ok(()) => info!(output = %output.display(), "updated timestamp to match source"),
        Err(e) => warn!(output = %output.display(), "could not set timestamp: {}", e),
    }
    Ok(FileOutcome::Written(output))
}

/// Sets the access and modification times of `to` to those of `from`.
pub fn copy_timestamps(from: &Path, to: &Path) -> Result<(), ExportError> {
    let source = fs::metadata(from).map_err(|e| io_error(from, e))?;
    let accessed = source.accessed().map_err(|e| io_error(from, e))?;
    let modified = source.modified().map_err(|e| io_error(from, e))?;

    let target = fs::File::options()
        .write(true)
        .open(to)
        .map_err(|e| io_error(to, e))?;
    target
        .set_times(
            FileTimes::new()
                .set_accessed(accessed)
                .set_modified(modified),
        )
        .map_err(|e| io_error(to, e))
}

/// The `*.png` files directly inside `dir`, sorted by path.
pub fn png_files_in(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| ExportError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "png") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files.into_iter().sorted().collect())
}

/// Creates the output directory (and parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))
}

/// Tally of outcomes across a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub written: usize,
    pub skipped: usize,
    pub without_workflow: usize,
    pub without_prompt: usize,
    pub failed: usize,
}

impl ExtractSummary {
    pub fn record(&mut self, result: &Result<FileOutcome, ExportError>) {
        match result {
            Ok(FileOutcome::Written(_)) => self.written += 1,
            Ok(FileOutcome::Skipped(_)) => self.skipped += 1,
            Ok(FileOutcome::NoWorkflow) => self.without_workflow += 1,
            Ok(FileOutcome::NoPrompt) => self.without_prompt += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.written + self.skipped + self.without_workflow + self.without_prompt + self.failed
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    serde_json::to_string_pretty(value).map_err(|e| ExportError::Serialize(e.to_string()))
}

fn io_error(path: &Path, e: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
