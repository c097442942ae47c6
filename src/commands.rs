use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use crate::{emit_success, OutputMode};
use ftags::paths;
use ftags::ui::{self, Icons};
use ftags::{AssociationManager, FileRegistry, MatchMode, QueryEngine, StoreLocation, TagRegistry, TagStore};
use owo_colors::OwoColorize;

/// Number of tags shown under the statistics table
const TOP_TAGS: usize = 10;

/// What a set of positional arguments asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// No arguments
    ListTags,
    /// An existing path and nothing else
    ShowFile(PathBuf),
    /// An existing path followed by tag names
    Assign(PathBuf, Vec<String>),
    /// Arguments that are not an existing path are all tag names
    Query(Vec<String>),
}

impl Invocation {
    /// Decide by whether the first argument names an existing path.
    ///
    /// Paths are resolved against `cwd` and normalized.
    pub fn classify(args: &[String], cwd: &Path) -> Self {
        let Some((first, rest)) = args.split_first() else {
            return Invocation::ListTags;
        };

        let full_path = paths::absolutize(Path::new(first), cwd);
        if !full_path.exists() {
            return Invocation::Query(args.to_vec());
        }

        if rest.is_empty() {
            Invocation::ShowFile(full_path)
        } else {
            Invocation::Assign(full_path, rest.to_vec())
        }
    }
}

pub fn run_list_tags(store: &TagStore, show_unused: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let tags: Vec<_> = TagRegistry::new(store)
        .all()?
        .into_iter()
        .filter(|t| show_unused || !t.is_unused())
        .collect();

    if !output_mode.is_human() {
        return emit_success(output_mode, "tags", serde_json::to_value(&tags)?);
    }

    if tags.is_empty() {
        ui::warn("No tags yet. Tag a file with: ftags <path> <tag>...");
        return Ok(());
    }
    for tag in &tags {
        ui::tag_line(tag);
    }
    Ok(())
}

pub fn run_show_file(store: &TagStore, path: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let key = store.file_key(path);
    let file = FileRegistry::new(store).get_or_create(&key)?;

    if output_mode.is_human() {
        ui::file_line(&file);
        Ok(())
    } else {
        emit_success(output_mode, "file", serde_json::to_value(&file)?)
    }
}

pub fn run_assign(store: &TagStore, path: &Path, tags: &[String], output_mode: OutputMode) -> anyhow::Result<()> {
    let key = store.file_key(path);
    let file = AssociationManager::new(store).assign(&key, tags)?;
    tracing::debug!(file = %file.path, assigned = tags.len(), total = file.tags.len(), "tags assigned");

    if output_mode.is_human() {
        ui::success(&format!("{} {}", Icons::TAG, file.path));
        ui::file_line(&file);
        Ok(())
    } else {
        emit_success(output_mode, "assign", serde_json::to_value(&file)?)
    }
}

pub fn run_query(
    store: &TagStore,
    tags: &[String],
    mode: MatchMode,
    exec: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let files = QueryEngine::new(store).files_by_tags_with(tags, mode)?;

    if output_mode.is_human() {
        ui::header(&format!("{} files found:", files.len()));
        for file in &files {
            ui::file_line(file);
        }
    } else {
        emit_success(output_mode, "query", serde_json::to_value(&files)?)?;
    }

    if let Some(program) = exec {
        if files.is_empty() {
            tracing::debug!(program, "no files matched; not launching");
            return Ok(());
        }
        let targets: Vec<PathBuf> = files.iter().map(|f| store.resolve_key(&f.path)).collect();
        launch(program, &targets)?;
    }
    Ok(())
}

pub fn run_stats(store: &TagStore, location: &StoreLocation, output_mode: OutputMode) -> anyhow::Result<()> {
    let stats = QueryEngine::new(store).stats()?;
    let top: Vec<_> = TagRegistry::new(store).all()?.into_iter().take(TOP_TAGS).collect();

    if !output_mode.is_human() {
        let data = serde_json::json!({
            "store": location.path,
            "mode": location.mode,
            "stats": stats,
            "top_tags": top,
        });
        return emit_success(output_mode, "stats", data);
    }

    println!(
        "{} ftags statistics ({})",
        Icons::STATS,
        location.path.display().style(ui::theme().dim.clone())
    );
    println!("{}", ui::stats_table(&stats));
    if !top.is_empty() {
        ui::section("Top tags");
        println!("{}", ui::tags_table(&top));
    }
    Ok(())
}

/// Start `program` with `targets` as arguments without waiting for it
fn launch(program: &str, targets: &[PathBuf]) -> anyhow::Result<()> {
    tracing::debug!(program, count = targets.len(), "launching");
    Command::new(program)
        .args(targets)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to launch {program}: {e}"))?;
    Ok(())
}
