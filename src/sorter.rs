//! Routing every file of a source directory into the target folder whose
//! name it matches.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::json;

use crate::{
    audit::{AuditSink, Audited, Invocation},
    error::{Result, SortError},
    matching::{MatchResult, Matcher, exact_match, normalize},
    router::{free_destination, move_file},
};

/// A target folder; its directory name is the person name to look for.
#[derive(Debug, Clone)]
struct Folder {
    name: String,
    path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct Routed {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub folder: String,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failed {
    pub source: PathBuf,
    pub error: String,
}

/// Summary of one sorting run. In dry-run mode `moved` lists the planned
/// destinations.
#[derive(Debug, Default, Serialize)]
pub struct SortReport {
    pub moved: Vec<Routed>,
    pub unmatched: Vec<PathBuf>,
    pub failed: Vec<Failed>,
}

pub struct Sorter<S> {
    matcher: Matcher,
    audited: Audited<S>,
    dry_run: bool,
}

impl<S: AuditSink> Sorter<S> {
    pub fn new(matcher: Matcher, audited: Audited<S>) -> Self {
        Self {
            matcher,
            audited,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn audited(&self) -> &Audited<S> {
        &self.audited
    }

    /// Match every regular file of `source_dir` (by file stem) against the
    /// subdirectories of `target_dir` and move it into the matching one.
    ///
    /// A folder whose name is found verbatim wins outright; otherwise the
    /// folder with the highest fuzzy score is used, ties going to the
    /// folder that sorts first. Failed moves are collected in the report.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is not a directory or cannot be read.
    pub fn sort(&self, source_dir: &Path, target_dir: &Path) -> Result<SortReport> {
        let folders = list_folders(target_dir)?;
        let files = list_files(source_dir)?;
        info!(
            "Sorting {} files from {} into {} folders",
            files.len(),
            source_dir.display(),
            folders.len()
        );

        let mut report = SortReport::default();

        for source in files {
            let text = source
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            let Some((folder, result)) = self.route(&text, &folders) else {
                debug!("No folder matches '{text}'");
                report.unmatched.push(source);
                continue;
            };

            let destination = if self.dry_run {
                let planned = source
                    .file_name()
                    .map(|name| free_destination(&folder.path, name))
                    .ok_or_else(|| SortError::MissingFileName(source.clone()));
                planned.inspect(|path| {
                    info!("[dry run] {} -> {}", source.display(), path.display());
                })
            } else {
                self.audited.call(
                    Invocation::new(
                        "move_file",
                        json!({ "source": source, "destination_dir": folder.path }),
                    ),
                    || move_file(&source, &folder.path),
                )
            };

            match destination {
                Ok(destination) => report.moved.push(Routed {
                    source,
                    destination,
                    folder: folder.name.clone(),
                    result,
                }),
                Err(e) => report.failed.push(Failed {
                    source,
                    error: e.to_string(),
                }),
            }
        }

        info!(
            "Sorted: {} moved, {} unmatched, {} failed",
            report.moved.len(),
            report.unmatched.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn route<'f>(&self, text: &str, folders: &'f [Folder]) -> Option<(&'f Folder, MatchResult)> {
        let mut best: Option<(&Folder, MatchResult)> = None;

        for folder in folders {
            let arguments = json!({ "name": folder.name, "text": text });

            let exact = self.audited.observe(
                Invocation::new("exact_match", arguments.clone()),
                || exact_match(&folder.name, text),
            );
            if exact.is_match() {
                return Some((folder, exact));
            }

            let fuzzy = self.audited.observe(
                Invocation::new("find_name_in_string", arguments).with_options(json!({
                    "threshold": self.matcher.threshold(),
                    "strategy": self.matcher.strategy(),
                    "scorer": self.matcher.scorer(),
                })),
                || self.matcher.find(&folder.name, text),
            );

            let is_better = fuzzy.is_match()
                && best
                    .as_ref()
                    .is_none_or(|(_, current)| fuzzy.score() > current.score());
            if is_better {
                debug!("New best folder for '{text}': {} ({fuzzy:?})", folder.name);
                best = Some((folder, fuzzy));
            }
        }

        best
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(SortError::NotADirectory(path.to_path_buf()))
    }
}

fn list_folders(target_dir: &Path) -> Result<Vec<Folder>> {
    ensure_dir(target_dir)?;

    let mut folders = Vec::new();
    for entry in fs::read_dir(target_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if normalize(&name).is_empty() {
            warn!("Skipping folder with no usable name: {}", entry.path().display());
            continue;
        }
        folders.push(Folder {
            name,
            path: entry.path(),
        });
    }

    folders.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(folders)
}

fn list_files(source_dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(source_dir)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}
