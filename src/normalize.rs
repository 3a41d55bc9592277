//! Per-file header normalization pipeline.
//!
//! extract → derive directives → render → write if changed. Each file is
//! processed on its own; a failure is recorded in the [`Report`] and the
//! next file is still attempted.

use crate::comment;
use crate::directive::{self, Directives};
use crate::error::{ErrorKind, HeaderError};
use crate::vcs::History;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Knobs for [`Normalizer`].
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base name (without extension) that gets no `\class` directive.
    pub entry_point: String,
    /// Report pending changes instead of writing them.
    pub check: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            entry_point: "main".to_string(),
            check: false,
        }
    }
}

/// What happened to a file that was processed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Updated,
    Unchanged,
    /// Check mode only: the header differs but was not written.
    WouldUpdate,
}

/// A file that could not be normalized.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

impl Failure {
    pub fn kind(&self) -> Option<ErrorKind> {
        self.error.downcast_ref::<HeaderError>().map(HeaderError::kind)
    }
}

/// Aggregate outcome of a run.
#[derive(Debug, Default)]
pub struct Report {
    pub updated: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub pending: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl Report {
    /// Record one file's outcome, returning the failure if it was one.
    pub fn record(
        &mut self,
        path: &Path,
        outcome: Result<Change, HeaderError>,
    ) -> Option<&Failure> {
        let path = path.to_path_buf();
        match outcome {
            Ok(Change::Updated) => self.updated.push(path),
            Ok(Change::Unchanged) => self.unchanged.push(path),
            Ok(Change::WouldUpdate) => self.pending.push(path),
            Err(err) => {
                let error =
                    anyhow::Error::new(err).context(format!("failed to update {}", path.display()));
                self.failures.push(Failure { path, error });
                return self.failures.last();
            }
        }
        None
    }

    /// No failures and, in check mode, nothing left to rewrite.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.pending.is_empty()
    }
}

/// Rewrites file headers from history supplied by `H`.
pub struct Normalizer<H> {
    history: H,
    settings: Settings,
    today: NaiveDate,
}

impl<H: History> Normalizer<H> {
    pub fn new(history: H, settings: Settings, today: NaiveDate) -> Self {
        Self {
            history,
            settings,
            today,
        }
    }

    /// Compute the regenerated directives for `path`.
    ///
    /// A dirty file is credited to the current user and dated today;
    /// a clean one keeps its committed authors and last commit date.
    pub fn directives(&self, path: &Path) -> Result<Directives, HeaderError> {
        let dirty = self.history.is_dirty(path)?;
        let mut names = self.history.authors(path)?;
        let date = if dirty {
            names.push(self.history.user_name()?);
            self.today.format("%Y-%m-%d").to_string()
        } else {
            self.history.last_commit_date(path)?
        };
        debug!(path = %path.display(), dirty, "derived directives");
        Ok(Directives {
            class: Directives::class_for(path, &self.settings.entry_point),
            authors: directive::collect_authors(names),
            date,
        })
    }

    /// Normalize a single file's header.
    pub fn normalize(&self, path: &Path) -> Result<Change, HeaderError> {
        let original = fs::read_to_string(path).map_err(HeaderError::Read)?;
        let header = comment::extract(&original).ok_or(HeaderError::MissingHeader)?;

        let description = directive::strip_directives(&header);
        let text = self.directives(path)?.assemble(&description);
        let updated = comment::replace(&original, &text);

        if updated == original {
            return Ok(Change::Unchanged);
        }
        if self.settings.check {
            return Ok(Change::WouldUpdate);
        }
        fs::write(path, updated).map_err(HeaderError::Write)?;
        Ok(Change::Updated)
    }

    /// Normalize every path in order, printing diagnostics as failures occur.
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> Report {
        let mut report = Report::default();
        for path in paths {
            let path = path.as_ref();
            let outcome = self.normalize(path);
            match &outcome {
                Ok(Change::Updated) => info!(path = %path.display(), "updated header"),
                Ok(Change::Unchanged) => info!(path = %path.display(), "header unchanged"),
                Ok(Change::WouldUpdate) => println!("would update {}", path.display()),
                Err(_) => {}
            }
            if let Some(failure) = report.record(path, outcome) {
                eprintln!("error: {:#}", failure.error);
            }
        }
        report
    }
}
