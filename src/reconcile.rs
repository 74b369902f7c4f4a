//! # Snapshot Reconciliation
//!
//! Compares the working `svn:externals` snapshot against the pristine (`BASE`)
//! snapshot and classifies every working entry:
//!
//! | base entry | definition differs | path on disk | status    |
//! |------------|--------------------|--------------|-----------|
//! | absent     | -                  | no           | `missing` |
//! | absent     | -                  | yes          | `new`     |
//! | present    | yes                | -            | `changed` |
//! | present    | no                 | no           | `missing` |
//! | present    | no                 | yes          | `clean`   |
//!
//! A failing existence check marks that one entry `error` and the batch
//! carries on. Existence is answered by a [`PathProbe`], so the reconciler
//! itself performs no I/O.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::definition::{
    ChangeDetail, ChangedField, ExternalDefinition, ExternalStatus, FieldChange,
};

/// Answers whether the directory of an external exists.
pub trait PathProbe {
    /// `full_path` is relative to the working-copy root.
    fn exists(&self, full_path: &str) -> io::Result<bool>;
}

impl<F> PathProbe for F
where
    F: Fn(&str) -> io::Result<bool>,
{
    fn exists(&self, full_path: &str) -> io::Result<bool> {
        self(full_path)
    }
}

/// A [`PathProbe`] backed by the real filesystem.
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PathProbe for FsProbe {
    fn exists(&self, full_path: &str) -> io::Result<bool> {
        self.root.join(Path::new(full_path)).try_exists()
    }
}

/// Assign a status and change detail to every working entry.
///
/// Output order matches `working`.
pub fn reconcile<P>(
    working: Vec<ExternalDefinition>,
    base: &[ExternalDefinition],
    probe: &P,
) -> Vec<ExternalDefinition>
where
    P: PathProbe + ?Sized,
{
    let base_lookup: HashMap<(&str, &str), &ExternalDefinition> =
        base.iter().map(|ext| (ext.key(), ext)).collect();

    working
        .into_iter()
        .map(|ext| {
            let base_ext = base_lookup.get(&ext.key()).copied();
            let (status, detail) = classify(&ext, base_ext, probe);
            ext.with_status(status, detail)
        })
        .collect()
}

/// Keep only externals whose definition differs from `BASE`.
pub fn changed_only(externals: Vec<ExternalDefinition>) -> Vec<ExternalDefinition> {
    externals
        .into_iter()
        .filter(|ext| matches!(ext.status, ExternalStatus::Changed | ExternalStatus::New))
        .collect()
}

fn classify<P>(
    working: &ExternalDefinition,
    base: Option<&ExternalDefinition>,
    probe: &P,
) -> (ExternalStatus, Option<ChangeDetail>)
where
    P: PathProbe + ?Sized,
{
    let Some(base) = base else {
        return match probe.exists(&working.full_path) {
            Ok(true) => (ExternalStatus::New, Some(ChangeDetail::Added)),
            Ok(false) => (ExternalStatus::Missing, None),
            Err(err) => probe_failed(working, err),
        };
    };

    let changes = diff(base, working);
    if !changes.is_empty() {
        return (ExternalStatus::Changed, Some(ChangeDetail::Modified(changes)));
    }

    match probe.exists(&working.full_path) {
        Ok(true) => (ExternalStatus::Clean, None),
        Ok(false) => (ExternalStatus::Missing, None),
        Err(err) => probe_failed(working, err),
    }
}

fn diff(
    base: &ExternalDefinition,
    working: &ExternalDefinition,
) -> BTreeMap<ChangedField, FieldChange> {
    [
        (ChangedField::Revision, &base.revision, &working.revision),
        (ChangedField::Url, &base.url, &working.url),
        (ChangedField::Path, &base.full_path, &working.full_path),
    ]
    .into_iter()
    .filter(|(_, old, new)| old != new)
    .map(|(field, old, new)| {
        (
            field,
            FieldChange {
                old: old.clone(),
                new: new.clone(),
            },
        )
    })
    .collect()
}

fn probe_failed(ext: &ExternalDefinition, err: io::Error) -> (ExternalStatus, Option<ChangeDetail>) {
    warn!("Cannot determine status of external {}: {}", ext.full_path, err);
    (ExternalStatus::Error, None)
}
