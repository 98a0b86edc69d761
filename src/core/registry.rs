//! Registry: merges translation records from every artifact into one catalog.
//!
//! Merge rules, keyed by id:
//!
//! - dynamic record: queued as a diagnostic, never enters the catalog
//! - unseen id: registered, in insertion order
//! - same id and default text: resources appended (duplicates skipped)
//! - same id, other default text: the first default text stays; one conflict
//!   diagnostic per distinct `(id, default text)` pair, later observations of
//!   the same pair extending that diagnostic's resources
//!
//! Diagnostics are produced in discovery order by [`Registry::finalize`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use indexmap::IndexMap;

use crate::core::catalog::Catalog;
use crate::core::data::{TranslationRecord, TranslationValue};
use crate::issues::{ConflictIssue, DynamicUsageIssue, Issue};

#[derive(Debug)]
enum Pending {
    Dynamic(TranslationRecord),
    Conflict { id: String, record: TranslationRecord },
}

#[derive(Debug, Default)]
pub struct Registry {
    records: IndexMap<String, TranslationRecord>,
    pending: Vec<Pending>,
    /// Index into `pending` of the conflict for `(id, default text)`.
    conflicts: HashMap<(String, Option<TranslationValue>), usize>,
}

/// Result of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOutput {
    pub catalog: Catalog,
    /// Registered records, in catalog order, with all their usages.
    pub records: Vec<TranslationRecord>,
    pub issues: Vec<Issue>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, record: TranslationRecord) {
        if record.is_dynamic() {
            self.pending.push(Pending::Dynamic(record));
            return;
        }

        let Some(id) = record.id.as_literal().map(str::to_string) else {
            return;
        };

        let Some(existing) = self.records.get_mut(&id) else {
            self.records.insert(id, record);
            return;
        };

        if existing.is_mergeable_with(&record) {
            existing.absorb_resources(record.resources);
            return;
        }

        let key = (id, record.default_text.clone());
        match self.conflicts.get(&key) {
            Some(&index) => {
                if let Pending::Conflict { record: seen, .. } = &mut self.pending[index] {
                    seen.absorb_resources(record.resources);
                }
            }
            None => {
                self.conflicts.insert(key.clone(), self.pending.len());
                self.pending.push(Pending::Conflict { id: key.0, record });
            }
        }
    }

    pub fn merge_all(&mut self, records: impl IntoIterator<Item = TranslationRecord>) {
        for record in records {
            self.merge(record);
        }
    }

    /// Build the catalog and the diagnostics. Conflicts show the registered
    /// record with every usage accumulated by the end of the build.
    pub fn finalize(self) -> RegistryOutput {
        let catalog = Catalog::from_records(self.records.values());
        let issues = self
            .pending
            .into_iter()
            .filter_map(|pending| match pending {
                Pending::Dynamic(record) => {
                    Some(Issue::DynamicUsage(DynamicUsageIssue { record }))
                }
                Pending::Conflict { id, record } => {
                    let existing = self.records.get(&id)?.clone();
                    Some(Issue::Conflict(ConflictIssue {
                        existing,
                        conflicting: record,
                    }))
                }
            })
            .collect();

        RegistryOutput {
            catalog,
            records: self.records.into_values().collect(),
            issues,
        }
    }
}

/// A registry shared by concurrent scans.
///
/// Merges are serialized behind a mutex: "first seen" is the order in which
/// callers acquire the lock.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    inner: Mutex<Registry>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&self, record: TranslationRecord) {
        self.lock().merge(record);
    }

    /// Merge a whole batch without letting other callers interleave.
    pub fn merge_all(&self, records: impl IntoIterator<Item = TranslationRecord>) {
        self.lock().merge_all(records);
    }

    pub fn finalize(self) -> RegistryOutput {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .finalize()
    }

    // A panic mid-merge leaves the map consistent, so poisoning is ignored.
    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
