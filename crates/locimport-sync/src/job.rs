//! The schedulable import job: `execute` runs it, `stop` asks it to finish early.

use crate::cancel::CancelFlag;
use crate::config::DEFAULT_ROOT_KEY;
use crate::error::SyncError;
use crate::reconciler::Reconciler;
use crate::status::RunReport;
use locimport_ingest::{decode_records, InputSource};
use locimport_storage::ContentStore;
use std::sync::atomic::{AtomicBool, Ordering};

/// Imports one location dataset into a content store.
///
/// `stop` may be called from another thread at any time. A stop requested
/// before or during a run ends that run early; once a run has returned,
/// `stop` does nothing and the next `execute` starts with a clear flag.
pub struct LocationImportJob<S> {
    source: InputSource,
    store: S,
    root_key: String,
    cancel: CancelFlag,
    finished: AtomicBool,
}

impl<S: ContentStore> LocationImportJob<S> {
    pub fn new(source: InputSource, store: S) -> Self {
        Self {
            source,
            store,
            root_key: DEFAULT_ROOT_KEY.to_string(),
            cancel: CancelFlag::new(),
            finished: AtomicBool::new(false),
        }
    }

    pub fn with_root_key(mut self, root_key: impl Into<String>) -> Self {
        self.root_key = root_key.into();
        self
    }

    /// Share an existing flag, e.g. one registered with a signal handler.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    /// Request a cooperative stop. Idempotent; ignored once a run has returned.
    pub fn stop(&self) {
        if self.finished.load(Ordering::Acquire) {
            tracing::debug!("stop requested after the run finished, ignoring");
            return;
        }
        self.cancel.cancel();
    }

    /// Run to completion (or until stopped) and report the counts.
    ///
    /// The input is fully decoded before anything is written.
    pub fn run(&self) -> Result<RunReport, SyncError> {
        // a shared flag may have been tripped after the previous run returned
        if self.finished.swap(false, Ordering::AcqRel) {
            self.cancel.reset();
        }

        let result = self.import();
        self.finished.store(true, Ordering::Release);
        result
    }

    fn import(&self) -> Result<RunReport, SyncError> {
        tracing::info!(input = %self.source, root = %self.root_key, "starting location import");

        let reader = self.source.open().map_err(|source| SyncError::Input {
            input: self.source.to_string(),
            source,
        })?;
        let records = decode_records(reader)?;

        Reconciler::new(&self.store, &self.cancel).reconcile(&self.root_key, records)
    }

    /// Run and render the outcome as a status line.
    pub fn execute(&self) -> Result<String, SyncError> {
        self.run().map(|report| report.status_message())
    }
}
