//! The reconciliation loop.
//!
//! One run walks the region groups in order. For each region it finds or
//! creates the folder, snapshots the entry names already stored there, and
//! creates an entry for every record whose name is not yet in that set. The
//! set grows as entries are created, so duplicate names inside one batch
//! collapse to a single entry.
//!
//! The cancel flag is polled before each region and before each record. A
//! create that has started always finishes.

use crate::cancel::CancelFlag;
use crate::error::SyncError;
use crate::lookup::{existing_entry_names, find_region_folder};
use crate::status::{RunOutcome, RunReport};
use locimport_ingest::{group_by_region, LocationRecord, RegionGroup};
use locimport_storage::{ContentRef, ContentStore, LocationContent};

/// Counters for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    pub folders_created: usize,
    pub locations_created: usize,
    pub locations_skipped: usize,
    pub regions_started: usize,
}

impl RunState {
    fn finish(self, outcome: RunOutcome) -> RunReport {
        RunReport {
            outcome,
            folders_created: self.folders_created,
            locations_created: self.locations_created,
            locations_skipped: self.locations_skipped,
        }
    }

    fn stopped(self) -> RunReport {
        if self.regions_started == 0 {
            self.finish(RunOutcome::NotStarted)
        } else {
            self.finish(RunOutcome::Stopped)
        }
    }
}

/// Project an input record onto the stored location content type.
pub fn location_content(record: &LocationRecord) -> LocationContent {
    LocationContent {
        location_name: record.name.clone(),
        description: record.description.clone(),
        address_line1: record.address_line1.clone(),
        address_line2: record.address_line2.clone(),
        city: record.city.clone(),
        subdivision: record.subdivision.clone(),
        postal_code: record.postal_code.clone(),
        country: record.country.clone(),
    }
}

pub struct Reconciler<'a, S: ContentStore + ?Sized> {
    store: &'a S,
    cancel: &'a CancelFlag,
}

impl<'a, S: ContentStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a S, cancel: &'a CancelFlag) -> Self {
        Self { store, cancel }
    }

    /// Resolve the root registered under `root_key` and merge `records` into it.
    pub fn reconcile(
        &self,
        root_key: &str,
        records: Vec<LocationRecord>,
    ) -> Result<RunReport, SyncError> {
        if self.cancel.is_cancelled() {
            tracing::info!("import stopped before any records were read");
            return Ok(RunState::default().stopped());
        }

        let root = self
            .store
            .resolve_root(root_key)?
            .ok_or_else(|| SyncError::Configuration {
                root_key: root_key.to_string(),
            })?;

        self.run(root, group_by_region(records))
    }

    /// Merge already-grouped records under `root`.
    pub fn run(&self, root: ContentRef, groups: Vec<RegionGroup>) -> Result<RunReport, SyncError> {
        let mut state = RunState::default();
        tracing::info!(root = %root, regions = groups.len(), "reconciling locations");

        for group in groups {
            if self.cancel.is_cancelled() {
                tracing::info!(
                    folders = state.folders_created,
                    locations = state.locations_created,
                    "import stopped"
                );
                return Ok(state.stopped());
            }
            state.regions_started += 1;

            if self.reconcile_region(root, group, &mut state)? == Flow::Stop {
                tracing::info!(
                    folders = state.folders_created,
                    locations = state.locations_created,
                    "import stopped"
                );
                return Ok(state.stopped());
            }
        }

        tracing::info!(
            folders = state.folders_created,
            locations = state.locations_created,
            skipped = state.locations_skipped,
            "import completed"
        );
        Ok(state.finish(RunOutcome::Completed))
    }

    fn reconcile_region(
        &self,
        root: ContentRef,
        group: RegionGroup,
        state: &mut RunState,
    ) -> Result<Flow, SyncError> {
        let folder = match find_region_folder(self.store, root, &group.key)? {
            Some(folder) => folder,
            None => {
                let folder = self
                    .store
                    .create_folder(root, &group.key)
                    .inspect_err(|err| {
                        tracing::warn!(region = %group.key, error = %err, "failed to create region folder");
                    })?;
                state.folders_created += 1;
                tracing::info!(region = %group.key, folder = %folder, "created region folder");
                folder
            }
        };

        let mut names = existing_entry_names(self.store, folder)?;

        for record in group.records {
            if self.cancel.is_cancelled() {
                return Ok(Flow::Stop);
            }

            if names.contains(&record.name) {
                state.locations_skipped += 1;
                tracing::debug!(region = %group.key, name = %record.name, "location exists, skipping");
                continue;
            }

            let entry = self
                .store
                .create_entry(folder, &location_content(&record))
                .inspect_err(|err| {
                    tracing::warn!(
                        region = %group.key,
                        name = %record.name,
                        error = %err,
                        "failed to create location"
                    );
                })?;
            tracing::debug!(region = %group.key, name = %record.name, entry = %entry, "created location");
            names.insert(record.name);
            state.locations_created += 1;
        }

        Ok(Flow::Continue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_copies_every_field() {
        let record = LocationRecord {
            region: "East".to_string(),
            name: "Harbor".to_string(),
            description: "HQ".to_string(),
            address_line1: "1 Dock St".to_string(),
            address_line2: Some("Suite 4".to_string()),
            city: "Boston".to_string(),
            subdivision: Some("MA".to_string()),
            postal_code: "02110".to_string(),
            country: "US".to_string(),
        };

        let content = location_content(&record);
        assert_eq!(content.location_name, "Harbor");
        assert_eq!(content.description, "HQ");
        assert_eq!(content.address_line1, "1 Dock St");
        assert_eq!(content.address_line2.as_deref(), Some("Suite 4"));
        assert_eq!(content.city, "Boston");
        assert_eq!(content.subdivision.as_deref(), Some("MA"));
        assert_eq!(content.postal_code, "02110");
        assert_eq!(content.country, "US");
    }

    #[test]
    fn stopped_state_without_regions_is_not_started() {
        assert_eq!(RunState::default().stopped().outcome, RunOutcome::NotStarted);

        let state = RunState {
            regions_started: 1,
            ..Default::default()
        };
        assert_eq!(state.stopped().outcome, RunOutcome::Stopped);
    }
}
