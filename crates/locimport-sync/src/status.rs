//! Run outcomes and their human-readable status line.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every region was processed.
    Completed,
    /// Stopped part way through.
    Stopped,
    /// Stopped before any region was started.
    NotStarted,
}

/// What one run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub folders_created: usize,
    pub locations_created: usize,
    pub locations_skipped: usize,
}

impl RunReport {
    pub fn status_message(&self) -> String {
        status_message(self.folders_created, self.locations_created, self.outcome)
    }

    pub fn is_stopped(&self) -> bool {
        !matches!(self.outcome, RunOutcome::Completed)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_message())
    }
}

pub fn status_message(folders: usize, locations: usize, outcome: RunOutcome) -> String {
    match outcome {
        RunOutcome::Completed => {
            format!("Success: {folders} folders and {locations} locations imported.")
        }
        RunOutcome::Stopped => {
            format!("Stopped: {folders} folders and {locations} locations imported.")
        }
        RunOutcome::NotStarted => "Stopped before any records were imported.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_stopped_templates() {
        assert_eq!(
            status_message(2, 7, RunOutcome::Completed),
            "Success: 2 folders and 7 locations imported."
        );
        assert_eq!(
            status_message(1, 0, RunOutcome::Stopped),
            "Stopped: 1 folders and 0 locations imported."
        );
    }

    #[test]
    fn not_started_ignores_counts() {
        assert_eq!(
            status_message(0, 0, RunOutcome::NotStarted),
            "Stopped before any records were imported."
        );
    }

    #[test]
    fn report_display_matches_status() {
        let report = RunReport {
            outcome: RunOutcome::Completed,
            folders_created: 0,
            locations_created: 0,
            locations_skipped: 12,
        };
        assert_eq!(report.to_string(), "Success: 0 folders and 0 locations imported.");
        assert!(!report.is_stopped());
    }
}
