//! Location import and reconciliation.
//!
//! Merges a batch of location records into the content tree, creating only
//! what is missing:
//!
//! ```text
//! InputSource ──► decode ──► group by region ──► Reconciler ──► status string
//!                                                   │
//!                              find/create folder ◄─┤
//!                              existing names     ◄─┤
//!                              create entries     ◄─┘
//! ```
//!
//! Runs are idempotent: entries are keyed by location name within their
//! region folder, so re-running after a failure or a stop resumes where the
//! previous run left off. A run can be stopped cooperatively through a
//! [`CancelFlag`]; stopping is reported in the status string, not as an error.

pub mod cancel;
pub mod config;
pub mod error;
pub mod job;
pub mod lookup;
pub mod reconciler;
pub mod status;

pub use cancel::CancelFlag;
pub use config::{ConfigError, ImportConfig, DEFAULT_ROOT_GUID, DEFAULT_ROOT_KEY};
pub use error::SyncError;
pub use job::LocationImportJob;
pub use lookup::{existing_entry_names, find_region_folder};
pub use reconciler::{location_content, Reconciler, RunState};
pub use status::{status_message, RunOutcome, RunReport};
