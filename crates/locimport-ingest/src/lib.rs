//! Location record ingestion.
//!
//! Turns an external location dataset into the shapes the reconciler works on:
//!
//! - [`decode_records`] reads a JSON array of flat location records.
//! - [`group_by_region`] partitions records by region, keeping first-seen order.
//! - [`InputSource`] names where the bytes come from (a file or an in-memory buffer).
//!
//! Nothing here touches storage. Validation is limited to the basic record
//! shape: `region` and `name` must be present and non-blank.

pub mod group;
pub mod record;
pub mod source;

pub use group::{group_by_region, RegionGroup};
pub use record::{decode_records, decode_slice, DecodeError, LocationRecord};
pub use source::InputSource;
