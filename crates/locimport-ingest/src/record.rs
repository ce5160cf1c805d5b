//! Flat location records and their JSON decoding.

use serde::Deserialize;
use std::io::{BufReader, Read};

/// One location as it appears in the input document.
///
/// Immutable once decoded. Optional text fields that were missing or `null`
/// decode to empty strings; `address_line2` and `subdivision` are `None` when
/// absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationRecord {
    pub region: String,
    pub name: String,
    pub description: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub subdivision: Option<String>,
    pub postal_code: String,
    pub country: String,
}

impl LocationRecord {
    pub fn new(region: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed location document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("record {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
}

// Wire shape. Field names are camelCase; the PascalCase names of older exports
// (and `LocationName`) are accepted as aliases.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocationRecord {
    #[serde(alias = "Region")]
    region: Option<String>,
    #[serde(alias = "locationName", alias = "LocationName", alias = "Name")]
    name: Option<String>,
    #[serde(alias = "Description")]
    description: Option<String>,
    #[serde(alias = "AddressLine1")]
    address_line1: Option<String>,
    #[serde(alias = "AddressLine2")]
    address_line2: Option<String>,
    #[serde(alias = "City")]
    city: Option<String>,
    #[serde(alias = "Subdivision")]
    subdivision: Option<String>,
    #[serde(alias = "PostalCode")]
    postal_code: Option<String>,
    #[serde(alias = "Country")]
    country: Option<String>,
}

fn required(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, DecodeError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DecodeError::MissingField { index, field }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawLocationRecord {
    fn into_record(self, index: usize) -> Result<LocationRecord, DecodeError> {
        Ok(LocationRecord {
            region: required(self.region, index, "region")?,
            name: required(self.name, index, "name")?,
            description: self.description.unwrap_or_default(),
            address_line1: self.address_line1.unwrap_or_default(),
            address_line2: non_blank(self.address_line2),
            city: self.city.unwrap_or_default(),
            subdivision: non_blank(self.subdivision),
            postal_code: self.postal_code.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
        })
    }
}

/// Decode an ordered sequence of records from a JSON byte stream.
///
/// The whole document is validated before anything is returned, so a single
/// bad record fails the batch.
pub fn decode_records<R: Read>(reader: R) -> Result<Vec<LocationRecord>, DecodeError> {
    let raw: Vec<RawLocationRecord> = serde_json::from_reader(BufReader::new(reader))?;
    finish(raw)
}

pub fn decode_slice(bytes: &[u8]) -> Result<Vec<LocationRecord>, DecodeError> {
    let raw: Vec<RawLocationRecord> = serde_json::from_slice(bytes)?;
    finish(raw)
}

fn finish(raw: Vec<RawLocationRecord>) -> Result<Vec<LocationRecord>, DecodeError> {
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, r)| r.into_record(index))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(records = records.len(), "decoded location records");
    Ok(records)
}
