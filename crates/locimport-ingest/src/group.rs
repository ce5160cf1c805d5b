//! Region grouping.

use crate::record::LocationRecord;
use std::collections::HashMap;

/// Records sharing one region key, in input order.
///
/// The key is used verbatim as the folder display name and lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroup {
    pub key: String,
    pub records: Vec<LocationRecord>,
}

impl RegionGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Partition records by region.
///
/// Groups come out in the order their key was first seen; records keep their
/// relative input order inside a group. Keys compare as exact, case-sensitive
/// strings.
pub fn group_by_region(records: Vec<LocationRecord>) -> Vec<RegionGroup> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<RegionGroup> = Vec::new();

    for record in records {
        let slot = match slots.get(&record.region) {
            Some(&slot) => slot,
            None => {
                groups.push(RegionGroup {
                    key: record.region.clone(),
                    records: Vec::new(),
                });
                slots.insert(record.region.clone(), groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].records.push(record);
    }

    groups
}
