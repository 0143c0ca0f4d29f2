//! Partitioning of PHID batches by embedded type tag.
//!
//! Classification is a pure function of the PHIDs: no store is consulted. Malformed
//! PHIDs are not rejected, they land in the [`PhidType::UNKNOWN`] group.

use std::collections::{HashMap, HashSet};

use phid_types::{Phid, PhidType};

/// PHIDs sharing one type tag, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhidGroup {
    pub phid_type: PhidType,
    pub phids: Vec<Phid>,
}

/// Groups PHIDs by type tag.
///
/// Every distinct input PHID appears in exactly one group; duplicates collapse.
/// Groups are ordered by the first appearance of their type in the input.
pub fn group_by_type(phids: &[Phid]) -> Vec<PhidGroup> {
    partition(phids, Phid::phid_type)
}

/// Groups transaction PHIDs by their subtype tag.
///
/// Transactions without a readable subtype are grouped under [`PhidType::UNKNOWN`].
pub fn group_by_subtype(phids: &[Phid]) -> Vec<PhidGroup> {
    partition(phids, |phid| phid.subtype().unwrap_or(PhidType::UNKNOWN))
}

/// Removes duplicates while keeping the first occurrence of each PHID.
pub fn dedup<I>(phids: I) -> Vec<Phid>
where
    I: IntoIterator,
    I::Item: Into<Phid>,
{
    let mut seen = HashSet::new();
    phids
        .into_iter()
        .map(Into::into)
        .filter(|phid: &Phid| seen.insert(phid.clone()))
        .collect()
}

fn partition(phids: &[Phid], key: impl Fn(&Phid) -> PhidType) -> Vec<PhidGroup> {
    let mut seen = HashSet::new();
    let mut index: HashMap<PhidType, usize> = HashMap::new();
    let mut groups: Vec<PhidGroup> = Vec::new();

    for phid in phids {
        if !seen.insert(phid) {
            continue;
        }
        let phid_type = key(phid);
        let slot = *index.entry(phid_type).or_insert_with(|| {
            groups.push(PhidGroup {
                phid_type,
                phids: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].phids.push(phid.clone());
    }

    groups
}
