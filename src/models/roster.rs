//! ClanBucket, RosterPartition and RosterError.

use crate::models::clan::ClanDescriptor;
use crate::models::registration::{PlayerRegistration, RegistrationId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Errors that can occur while building a roster.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RosterError {
    /// No clans were supplied, so there is nowhere to put players.
    #[error("Aggiungi almeno un clan prima di assegnare i player")]
    EmptyClanList,
    /// A clan was declared with zero participants.
    #[error("Il clan {clan} deve avere almeno un partecipante")]
    ZeroCapacity { clan: String },
}

/// Unique identifier for an admin's roster session.
pub type RosterId = Uuid;

/// One clan's ordered list of assigned players. Holds ids only; the partition owns the records.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ClanBucket {
    pub descriptor: ClanDescriptor,
    pub members: Vec<RegistrationId>,
}

impl ClanBucket {
    pub fn new(descriptor: ClanDescriptor) -> Self {
        Self {
            descriptor,
            members: Vec::new(),
        }
    }

    /// How many players are still missing to reach the declared capacity (0 when full or over).
    pub fn deficit(&self) -> usize {
        (self.descriptor.capacity as usize).saturating_sub(self.members.len())
    }

    /// More members than declared. Informational only.
    pub fn is_over_capacity(&self) -> bool {
        self.members.len() > self.descriptor.capacity as usize
    }
}

/// Clans with their assigned players, plus the registrations snapshot they point into.
///
/// Registrations not referenced by any bucket are simply left out of the output.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RosterPartition {
    pub buckets: Vec<ClanBucket>,
    registrations: Vec<PlayerRegistration>,
    #[serde(skip)]
    index: HashMap<RegistrationId, usize>,
}

impl RosterPartition {
    /// Assemble a partition from buckets and the registrations they reference.
    pub fn from_parts(buckets: Vec<ClanBucket>, registrations: Vec<PlayerRegistration>) -> Self {
        let index = registrations
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id, i))
            .collect();
        Self {
            buckets,
            registrations,
            index,
        }
    }

    /// Look up a registration by id in this partition's snapshot.
    pub fn registration(&self, id: RegistrationId) -> Option<&PlayerRegistration> {
        self.index.get(&id).map(|&i| &self.registrations[i])
    }

    /// All registrations known to this partition, in registration order.
    pub fn registrations(&self) -> &[PlayerRegistration] {
        &self.registrations
    }

    /// Resolved members of a bucket, in bucket order. Empty for an unknown bucket.
    pub fn members(&self, bucket: usize) -> Vec<&PlayerRegistration> {
        self.buckets
            .get(bucket)
            .map(|b| {
                b.members
                    .iter()
                    .filter_map(|&id| self.registration(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of assigned players across all buckets.
    pub fn total_members(&self) -> usize {
        self.buckets.iter().map(|b| b.members.len()).sum()
    }

    /// True if no registration id appears in more than one place.
    pub fn is_exclusive(&self) -> bool {
        let mut seen = HashSet::new();
        self.buckets
            .iter()
            .flat_map(|b| b.members.iter())
            .all(|id| seen.insert(*id))
    }

    /// Index of the bucket currently holding `id`, if any.
    pub fn bucket_of(&self, id: RegistrationId) -> Option<usize> {
        self.buckets.iter().position(|b| b.members.contains(&id))
    }
}
