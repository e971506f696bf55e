//! Roster building: spread the registrations over the admin's clans.

use crate::models::{ClanBucket, ClanDescriptor, PlayerRegistration, RosterError, RosterPartition};

/// Build a fresh partition by round-robin: the i-th registration goes to clan `i mod clans.len()`.
///
/// 1. Reject an empty clan list and clans with zero capacity.
/// 2. One bucket per clan, in the given order.
/// 3. Deal registrations in store order. Capacity is not looked at here; it only feeds the
///    "missing players" line when rendering.
pub fn build_roster(
    clans: &[ClanDescriptor],
    registrations: &[PlayerRegistration],
) -> Result<RosterPartition, RosterError> {
    if clans.is_empty() {
        return Err(RosterError::EmptyClanList);
    }
    if let Some(c) = clans.iter().find(|c| c.capacity == 0) {
        return Err(RosterError::ZeroCapacity {
            clan: c.name.clone(),
        });
    }

    let mut buckets: Vec<ClanBucket> = clans.iter().cloned().map(ClanBucket::new).collect();
    for (i, r) in registrations.iter().enumerate() {
        buckets[i % clans.len()].members.push(r.id);
    }

    Ok(RosterPartition::from_parts(buckets, registrations.to_vec()))
}
