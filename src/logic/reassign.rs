//! Manual edits to a built roster: move a player to another clan, reorder within a clan.
//!
//! Every operation takes the partition and hands back the updated one. Stale or invalid
//! arguments (unknown bucket, unknown player, index at the edge) leave it untouched.

use crate::models::{RegistrationId, RosterPartition};

/// Move `registration_id` out of bucket `from` and append it to bucket `to`.
///
/// Remaining members of `from` keep their relative order. `to` capacity is not checked.
/// With `from == to` the player ends up at the end of the same bucket.
pub fn move_player(
    mut partition: RosterPartition,
    registration_id: RegistrationId,
    from: usize,
    to: usize,
) -> RosterPartition {
    if to >= partition.buckets.len() {
        return partition;
    }
    let Some(source) = partition.buckets.get_mut(from) else {
        return partition;
    };
    let Some(pos) = source.members.iter().position(|&id| id == registration_id) else {
        return partition;
    };
    let id = source.members.remove(pos);
    partition.buckets[to].members.push(id);
    partition
}

/// Swap the member at `index` with the one above it. No-op at index 0.
pub fn move_up(mut partition: RosterPartition, bucket: usize, index: usize) -> RosterPartition {
    if let Some(b) = partition.buckets.get_mut(bucket) {
        if index > 0 && index < b.members.len() {
            b.members.swap(index, index - 1);
        }
    }
    partition
}

/// Swap the member at `index` with the one below it. No-op at the last index.
pub fn move_down(mut partition: RosterPartition, bucket: usize, index: usize) -> RosterPartition {
    if let Some(b) = partition.buckets.get_mut(bucket) {
        if index < b.members.len().saturating_sub(1) {
            b.members.swap(index, index + 1);
        }
    }
    partition
}
