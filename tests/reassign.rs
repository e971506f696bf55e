//! Integration tests for moving and reordering players in a built roster.

use cwl_roster_web::{
    build_roster, move_down, move_player, move_up, ClanDescriptor, PlayerRegistration,
    RosterPartition,
};
use proptest::prelude::*;
use uuid::Uuid;

/// Ann, Bo, Cid over two clans of capacity 2: [Ann, Cid] and [Bo].
fn scenario_b() -> (RosterPartition, Vec<PlayerRegistration>) {
    let regs = vec![
        PlayerRegistration::new("Ann", "TH14"),
        PlayerRegistration::new("Bo", "TH13"),
        PlayerRegistration::new("Cid", "TH12"),
    ];
    let clans = vec![
        ClanDescriptor::new("Eclipse", 2, "Gold League"),
        ClanDescriptor::new("Nova", 2, "Silver League"),
    ];
    (build_roster(&clans, &regs).unwrap(), regs)
}

fn roster_of(n: usize, clan_count: usize) -> RosterPartition {
    let regs: Vec<_> = (0..n)
        .map(|i| PlayerRegistration::new(format!("P{i}"), "TH13"))
        .collect();
    let clans: Vec<_> = (0..clan_count)
        .map(|i| ClanDescriptor::new(format!("Clan{i}"), 5, "Gold League"))
        .collect();
    build_roster(&clans, &regs).unwrap()
}

#[test]
fn move_player_appends_to_target() {
    let (p, regs) = scenario_b();
    let p = move_player(p, regs[2].id, 0, 1);
    assert_eq!(p.buckets[0].members, vec![regs[0].id]);
    assert_eq!(p.buckets[1].members, vec![regs[1].id, regs[2].id]);
}

#[test]
fn move_player_keeps_order_of_remaining_members() {
    let p = roster_of(6, 1);
    let ids = p.buckets[0].members.clone();
    let p = move_player(p, ids[0], 0, 0);
    assert_eq!(p.buckets[0].members, vec![ids[1], ids[2], ids[3], ids[4], ids[5], ids[0]]);
}

#[test]
fn move_player_ignores_capacity() {
    let (p, regs) = scenario_b();
    let p = move_player(p, regs[1].id, 1, 0);
    assert_eq!(p.buckets[0].members.len(), 3);
    assert!(p.buckets[0].is_over_capacity());
    assert!(p.buckets[1].members.is_empty());
}

#[test]
fn move_player_unknown_or_wrong_bucket_is_noop() {
    let (p, regs) = scenario_b();
    let before = p.clone();
    let p = move_player(p, Uuid::new_v4(), 0, 1);
    assert_eq!(p, before);
    // Bo lives in bucket 1, not 0.
    let p = move_player(p, regs[1].id, 0, 1);
    assert_eq!(p, before);
    let p = move_player(p, regs[0].id, 5, 1);
    assert_eq!(p, before);
    let p = move_player(p, regs[0].id, 0, 9);
    assert_eq!(p, before);
}

#[test]
fn move_up_at_top_is_noop() {
    let (p, _) = scenario_b();
    let before = p.clone();
    let p = move_up(p, 0, 0);
    assert_eq!(p, before);
    let p = move_up(p, 1, 0);
    assert_eq!(p, before);
}

#[test]
fn move_up_swaps_with_previous() {
    let (p, regs) = scenario_b();
    let p = move_up(p, 0, 1);
    assert_eq!(p.buckets[0].members, vec![regs[2].id, regs[0].id]);
}

#[test]
fn move_down_at_bottom_is_noop() {
    let (p, _) = scenario_b();
    let before = p.clone();
    let p = move_down(p, 0, 1);
    assert_eq!(p, before);
    let p = move_down(p, 1, 0);
    assert_eq!(p, before);
}

#[test]
fn move_down_swaps_with_next() {
    let (p, regs) = scenario_b();
    let p = move_down(p, 0, 0);
    assert_eq!(p.buckets[0].members, vec![regs[2].id, regs[0].id]);
}

#[test]
fn reorder_out_of_range_is_noop() {
    let (p, _) = scenario_b();
    let before = p.clone();
    let p = move_up(p, 0, 42);
    let p = move_down(p, 0, 42);
    let p = move_up(p, 3, 1);
    let p = move_down(p, 3, 0);
    assert_eq!(p, before);
}

#[test]
fn extreme_indices_are_noops() {
    let (p, regs) = scenario_b();
    let before = p.clone();
    let p = move_down(p, 0, usize::MAX);
    let p = move_down(p, usize::MAX, 0);
    let p = move_up(p, 0, usize::MAX);
    let p = move_up(p, usize::MAX, usize::MAX);
    let p = move_player(p, regs[0].id, usize::MAX, 1);
    let p = move_player(p, regs[0].id, 0, usize::MAX);
    let p = move_player(p, regs[0].id, usize::MAX, usize::MAX);
    assert_eq!(p, before);
}

#[test]
fn move_down_on_empty_bucket_is_noop() {
    let p = roster_of(0, 2);
    let before = p.clone();
    let p = move_down(p, 0, 0);
    let p = move_up(p, 1, 0);
    assert_eq!(p, before);
}

proptest! {
    #[test]
    fn reorders_with_any_index_keep_members(
        n in 0usize..10,
        bucket in any::<usize>(),
        index in any::<usize>(),
    ) {
        let p = roster_of(n, 2);
        let mut before: Vec<_> = p.buckets.iter().flat_map(|b| b.members.clone()).collect();
        let p = move_up(p, bucket, index);
        let p = move_down(p, bucket, index);
        let mut after: Vec<_> = p.buckets.iter().flat_map(|b| b.members.clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn moves_preserve_total_count(
        n in 1usize..30,
        clan_count in 1usize..5,
        moves in proptest::collection::vec((0usize..30, 0usize..5, 0usize..5), 0..40),
    ) {
        let mut p = roster_of(n, clan_count);
        let ids: Vec<_> = p.registrations().iter().map(|r| r.id).collect();
        for (who, from, to) in moves {
            p = move_player(p, ids[who % n], from, to);
            prop_assert_eq!(p.total_members(), n);
            prop_assert!(p.is_exclusive());
        }
    }

    #[test]
    fn move_up_then_down_restores_order(n in 2usize..20, index in 1usize..20) {
        let p = roster_of(n, 1);
        let index = index % n;
        prop_assume!(index > 0);
        let before = p.buckets[0].members.clone();
        let p = move_up(p, 0, index);
        let p = move_down(p, 0, index - 1);
        prop_assert_eq!(&p.buckets[0].members, &before);
    }
}
