//! Integration tests for PDF export.

use cwl_roster_web::export::wrap_lines;
use cwl_roster_web::{build_roster, export_pdf, render_message, ClanDescriptor, PlayerRegistration};

#[test]
fn exported_roster_is_a_pdf() {
    let regs = vec![
        PlayerRegistration::new("Ann", "TH14"),
        PlayerRegistration::new("Bo", "TH13"),
    ];
    let clans = vec![ClanDescriptor::new("Eclipse", 15, "Gold League")];
    let message = render_message(&build_roster(&clans, &regs).unwrap());
    let bytes = export_pdf(&message).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn long_rosters_span_pages() {
    let regs: Vec<_> = (0..120)
        .map(|i| PlayerRegistration::new(format!("Player{i}"), "TH13"))
        .collect();
    let clans = vec![
        ClanDescriptor::new("Eclipse", 50, "Gold League"),
        ClanDescriptor::new("Nova", 50, "Silver League"),
    ];
    let message = render_message(&build_roster(&clans, &regs).unwrap());
    let bytes = export_pdf(&message).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn wrap_keeps_short_and_blank_lines() {
    assert_eq!(wrap_lines("a\n\nb", 10), vec!["a", "", "b"]);
}

#[test]
fn wrap_breaks_on_words() {
    assert_eq!(
        wrap_lines("one two three four", 9),
        vec!["one two", "three", "four"]
    );
}

#[test]
fn wrap_splits_overlong_words() {
    assert_eq!(wrap_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
}
