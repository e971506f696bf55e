//! Roster message text: what the admin previews, copies into the clan chat and exports to PDF.

use crate::models::RosterPartition;
use std::fmt::Write;

/// Render the partition as the CWL roster message.
///
/// Per clan, in partition order:
///
/// ```text
/// <league tier>
///
/// <clan name> <capacity> partecipanti
///
/// 1) <player> <level>
/// 2) <player> <level>
///
/// Mancano ancora <deficit> player     (only when short of capacity)
///
/// ---
///
/// ```
///
/// Numbering restarts at 1 for every clan.
pub fn render_message(partition: &RosterPartition) -> String {
    let mut out = String::new();
    for (i, bucket) in partition.buckets.iter().enumerate() {
        let d = &bucket.descriptor;
        // Writing into a String cannot fail.
        let _ = write!(out, "{}\n\n", d.league_tier);
        let _ = write!(out, "{} {} partecipanti\n\n", d.name, d.capacity);

        for (n, player) in partition.members(i).into_iter().enumerate() {
            let _ = writeln!(out, "{}) {}", n + 1, player.display_line());
        }

        let deficit = bucket.deficit();
        if deficit > 0 {
            let _ = write!(out, "\nMancano ancora {} player\n", deficit);
        }

        out.push_str("\n---\n\n");
    }
    out
}
