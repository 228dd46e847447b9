use std::fmt::Display;

use itertools::Itertools;

use crate::choice::ListEntry;
use crate::config::Theme;

use super::style::{coloured, dim};

/// Renders the choice list to display lines.
///
/// Returns the joined block plus the display row the cursor entry starts on;
/// entries with multi-line names push later rows down, so the row index and
/// the entry index can differ.
pub(crate) fn render_entries<T: Display>(
    entries: &[ListEntry<T>],
    cursor: Option<usize>,
    theme: &Theme,
) -> (String, usize) {
    let mut active_row = 0;
    let mut row = 0;

    let rendered = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let text = match entry {
                ListEntry::Separator(s) => format!("  {}", dim(&s.label())),
                ListEntry::Choice(c) if c.disabled.is_disabled() => {
                    dim(&format!("- {} ({})", c.display_name(), c.disabled.label()))
                }
                ListEntry::Choice(c) if Some(i) == cursor => coloured(
                    &format!("{} {}", theme.pointer(), c.display_name()),
                    theme.highlight(),
                ),
                ListEntry::Choice(c) => format!("  {}", c.display_name()),
            };
            if Some(i) == cursor {
                active_row = row;
            }
            row += text.lines().count().max(1);
            text
        })
        .join("\n");

    (rendered, active_row)
}
