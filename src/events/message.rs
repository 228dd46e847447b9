use color_eyre::eyre::Report;

use crate::choice::ListEntry;

use super::Key;

/// Everything the prompt runner consumes: keypresses from the terminal and
/// settled search results reported back by spawned source tasks.
///
/// `SearchReady` carries the token minted when the search was dispatched;
/// the prompt uses it to drop results that a newer search has outdated.
#[derive(Debug)]
pub enum Message<T> {
    Input(Key),
    SearchReady {
        token: u64,
        outcome: Result<Vec<ListEntry<T>>, Report>,
    },
}
