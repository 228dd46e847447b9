//! A snappy async autocomplete prompt for terminal apps 🐦
//!
//! As the user types, `beak` calls your async `source` function and paints a
//! live, navigable list of matching choices.  Overlapping searches are
//! resolved last-issued-wins, disabled entries and separators are skipped by
//! the cursor, and answers pass through optional `validate` and `filter`
//! hooks before the prompt resolves.
//!
//! ```no_run
//! use beak::{prompt, Choice, ListEntry, PromptConfig, Question};
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let config = PromptConfig::builder()
//!         .message("Favourite duck?")
//!         .source(|_answers, term| async move {
//!             let term = term.unwrap_or_default();
//!             Ok(["Mallard", "Eider", "Teal"]
//!                 .iter()
//!                 .filter(|d| d.to_lowercase().contains(&term.to_lowercase()))
//!                 .map(|d| Choice::new(d.to_string()).into())
//!                 .collect::<Vec<ListEntry<String>>>())
//!         })
//!         .build()?;
//!
//!     let answers = prompt([Question::new("duck", config).boxed()]).await?;
//!     println!("you said {}", answers["duck"]);
//!     Ok(())
//! }
//! ```

pub mod choice;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod logging;
pub mod prompt;
pub mod terminal;
pub mod ui;

pub use choice::{Choice, Disabled, ListEntry, Separator};
pub use config::{PromptConfig, PromptConfigBuilder, Theme};
pub use driver::{prompt, AnswerValue, Answers, Prompt, Question};
pub use error::PromptError;
pub use prompt::{AutocompletePrompt, Candidate, Status, Validation};
