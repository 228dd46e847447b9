use std::fmt::Display;

use color_eyre::eyre::Report;
use crossterm::style::Color;
use tracing::debug;

use crate::choice::{first_selectable, step_selectable, Choice, ListEntry};
use crate::config::PromptConfig;
use crate::error::PromptError;
use crate::events::Key;
use crate::ui::list::render_entries;
use crate::ui::style::{bold, coloured, dim};
use crate::ui::Paginator;

const FALLBACK_VALIDATION_MSG: &str = "Enter something, tab to autocomplete!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Answered,
}

/// Outcome of a validation callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Rejected, with an optional message; `None` renders a generic one.
    Invalid(Option<String>),
}

impl Validation {
    pub fn error(message: impl Into<String>) -> Self {
        Validation::Invalid(Some(message.into()))
    }

    pub fn fail() -> Self {
        Validation::Invalid(None)
    }
}

/// What a submission attempt puts in front of `validate`: the selected
/// choice in list mode, the literal typed line in suggest-only mode.
#[derive(Debug, Clone)]
pub enum Candidate<T> {
    Choice(Choice<T>),
    Input(String),
}

/// What the runner must do after a keypress has been absorbed.
#[derive(Debug)]
pub(crate) enum KeyAction<T> {
    Noop,
    Search(Option<String>),
    Submit { candidate: Candidate<T>, value: T },
}

/// The autocomplete prompt's state machine.
///
/// Purely synchronous: searches are started with [`begin_search`] and fed
/// back through [`apply_search`] tagged with the token minted at dispatch,
/// so results landing out of order are detected and dropped.  The async
/// plumbing around it lives in the runner (`driver.rs`).
///
/// [`begin_search`]: AutocompletePrompt::begin_search
/// [`apply_search`]: AutocompletePrompt::apply_search
pub struct AutocompletePrompt<T> {
    config: PromptConfig<T>,
    status: Status,
    input: String,
    // true once the user has edited the line at all
    dirty: bool,
    searching: bool,
    searched_once: bool,
    last_search_term: Option<String>,
    token: u64,
    entries: Vec<ListEntry<T>>,
    cursor: Option<usize>,
    search_error: Option<String>,
    validation_error: Option<String>,
    default: Option<String>,
    answer_display: Option<String>,
    paginator: Paginator,
}

impl<T> AutocompletePrompt<T>
where
    T: Clone + Display,
{
    pub fn new(config: PromptConfig<T>) -> Self {
        let paginator = Paginator::new(config.page_size, config.wrap);
        let default = config.default.clone();
        Self {
            config,
            status: Status::Active,
            input: String::new(),
            dirty: false,
            searching: false,
            searched_once: false,
            last_search_term: None,
            token: 0,
            entries: Vec::new(),
            cursor: None,
            search_error: None,
            validation_error: None,
            default,
            answer_display: None,
            paginator,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn answered(&self) -> bool {
        self.status == Status::Answered
    }

    pub(crate) fn config(&self) -> &PromptConfig<T> {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[ListEntry<T>] {
        &self.entries
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Marks a new search as the current one and returns its token.
    ///
    /// The displayed list is cleared so the searching indicator shows,
    /// except on the prompt's very first search when there is nothing stale
    /// to clear.
    pub(crate) fn begin_search(&mut self, term: Option<String>) -> u64 {
        self.token += 1;
        self.searching = true;
        self.search_error = None;
        self.validation_error = None;
        if self.searched_once {
            self.entries.clear();
            self.cursor = None;
        } else {
            self.searched_once = true;
        }
        self.last_search_term = term;
        debug!(term = ?self.last_search_term, token = self.token, "search dispatched");
        self.token
    }

    /// Applies a settled search, unless a newer one has been dispatched
    /// since - later tokens always win, whatever order results land in.
    pub(crate) fn apply_search(&mut self, token: u64, outcome: Result<Vec<ListEntry<T>>, Report>) {
        if token != self.token {
            debug!(token, current = self.token, "dropped stale search result");
            return;
        }
        match outcome {
            Ok(entries) => {
                self.cursor = first_selectable(&entries);
                if let Some(default) = &self.default {
                    let found = entries.iter().position(|e| {
                        e.is_selectable()
                            && e.as_choice().is_some_and(|c| c.value.to_string() == *default)
                    });
                    if found.is_some() {
                        self.cursor = found;
                    }
                }
                self.entries = entries;
            }
            Err(report) => {
                self.entries.clear();
                self.cursor = None;
                self.search_error = Some(PromptError::Search(report).to_string());
            }
        }
        self.searching = false;
    }

    pub(crate) fn selected_choice(&self) -> Option<&Choice<T>> {
        self.cursor
            .and_then(|i| self.entries.get(i))
            .and_then(ListEntry::as_choice)
    }

    /// Absorbs one keypress and reports what async work it demands.
    /// Everything is ignored once the prompt is answered.
    pub(crate) fn on_key(&mut self, key: &Key) -> KeyAction<T> {
        if self.answered() {
            return KeyAction::Noop;
        }

        match key {
            Key::Tab if self.config.is_suggest() => {
                if let Some(value) = self.selected_choice().map(|c| c.value.to_string()) {
                    self.input = value;
                    self.dirty = true;
                    self.default = None;
                }
                KeyAction::Noop
            }
            Key::Down | Key::Ctrl('n') => {
                self.move_cursor(1);
                KeyAction::Noop
            }
            Key::Up | Key::Ctrl('p') => {
                self.move_cursor(-1);
                KeyAction::Noop
            }
            Key::Enter => self.submit(),
            Key::Char(c) => {
                self.input.push(*c);
                self.dirty = true;
                self.line_edited()
            }
            Key::Backspace => {
                if self.input.is_empty() {
                    // nothing typed: dismiss the pending default instead
                    self.default = None;
                    self.dirty = true;
                    KeyAction::Noop
                } else {
                    self.input.pop();
                    self.line_edited()
                }
            }
            _ => KeyAction::Noop,
        }
    }

    pub(crate) fn reject_validation(&mut self, message: Option<String>) {
        self.validation_error =
            Some(message.unwrap_or_else(|| FALLBACK_VALIDATION_MSG.to_string()));
    }

    pub(crate) fn finalize(&mut self, answer: String) {
        debug!(answer = %answer, "prompt answered");
        self.status = Status::Answered;
        self.answer_display = Some(answer);
        self.default = None;
    }

    fn move_cursor(&mut self, offset: isize) {
        self.cursor = step_selectable(&self.entries, self.cursor, offset, self.config.wrap);
    }

    fn line_edited(&mut self) -> KeyAction<T> {
        self.validation_error = None;
        let term = Some(self.input.clone());
        if term != self.last_search_term {
            KeyAction::Search(term)
        } else {
            KeyAction::Noop
        }
    }

    fn submit(&mut self) -> KeyAction<T> {
        if let Some(to_value) = &self.config.suggest {
            let line = if self.input.is_empty() {
                self.default.clone().unwrap_or_default()
            } else {
                self.input.clone()
            };
            return KeyAction::Submit {
                value: to_value(line.clone()),
                candidate: Candidate::Input(line),
            };
        }

        match self.selected_choice() {
            Some(choice) => KeyAction::Submit {
                candidate: Candidate::Choice(choice.clone()),
                value: choice.value.clone(),
            },
            // nothing selectable yet: run the search again with the held line
            None => KeyAction::Search(Some(self.input.clone())),
        }
    }

    fn transform(&self, line: &str, is_final: bool) -> String {
        match &self.config.transformer {
            Some(t) => t(line, is_final),
            None => line.to_string(),
        }
    }

    /// Builds the `(content, bottom)` pair handed to the screen.  Mutable
    /// because the paginator remembers its window between frames.
    pub(crate) fn render_frame(&mut self) -> (String, String) {
        let theme = self.config.theme.clone();
        let mut content = format!(
            "{} {} ",
            coloured(theme.prefix(), Color::Green),
            bold(&self.config.message)
        );

        if self.answered() {
            let display = self.answer_display.clone().unwrap_or_default();
            content.push_str(&coloured(&self.transform(&display, true), theme.answer()));
            return (content, String::new());
        }

        // in list mode the default only steers the initial selection; the
        // value hint is a suggest-only affair
        if let Some(default) = &self.default {
            if self.config.is_suggest() && self.input.is_empty() {
                content.push_str(&dim(&format!("({default}) ")));
            }
        }
        if self.dirty {
            content.push_str(&self.transform(&self.input, false));
        } else {
            let suggest_hint = if self.config.is_suggest() {
                ", tab to autocomplete"
            } else {
                ""
            };
            content.push_str(&dim(&format!(
                "(Use arrow keys or type to search{suggest_hint})"
            )));
        }

        let mut bottom = if let Some(error) = &self.search_error {
            coloured(&format!(">> {error}"), theme.error())
        } else if self.searching {
            let text = self.config.search_text.as_deref().unwrap_or("Searching...");
            format!("  {}", dim(text))
        } else if !self.entries.is_empty() {
            let (block, active_row) = render_entries(&self.entries, self.cursor, &theme);
            self.paginator.paginate(&block, active_row)
        } else {
            let text = self.config.empty_text.as_deref().unwrap_or("No results...");
            format!("  {}", coloured(text, theme.empty()))
        };

        if let Some(description) = self.selected_choice().and_then(|c| c.description.clone()) {
            bottom.push('\n');
            bottom.push_str(&dim(&description));
        }
        if let Some(message) = &self.validation_error {
            bottom.push('\n');
            bottom.push_str(&coloured(&format!(">> {message}"), theme.error()));
        }

        (content, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Separator;
    use color_eyre::eyre::eyre;
    use futures::FutureExt;
    use pretty_assertions::assert_eq;

    fn config() -> crate::config::PromptConfigBuilder<String> {
        PromptConfig::builder()
            .message("Pick a thing")
            .source(|_, _| async { Ok(Vec::new()) }.boxed())
    }

    fn machine() -> AutocompletePrompt<String> {
        AutocompletePrompt::new(config().build().unwrap())
    }

    fn entry_values(prompt: &AutocompletePrompt<String>) -> Vec<String> {
        prompt
            .entries()
            .iter()
            .filter_map(|e| e.as_choice().map(|c| c.value.clone()))
            .collect()
    }

    fn mixed_list() -> Vec<ListEntry<String>> {
        vec![
            ListEntry::from("foo"),
            Separator::new().into(),
            ListEntry::from("bar"),
            ListEntry::from("bum"),
        ]
    }

    fn loaded_machine() -> AutocompletePrompt<String> {
        let mut prompt = machine();
        let token = prompt.begin_search(None);
        prompt.apply_search(token, Ok(mixed_list()));
        prompt
    }

    #[test]
    fn last_issued_search_wins_whatever_lands_first() {
        let mut prompt = machine();
        let stale = prompt.begin_search(None);
        let fresh = prompt.begin_search(Some("a".into()));

        prompt.apply_search(fresh, Ok(vec![ListEntry::from("fresh")]));
        prompt.apply_search(stale, Ok(vec![ListEntry::from("stale")]));

        assert_eq!(entry_values(&prompt), vec!["fresh"]);
        assert!(!prompt.searching);
    }

    #[test]
    fn stale_failure_does_not_disturb_applied_results() {
        let mut prompt = machine();
        let stale = prompt.begin_search(None);
        let fresh = prompt.begin_search(Some("a".into()));

        prompt.apply_search(fresh, Ok(vec![ListEntry::from("fresh")]));
        prompt.apply_search(stale, Err(eyre!("boom")));

        assert_eq!(entry_values(&prompt), vec!["fresh"]);
        let (_, bottom) = prompt.render_frame();
        assert!(!bottom.contains("boom"));
    }

    #[test]
    fn cursor_starts_on_first_selectable_entry() {
        let mut prompt = machine();
        let token = prompt.begin_search(None);
        prompt.apply_search(
            token,
            Ok(vec![
                Separator::titled("fish").into(),
                Choice::new(String::from("cod")).disabled().into(),
                ListEntry::from("eel"),
            ]),
        );
        assert_eq!(prompt.cursor(), Some(2));
    }

    #[test]
    fn default_value_hints_the_initial_selection() {
        let mut prompt = AutocompletePrompt::new(
            config().default_value("bar").build().unwrap(),
        );
        let token = prompt.begin_search(None);
        prompt.apply_search(token, Ok(mixed_list()));
        assert_eq!(prompt.cursor(), Some(2));
    }

    #[test]
    fn default_value_never_selects_a_disabled_entry() {
        let mut prompt = AutocompletePrompt::new(
            config().default_value("cod").build().unwrap(),
        );
        let token = prompt.begin_search(None);
        prompt.apply_search(
            token,
            Ok(vec![
                ListEntry::from("eel"),
                Choice::new(String::from("cod")).disabled().into(),
            ]),
        );
        assert_eq!(prompt.cursor(), Some(0));
    }

    #[test]
    fn cursor_skips_separators_and_wraps_both_ways() {
        let mut prompt = loaded_machine();
        assert_eq!(prompt.cursor(), Some(0));

        prompt.on_key(&Key::Down);
        assert_eq!(prompt.cursor(), Some(2), "separator skipped");
        prompt.on_key(&Key::Down);
        assert_eq!(prompt.cursor(), Some(3));
        prompt.on_key(&Key::Down);
        assert_eq!(prompt.cursor(), Some(0), "wrapped past the end");
        prompt.on_key(&Key::Up);
        assert_eq!(prompt.cursor(), Some(3), "wrapped past the start");
    }

    #[test]
    fn ctrl_n_and_p_move_the_cursor_too() {
        let mut prompt = loaded_machine();
        prompt.on_key(&Key::Ctrl('n'));
        assert_eq!(prompt.cursor(), Some(2));
        prompt.on_key(&Key::Ctrl('p'));
        assert_eq!(prompt.cursor(), Some(0));
    }

    #[test]
    fn without_wrap_the_cursor_stops_at_the_ends() {
        let mut prompt = AutocompletePrompt::new(config().no_wrap().build().unwrap());
        let token = prompt.begin_search(None);
        prompt.apply_search(token, Ok(mixed_list()));

        prompt.on_key(&Key::Up);
        assert_eq!(prompt.cursor(), Some(0));
        for _ in 0..5 {
            prompt.on_key(&Key::Down);
        }
        assert_eq!(prompt.cursor(), Some(3));
    }

    #[test]
    fn typing_searches_only_when_the_term_changes() {
        let mut prompt = machine();
        prompt.begin_search(None);

        let action = prompt.on_key(&Key::Char('a'));
        assert!(matches!(action, KeyAction::Search(Some(ref t)) if t == "a"));
        prompt.begin_search(Some("a".into()));

        // keys that leave the line alone must not re-trigger
        assert!(matches!(prompt.on_key(&Key::Esc), KeyAction::Noop));
        assert!(matches!(prompt.on_key(&Key::Null), KeyAction::Noop));
    }

    #[test]
    fn enter_with_nothing_selectable_reissues_the_search() {
        let mut prompt = machine();
        let token = prompt.begin_search(None);
        prompt.apply_search(token, Ok(Vec::new()));

        let action = prompt.on_key(&Key::Enter);
        assert!(matches!(action, KeyAction::Search(Some(ref t)) if t.is_empty()));
    }

    #[test]
    fn enter_submits_the_selected_choice() {
        let mut prompt = loaded_machine();
        prompt.on_key(&Key::Down);
        match prompt.on_key(&Key::Enter) {
            KeyAction::Submit { value, candidate } => {
                assert_eq!(value, "bar");
                assert!(matches!(candidate, Candidate::Choice(_)));
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn suggest_enter_falls_back_to_the_default() {
        let mut prompt = AutocompletePrompt::new(
            config().suggest_only().default_value("10").build().unwrap(),
        );
        prompt.begin_search(None);

        match prompt.on_key(&Key::Enter) {
            KeyAction::Submit { value, candidate } => {
                assert_eq!(value, "10");
                assert!(matches!(candidate, Candidate::Input(ref line) if line == "10"));
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn backspace_on_an_empty_line_dismisses_the_default() {
        let mut prompt = AutocompletePrompt::new(
            config().suggest_only().default_value("10").build().unwrap(),
        );
        prompt.begin_search(None);
        prompt.on_key(&Key::Backspace);

        match prompt.on_key(&Key::Enter) {
            KeyAction::Submit { value, .. } => assert_eq!(value, ""),
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn tab_adopts_the_selected_value_in_suggest_mode() {
        let mut prompt = AutocompletePrompt::new(config().suggest_only().build().unwrap());
        let token = prompt.begin_search(None);
        prompt.apply_search(token, Ok(mixed_list()));

        prompt.on_key(&Key::Tab);
        match prompt.on_key(&Key::Enter) {
            KeyAction::Submit { value, .. } => assert_eq!(value, "foo"),
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn answered_prompts_ignore_every_event() {
        let mut prompt = loaded_machine();
        prompt.finalize("foo".into());

        assert!(matches!(prompt.on_key(&Key::Down), KeyAction::Noop));
        assert!(matches!(prompt.on_key(&Key::Char('x')), KeyAction::Noop));
        assert!(matches!(prompt.on_key(&Key::Enter), KeyAction::Noop));
        assert_eq!(prompt.status(), Status::Answered);
        assert_eq!(prompt.cursor(), Some(0));
    }

    #[test]
    fn search_failure_renders_in_place_of_the_list() {
        let mut prompt = machine();
        let token = prompt.begin_search(None);
        prompt.apply_search(token, Err(eyre!("connection refused")));

        assert_eq!(prompt.status(), Status::Active);
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains("search failed: connection refused"));
    }

    #[test]
    fn render_walks_through_the_prompt_states() {
        let mut prompt = machine();
        let (content, _) = prompt.render_frame();
        assert!(content.contains("Pick a thing"));
        assert!(content.contains("Use arrow keys or type to search"));

        let token = prompt.begin_search(None);
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains("Searching..."));

        prompt.apply_search(token, Ok(mixed_list()));
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains("foo"));

        let token = prompt.begin_search(Some("zzz".into()));
        prompt.apply_search(token, Ok(Vec::new()));
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains("No results..."));

        prompt.finalize("foo".into());
        let (content, bottom) = prompt.render_frame();
        assert!(content.contains("foo"));
        assert_eq!(bottom, "");
    }

    #[test]
    fn custom_texts_replace_the_stock_ones() {
        let mut prompt = AutocompletePrompt::new(
            config()
                .search_text("Digging...")
                .empty_text("Nothing here")
                .build()
                .unwrap(),
        );
        let token = prompt.begin_search(None);
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains("Digging..."));

        prompt.apply_search(token, Ok(Vec::new()));
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains("Nothing here"));
    }

    #[test]
    fn selected_description_renders_below_the_list() {
        let mut prompt = machine();
        let token = prompt.begin_search(None);
        prompt.apply_search(
            token,
            Ok(vec![Choice::new(String::from("eel"))
                .describe("slippery when wet")
                .into()]),
        );
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains("slippery when wet"));
    }

    #[test]
    fn rejected_validation_shows_its_message() {
        let mut prompt = loaded_machine();
        prompt.reject_validation(Some("must rhyme".into()));
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains(">> must rhyme"));

        prompt.reject_validation(None);
        let (_, bottom) = prompt.render_frame();
        assert!(bottom.contains(FALLBACK_VALIDATION_MSG));
    }

    #[test]
    fn transformer_rewrites_the_displayed_line() {
        let mut prompt = AutocompletePrompt::new(
            config()
                .transformer(|line, is_final| {
                    if is_final {
                        format!("[{line}]")
                    } else {
                        line.to_uppercase()
                    }
                })
                .build()
                .unwrap(),
        );
        prompt.begin_search(None);
        prompt.on_key(&Key::Char('h'));
        prompt.on_key(&Key::Char('i'));
        let (content, _) = prompt.render_frame();
        assert!(content.contains("HI"));

        prompt.finalize("hi".into());
        let (content, _) = prompt.render_frame();
        assert!(content.contains("[hi]"));
    }
}
