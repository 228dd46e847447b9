use std::future::Future;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::style::Color;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::choice::ListEntry;
use crate::driver::Answers;
use crate::error::PromptError;
use crate::prompt::{Candidate, Validation};

/// Async search callback: `(answers so far, current term)` to the next
/// choice list.  The term is `None` for the initial search issued before any
/// typing happens.
pub type SourceFn<T> =
    Arc<dyn Fn(Answers, Option<String>) -> BoxFuture<'static, Result<Vec<ListEntry<T>>>> + Send + Sync>;

pub type ValidateFn<T> =
    Arc<dyn Fn(Candidate<T>, Answers) -> BoxFuture<'static, Result<Validation>> + Send + Sync>;

pub type FilterFn<T> = Arc<dyn Fn(T) -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// Display-only rewrite of the typed line; the flag is true on the final
/// answered render.
pub type TransformFn = Arc<dyn Fn(&str, bool) -> String + Send + Sync>;

pub(crate) type LiteralFn<T> = Arc<dyn Fn(String) -> T + Send + Sync>;

/// Everything a single autocomplete prompt is configured with.  Immutable
/// for the prompt's lifetime; built through [`PromptConfig::builder`].
pub struct PromptConfig<T> {
    pub(crate) message: String,
    pub(crate) source: SourceFn<T>,
    pub(crate) validate: Option<ValidateFn<T>>,
    pub(crate) filter: Option<FilterFn<T>>,
    pub(crate) transformer: Option<TransformFn>,
    pub(crate) default: Option<String>,
    /// Present iff the prompt answers with the literal typed line; carries
    /// the conversion captured by [`PromptConfigBuilder::suggest_only`].
    pub(crate) suggest: Option<LiteralFn<T>>,
    pub(crate) page_size: Option<usize>,
    pub(crate) search_text: Option<String>,
    pub(crate) empty_text: Option<String>,
    pub(crate) wrap: bool,
    pub(crate) theme: Theme,
}

impl<T> std::fmt::Debug for PromptConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptConfig")
            .field("message", &self.message)
            .field("validate", &self.validate.is_some())
            .field("filter", &self.filter.is_some())
            .field("transformer", &self.transformer.is_some())
            .field("default", &self.default)
            .field("suggest", &self.suggest.is_some())
            .field("page_size", &self.page_size)
            .field("search_text", &self.search_text)
            .field("empty_text", &self.empty_text)
            .field("wrap", &self.wrap)
            .field("theme", &self.theme)
            .finish()
    }
}

impl<T> PromptConfig<T> {
    pub fn builder() -> PromptConfigBuilder<T> {
        PromptConfigBuilder::default()
    }

    pub(crate) fn is_suggest(&self) -> bool {
        self.suggest.is_some()
    }
}

pub struct PromptConfigBuilder<T> {
    message: Option<String>,
    source: Option<SourceFn<T>>,
    validate: Option<ValidateFn<T>>,
    filter: Option<FilterFn<T>>,
    transformer: Option<TransformFn>,
    default: Option<String>,
    suggest: Option<LiteralFn<T>>,
    page_size: Option<usize>,
    search_text: Option<String>,
    empty_text: Option<String>,
    wrap: bool,
    theme: Theme,
}

impl<T> Default for PromptConfigBuilder<T> {
    fn default() -> Self {
        Self {
            message: None,
            source: None,
            validate: None,
            filter: None,
            transformer: None,
            default: None,
            suggest: None,
            page_size: None,
            search_text: None,
            empty_text: None,
            wrap: true,
            theme: Theme::default(),
        }
    }
}

impl<T> PromptConfigBuilder<T> {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn source<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Answers, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<ListEntry<T>>>> + Send + 'static,
    {
        self.source = Some(Arc::new(move |answers, term| f(answers, term).boxed()));
        self
    }

    /// Synchronous validation; wrapped into the same async contract as
    /// [`PromptConfigBuilder::validate_async`].
    pub fn validate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Candidate<T>, &Answers) -> Validation + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(move |candidate, answers| {
            let outcome = f(&candidate, &answers);
            async move { Ok(outcome) }.boxed()
        }));
        self
    }

    pub fn validate_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Candidate<T>, Answers) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Validation>> + Send + 'static,
    {
        self.validate = Some(Arc::new(move |candidate, answers| {
            f(candidate, answers).boxed()
        }));
        self
    }

    /// Synchronous post-validation rewrite of the answer value.
    pub fn filter<F>(mut self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
        T: Send + 'static,
    {
        self.filter = Some(Arc::new(move |value| {
            let out = f(value);
            async move { Ok(out) }.boxed()
        }));
        self
    }

    pub fn filter_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.filter = Some(Arc::new(move |value| f(value).boxed()));
        self
    }

    pub fn transformer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, bool) -> String + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(f));
        self
    }

    /// In list mode the default is only an initial-selection hint, matched
    /// against resolved choice values by their `Display` form.  In
    /// suggest-only mode it is adopted verbatim when enter is pressed on an
    /// untouched line.
    pub fn default_value(mut self, default: impl ToString) -> Self {
        self.default = Some(default.to_string());
        self
    }

    /// Answer with the literal typed line (tab adopts the selected choice)
    /// instead of a picked list entry.
    pub fn suggest_only(mut self) -> Self
    where
        T: From<String> + Send + Sync + 'static,
    {
        self.suggest = Some(Arc::new(T::from));
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = Some(text.into());
        self
    }

    /// Disable wrapping the cursor past the ends of the list.
    pub fn no_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn build(self) -> Result<PromptConfig<T>, PromptError> {
        let message = match self.message {
            Some(m) => m,
            None => return Err(PromptError::MissingParam("message")),
        };
        let source = match self.source {
            Some(s) => s,
            None => return Err(PromptError::MissingParam("source")),
        };
        Ok(PromptConfig {
            message,
            source,
            validate: self.validate,
            filter: self.filter,
            transformer: self.transformer,
            default: self.default,
            suggest: self.suggest,
            page_size: self.page_size,
            search_text: self.search_text,
            empty_text: self.empty_text,
            wrap: self.wrap,
            theme: self.theme,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_use_theme")]
    use_theme: bool,

    #[serde(default = "default_prefix")]
    prefix: String,

    #[serde(default = "default_pointer")]
    pointer: String,

    #[serde(default = "default_highlight_colour")]
    highlight: Color,

    #[serde(default = "default_answer_colour")]
    answer: Color,

    #[serde(default = "default_empty_colour")]
    empty: Color,

    #[serde(default = "default_error_colour")]
    error: Color,
}

impl Theme {
    /// Status glyph at the head of the prompt line.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Glyph marking the row under the cursor.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn highlight(&self) -> Color {
        if self.use_theme {
            self.highlight
        } else {
            Color::Cyan
        }
    }

    pub fn answer(&self) -> Color {
        if self.use_theme {
            self.answer
        } else {
            Color::Cyan
        }
    }

    pub fn empty(&self) -> Color {
        if self.use_theme {
            self.empty
        } else {
            Color::Yellow
        }
    }

    pub fn error(&self) -> Color {
        if self.use_theme {
            self.error
        } else {
            Color::Red
        }
    }
}

fn default_use_theme() -> bool {
    false
}
fn default_prefix() -> String {
    "?".into()
}
fn default_pointer() -> String {
    "❯".into()
}
fn default_highlight_colour() -> Color {
    Color::Cyan
}
fn default_answer_colour() -> Color {
    Color::Cyan
}
fn default_empty_colour() -> Color {
    Color::Yellow
}
fn default_error_colour() -> Color {
    Color::Red
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            use_theme: default_use_theme(),
            prefix: default_prefix(),
            pointer: default_pointer(),
            highlight: default_highlight_colour(),
            answer: default_answer_colour(),
            empty: default_empty_colour(),
            error: default_error_colour(),
        }
    }
}
