use std::collections::HashMap;
use std::fmt::{self, Display};

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::config::PromptConfig;
use crate::error::PromptError;
use crate::events::{EventLoop, Key, Message};
use crate::prompt::{AutocompletePrompt, Candidate, KeyAction, Validation};
use crate::terminal;
use crate::ui::{Screen, TermScreen};

/// Answers collected by a [`prompt`] run, keyed by question name.  Earlier
/// answers are handed to later questions' `source` and `validate` callbacks.
pub type Answers = HashMap<String, AnswerValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::String(s) => write!(f, "{s}"),
            AnswerValue::Number(n) => write!(f, "{n}"),
            AnswerValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::String(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::String(value.to_string())
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value as f64)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl<T> AutocompletePrompt<T>
where
    T: Clone + Display + Send + Sync + 'static,
{
    /// Drives the prompt to completion: one unconditional initial search,
    /// then keypresses and settled searches in arrival order until an
    /// answer survives validation.
    ///
    /// The event loop is taken unstarted in tests, which feed synthetic
    /// [`Message`]s through [`EventLoop::sender`] instead of a terminal.
    pub async fn run(
        &mut self,
        answers: &Answers,
        events: &mut EventLoop<T>,
        screen: &mut dyn Screen,
    ) -> Result<T, PromptError> {
        let tx = events.sender();

        self.dispatch(None, &tx, answers);
        let (content, bottom) = self.render_frame();
        screen.render(&content, &bottom)?;

        loop {
            match events.next().await? {
                Message::Input(key) => {
                    if matches!(key, Key::Ctrl('c') | Key::Ctrl('d')) {
                        return Err(PromptError::Interrupted);
                    }
                    match self.on_key(&key) {
                        KeyAction::Noop => {}
                        KeyAction::Search(term) => self.dispatch(term, &tx, answers),
                        KeyAction::Submit { candidate, value } => {
                            if let Some(answer) =
                                self.try_submit(candidate, value, answers).await?
                            {
                                let (content, _) = self.render_frame();
                                screen.done(&content)?;
                                return Ok(answer);
                            }
                        }
                    }
                }
                Message::SearchReady { token, outcome } => self.apply_search(token, outcome),
            }

            let (content, bottom) = self.render_frame();
            screen.render(&content, &bottom)?;
        }
    }

    /// Starts a search task.  The task reports back through the event
    /// channel; the token decides on arrival whether the result still
    /// matters.  The underlying future is never aborted.
    fn dispatch(&mut self, term: Option<String>, tx: &Sender<Message<T>>, answers: &Answers) {
        let token = self.begin_search(term.clone());
        let search = (self.config().source)(answers.clone(), term);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = search.await;
            // the prompt may be gone by the time this settles
            let _ = tx.send(Message::SearchReady { token, outcome }).await;
        });
    }

    /// Validation and filtering for one submission attempt.  `Ok(None)`
    /// means validation rejected the candidate and the prompt stays active.
    async fn try_submit(
        &mut self,
        candidate: Candidate<T>,
        value: T,
        answers: &Answers,
    ) -> Result<Option<T>, PromptError> {
        if let Some(validate) = self.config().validate.clone() {
            match validate(candidate.clone(), answers.clone()).await {
                Ok(Validation::Valid) => {}
                Ok(Validation::Invalid(message)) => {
                    self.reject_validation(message);
                    return Ok(None);
                }
                Err(report) => return Err(PromptError::Validation(report)),
            }
        }

        let value = match self.config().filter.clone() {
            Some(filter) => filter(value).await.map_err(PromptError::Filter)?,
            None => value,
        };

        let display = match &candidate {
            Candidate::Choice(choice) => choice.display_name(),
            Candidate::Input(_) => value.to_string(),
        };
        self.finalize(display);
        Ok(Some(value))
    }
}

/// A named prompt the [`prompt`] driver can run.
#[async_trait]
pub trait Prompt: Send {
    fn name(&self) -> &str;
    async fn ask(
        &mut self,
        answers: &Answers,
        screen: &mut dyn Screen,
    ) -> Result<AnswerValue, PromptError>;
}

/// An autocomplete prompt registered under a question name.
pub struct Question<T> {
    name: String,
    prompt: AutocompletePrompt<T>,
}

impl<T> Question<T>
where
    T: Clone + Display + Into<AnswerValue> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, config: PromptConfig<T>) -> Self {
        Self {
            name: name.into(),
            prompt: AutocompletePrompt::new(config),
        }
    }

    pub fn boxed(self) -> Box<dyn Prompt> {
        Box::new(self)
    }
}

#[async_trait]
impl<T> Prompt for Question<T>
where
    T: Clone + Display + Into<AnswerValue> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn ask(
        &mut self,
        answers: &Answers,
        screen: &mut dyn Screen,
    ) -> Result<AnswerValue, PromptError> {
        let mut events = EventLoop::new();
        let _reader = events.start();
        let value = self.prompt.run(answers, &mut events, screen).await?;
        Ok(value.into())
    }
}

/// Asks each question in turn over a raw-mode terminal, feeding earlier
/// answers to later questions.  The first question to fail ends the run.
pub async fn prompt(
    questions: impl IntoIterator<Item = Box<dyn Prompt>>,
) -> Result<Answers, PromptError> {
    terminal::init_panic_hook();
    terminal::init()?;
    let result = ask_all(questions).await;
    terminal::restore()?;
    result
}

async fn ask_all(
    questions: impl IntoIterator<Item = Box<dyn Prompt>>,
) -> Result<Answers, PromptError> {
    let mut screen = TermScreen::new();
    let mut answers = Answers::new();
    for mut question in questions {
        let value = question.ask(&answers, &mut screen).await?;
        answers.insert(question.name().to_string(), value);
    }
    Ok(answers)
}
