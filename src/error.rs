use color_eyre::eyre::Report;
use thiserror::Error;

/// Failures a prompt can end with, plus the construction-time config error.
///
/// Search failures are recovered in place (the message renders where the
/// choice list would) and never appear here on their own; `validate` and
/// `filter` blowing up, a closed event channel, or terminal io going wrong
/// all end the prompt with the corresponding variant.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("autocomplete prompt requires a `{0}` parameter")]
    MissingParam(&'static str),

    #[error("search failed: {0}")]
    Search(Report),

    #[error("validation failed: {0}")]
    Validation(Report),

    #[error("filter failed: {0}")]
    Filter(Report),

    #[error("prompt interrupted")]
    Interrupted,

    #[error("event channel closed before the prompt was answered")]
    ChannelClosed,

    #[error("terminal io failed")]
    Io(#[from] std::io::Error),
}
