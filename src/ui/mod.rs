pub mod list;
pub mod paginator;
pub mod screen;
pub mod style;

pub use paginator::Paginator;
pub use screen::{Screen, TermScreen};
