use crossterm::style::{style, Attribute, Color, Stylize};

pub fn coloured(text: &str, colour: Color) -> String {
    format!("{}", style(text).with(colour))
}

pub fn dim(text: &str) -> String {
    format!("{}", style(text).attribute(Attribute::Dim))
}

pub fn bold(text: &str) -> String {
    format!("{}", style(text).attribute(Attribute::Bold))
}
