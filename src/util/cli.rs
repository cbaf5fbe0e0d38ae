use colored::Colorize as _;
use std::fmt::Display;

pub type TextWrapper = textwrap::Wrapper<'static, textwrap::NoHyphenation>;

pub fn wrapper() -> TextWrapper {
    TextWrapper::with_splitter(textwrap::termwidth(), textwrap::NoHyphenation)
}

/// A user-facing rendering of an error: a stable headline plus the
/// underlying details.
#[derive(Debug)]
pub struct Report {
    label: String,
    details: String,
}

impl Report {
    pub fn error(label: impl Display, details: impl Display) -> Self {
        Self {
            label: label.to_string(),
            details: details.to_string(),
        }
    }

    pub fn print(&self, wrapper: &TextWrapper) {
        eprintln!(
            "{}",
            wrapper
                .fill(&format!("{}: {}", self.label, self.details))
                .color(colored::Color::BrightRed)
        );
    }
}

pub trait Reportable {
    fn report(&self) -> Report;
}
