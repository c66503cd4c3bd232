use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An anchor element or attribute the page layout should have is absent.
    #[error("{0} was not found on the page")]
    Missing(String),
    /// The anchor is there but its content cannot be used.
    #[error("Malformed page content: {0}")]
    Malformed(String),
    #[error("Should return 2 values when parsing hours but got {found} for input {input:?}")]
    UnderspecifiedTime { found: usize, input: String },
}

impl Error {
    pub fn missing(what: &str) -> Self {
        Self::Missing(what.to_string())
    }

    pub fn malformed(msg: &str) -> Self {
        Self::Malformed(msg.to_string())
    }

    /// Missing anchors mean "skip this entity"; anything else points at a
    /// change in the source format.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}
