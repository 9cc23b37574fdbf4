//! Error types for the widget tree and digit renderer

use thiserror::Error;

/// Result type alias for fallible panel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the edges of the widget tree
///
/// Tree mutation and the layout protocol never fail; these variants cover
/// parsing of externally supplied data and encoding of rendered output.
#[derive(Error, Debug)]
pub enum Error {
    /// A colour string could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A style sheet could not be parsed
    #[error("Invalid style sheet: {0}")]
    StyleError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to encode rendered content
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to decode an embedded resource such as a `data:` URL
    #[error("Decoding failed: {0}")]
    DecodeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure_domain() {
        assert_eq!(Error::InvalidColor("#zz".into()).to_string(), "Invalid color: #zz");
        assert_eq!(
            Error::DecodeError("bad base64".into()).to_string(),
            "Decoding failed: bad base64"
        );
        let res: Result<()> = Err(Error::RenderError("empty".into()));
        assert!(matches!(res, Err(Error::RenderError(_))));
    }
}
