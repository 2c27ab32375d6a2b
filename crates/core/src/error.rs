//! Error types for the huebox color engine.
//!
//! `ColorError` is never returned through `Result` by the color operations:
//! it is recorded on the `Color` itself so callers always get something
//! paintable. `ConfigError` covers the surfaces around the engine (format
//! names, palette and catalog documents) that do fail the usual way.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a color input could not be turned into a clean `Color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ColorError {
    /// The string or shape is not one of the supported formats.
    #[error("unrecognized color format")]
    InvalidFormat,

    /// A component could not be clamped into range (NaN or infinite).
    #[error("color component is not a finite number")]
    InvalidComponent,

    /// An alpha component was supplied while alpha is disabled.
    #[error("alpha channel is not allowed")]
    AlphaNotAllowed,

    /// A bare color name was supplied while plain colors are disabled.
    #[error("plain color names are not allowed")]
    PlainColorNotAllowed,
}

impl ColorError {
    /// Translation key handed to the injected translate function.
    ///
    /// When no translation exists the key is shown to the user as-is, so
    /// keys are written as readable English.
    pub fn key(self) -> &'static str {
        match self {
            ColorError::InvalidFormat => "Wrong format",
            ColorError::InvalidComponent => "Invalid component",
            ColorError::AlphaNotAllowed => "Alpha not supported",
            ColorError::PlainColorNotAllowed => "Plain color not supported",
        }
    }
}

impl Serialize for ColorError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Errors from configuration-like inputs around the engine.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A format or model name was not recognized.
    #[error("unknown {kind} '{name}', expected one of: {expected}")]
    UnknownFormat {
        kind: &'static str,
        name: String,
        expected: &'static str,
    },

    /// A palette document could not be used.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A translation catalog document could not be used.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The document was not valid JSON for the expected shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_error_keys_are_distinct() {
        let keys = [
            ColorError::InvalidFormat.key(),
            ColorError::InvalidComponent.key(),
            ColorError::AlphaNotAllowed.key(),
            ColorError::PlainColorNotAllowed.key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn color_error_serializes_as_key() {
        let json = serde_json::to_string(&ColorError::AlphaNotAllowed).unwrap();
        assert_eq!(json, "\"Alpha not supported\"");
    }

    #[test]
    fn color_error_displays_readable_message() {
        let msg = format!("{}", ColorError::InvalidFormat);
        assert!(msg.contains("format"), "got: {msg}");
    }

    #[test]
    fn unknown_format_includes_name_and_choices() {
        let err = ConfigError::UnknownFormat {
            kind: "css format",
            name: "cmyk".into(),
            expected: "hex, rgb, hsl",
        };
        let msg = format!("{err}");
        assert!(msg.contains("cmyk"), "missing name in: {msg}");
        assert!(msg.contains("hex, rgb, hsl"), "missing choices in: {msg}");
        assert!(msg.contains("css format"), "missing kind in: {msg}");
    }

    #[test]
    fn invalid_palette_includes_message() {
        let err = ConfigError::InvalidPalette("empty".into());
        assert!(format!("{err}").contains("empty"));
    }

    #[test]
    fn json_error_converts() {
        let bad = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ConfigError::from(bad);
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ColorError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<ColorError>();
        assert_std_error::<ConfigError>();
    }
}
