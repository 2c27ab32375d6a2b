//! Validation: parsing plus the policies a widget is configured with.
//!
//! Called on every input change, so it does no caching and no allocation
//! beyond the `Color` it returns.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ColorError;
use crate::input::ColorInput;
use crate::parse::parse;
use crate::translate::{localize, Translate};

/// What a widget accepts beyond plain parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Alpha is always 1; structured input carrying another alpha is an error.
    pub alpha_disabled: bool,
    /// Free text other than hex (names, `rgb(...)`) is rejected; only
    /// components and hex are accepted.
    pub plain_color_disabled: bool,
    /// The "no color" state (absent, empty, `none`) is an error.
    pub none_disabled: bool,
}

/// Validates inputs under a fixed policy, translator and locale.
pub struct Validator<'a> {
    policy: ValidationPolicy,
    translate: &'a dyn Translate,
    locale: &'a str,
}

impl<'a> Validator<'a> {
    pub fn new(policy: ValidationPolicy, translate: &'a dyn Translate, locale: &'a str) -> Self {
        Validator {
            policy,
            translate,
            locale,
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Parses `input` and applies the policy. On error the color carries the
    /// error kind and its localized message.
    pub fn validate(&self, input: &ColorInput) -> Color {
        let color = self.check(input);
        match color.error() {
            Some(error) => {
                tracing::debug!(?input, %error, locale = self.locale, "color rejected");
                let message = localize(self.translate, error.key(), self.locale);
                color.with_message(message)
            }
            None => color,
        }
    }

    fn check(&self, input: &ColorInput) -> Color {
        let policy = self.policy;
        let free_text = matches!(input, ColorInput::Named(_) | ColorInput::Functional(_));
        if policy.plain_color_disabled && free_text {
            return parse(input, None).into_error(ColorError::PlainColorNotAllowed);
        }
        let color = parse(input, None);
        if color.error().is_some() {
            return color;
        }
        if policy.none_disabled && input.is_none() {
            return color.into_error(ColorError::InvalidFormat);
        }
        if policy.alpha_disabled {
            return match input.structured_alpha() {
                Some(alpha) if alpha != 1.0 => color.into_error(ColorError::AlphaNotAllowed),
                _ => color.opaque(),
            };
        }
        color
    }
}

/// Validates a single input.
///
/// With `alpha_disabled`, text input (hex, functional) has its alpha dropped
/// silently, while a quad or keyed `a` other than 1 is an error. With
/// `plain_color_disabled`, free text other than hex is rejected.
pub fn validate_color(
    input: &ColorInput,
    alpha_disabled: bool,
    translate: &dyn Translate,
    locale: &str,
    plain_color_disabled: bool,
) -> Color {
    let policy = ValidationPolicy {
        alpha_disabled,
        plain_color_disabled,
        none_disabled: false,
    };
    Validator::new(policy, translate, locale).validate(input)
}
