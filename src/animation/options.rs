//! Animation timing options and the relaxed options-string parser.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, Result};

/// Duration, delay and timing curve for one transition.
///
/// Durations are expressed in seconds, as they are written in option strings
/// (`{duration: 0.2, delay: 0.4, timing: 'ease-in'}`). Unset fields fall back
/// to the animator's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub timing: Option<String>,
}

impl AnimationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    pub fn timing(mut self, timing: impl Into<String>) -> Self {
        self.timing = Some(timing.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.duration.is_none() && self.delay.is_none() && self.timing.is_none()
    }

    /// Overlay `self` on top of `base`; fields set on `self` win.
    pub fn merged_over(&self, base: &AnimationOptions) -> AnimationOptions {
        AnimationOptions {
            duration: self.duration.or(base.duration),
            delay: self.delay.or(base.delay),
            timing: self.timing.clone().or_else(|| base.timing.clone()),
        }
    }

    /// Wall-clock time from start of the transition to completion.
    pub fn total(&self) -> Duration {
        seconds(self.delay) + seconds(self.duration)
    }

    /// Parse a relaxed object literal such as
    /// `{duration: 0.2, delay: 0.4, timing: 'ease-in'}`.
    ///
    /// Keys may be bare or quoted, strings may use either quote style, and
    /// trailing commas are accepted. Blank input yields empty options and
    /// unknown keys are ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let parse_error = |reason: String| NavigatorError::Parse {
            input: raw.to_string(),
            reason,
        };

        let wrapped;
        let literal = if trimmed.starts_with('{') {
            trimmed
        } else {
            wrapped = format!("{{{}}}", trimmed);
            wrapped.as_str()
        };

        let json = relaxed_to_json(literal).map_err(parse_error)?;
        let value: serde_json::Value =
            serde_json::from_str(&json).map_err(|e| parse_error(e.to_string()))?;
        if !value.is_object() {
            return Err(parse_error("expected an object literal".to_string()));
        }
        serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
    }

    /// Like [`parse`](Self::parse) but logs and falls back to empty options
    /// on malformed input.
    pub fn parse_or_default(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(options) => options,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring malformed animation options");
                Self::default()
            }
        }
    }
}

fn seconds(value: Option<f64>) -> Duration {
    match value {
        Some(s) if s.is_finite() && s > 0.0 => Duration::from_secs_f64(s),
        _ => Duration::ZERO,
    }
}

/// Rewrite a JavaScript-style object literal into strict JSON.
fn relaxed_to_json(input: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(input.len() + 16);
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                out.push('"');
                let mut closed = false;
                while let Some(ch) = chars.next() {
                    match ch {
                        '\\' => match chars.next() {
                            Some('\'') => out.push('\''),
                            Some(escaped) => {
                                out.push('\\');
                                out.push(escaped);
                            }
                            None => break,
                        },
                        ch if ch == c => {
                            closed = true;
                            break;
                        }
                        '"' => out.push_str("\\\""),
                        ch => out.push(ch),
                    }
                }
                if !closed {
                    return Err("unterminated string".to_string());
                }
                out.push('"');
            }
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let mut number = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || matches!(next, '.' | '+' | '-') {
                        number.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // JSON has no leading-dot numbers
                if let Some(rest) = number.strip_prefix("-.") {
                    number = format!("-0.{}", rest);
                } else if let Some(rest) = number.strip_prefix('.') {
                    number = format!("0.{}", rest);
                }
                out.push_str(&number);
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || matches!(next, '_' | '$' | '-') {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match ident.as_str() {
                    "true" | "false" | "null" => out.push_str(&ident),
                    _ => {
                        out.push('"');
                        out.push_str(&ident);
                        out.push('"');
                    }
                }
            }
            ',' => {
                let mut lookahead = chars.clone();
                while matches!(lookahead.peek(), Some(w) if w.is_whitespace()) {
                    lookahead.next();
                }
                if !matches!(lookahead.peek(), Some('}') | Some(']')) {
                    out.push(',');
                }
            }
            c => out.push(c),
        }
    }

    Ok(out)
}
