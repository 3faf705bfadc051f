//! Navigation script parsing.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! push settings animation=slide options={duration:0.2}
//! insert 0 home
//! replace profile
//! top home
//! top -2
//! pop refresh
//! reset
//! back
//! print
//! ```

use thiserror::Error;

use crate::error::NavigatorError;
use crate::navigator::{PageSelector, TransitionOptions};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {source}")]
    Navigation {
        line: usize,
        #[source]
        source: NavigatorError,
    },
}

/// Per-command flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptOptions {
    pub animation: Option<String>,
    /// Raw relaxed options literal.
    pub animation_options: Option<String>,
    pub refresh: bool,
    pub cancel_if_running: bool,
}

impl ScriptOptions {
    pub fn to_transition_options(&self) -> TransitionOptions {
        let mut options = TransitionOptions::new();
        if let Some(animation) = &self.animation {
            options = options.animation(animation.clone());
        }
        if let Some(raw) = &self.animation_options {
            options = options.animation_options_str(raw);
        }
        if self.refresh {
            options = options.refresh(true);
        }
        if self.cancel_if_running {
            options = options.cancel_if_running(true);
        }
        options
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Push {
        reference: String,
        options: ScriptOptions,
    },
    Pop {
        options: ScriptOptions,
    },
    Insert {
        index: isize,
        reference: String,
        options: ScriptOptions,
    },
    Replace {
        reference: String,
        options: ScriptOptions,
    },
    /// Without a reference the configured initial page is used.
    Reset {
        reference: Option<String>,
        options: ScriptOptions,
    },
    Top {
        selector: PageSelector,
        options: ScriptOptions,
    },
    /// Device back press through the dispatcher.
    Back,
    Print,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// 1-based source line.
    pub line: usize,
    pub command: Command,
}

/// Parse a whole script; blank lines and comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (number, raw) in source.lines().enumerate() {
        let line = number + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let command = parse_command(text).map_err(|message| ScriptError::Syntax { line, message })?;
        lines.push(ScriptLine { line, command });
    }
    Ok(lines)
}

fn parse_command(text: &str) -> Result<Command, String> {
    let mut tokens = text.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Err("empty command".to_string());
    };
    let mut positional = Vec::new();
    let mut options = ScriptOptions::default();

    for token in tokens {
        match token.split_once('=') {
            Some(("animation", value)) => options.animation = Some(value.to_string()),
            Some(("options", value)) => options.animation_options = Some(value.to_string()),
            Some((key, _)) => return Err(format!("unknown option '{}'", key)),
            None if token == "refresh" => options.refresh = true,
            None if token == "cancel-if-running" => options.cancel_if_running = true,
            None => positional.push(token),
        }
    }

    let command = match (verb, positional.as_slice()) {
        ("push", [reference]) => Command::Push {
            reference: reference.to_string(),
            options,
        },
        ("pop", []) => Command::Pop { options },
        ("insert", [index, reference]) => Command::Insert {
            index: parse_index(index)?,
            reference: reference.to_string(),
            options,
        },
        ("replace", [reference]) => Command::Replace {
            reference: reference.to_string(),
            options,
        },
        ("reset", []) => Command::Reset {
            reference: None,
            options,
        },
        ("reset", [reference]) => Command::Reset {
            reference: Some(reference.to_string()),
            options,
        },
        ("top", [target]) => Command::Top {
            selector: match target.parse::<isize>() {
                Ok(index) => PageSelector::Index(index),
                Err(_) => PageSelector::Name(target.to_string()),
            },
            options,
        },
        ("back", []) => Command::Back,
        ("print", []) => Command::Print,
        ("push" | "pop" | "insert" | "replace" | "reset" | "top" | "back" | "print", args) => {
            return Err(format!("wrong number of arguments for '{}': {}", verb, args.len()))
        }
        _ => return Err(format!("unknown command '{}'", verb)),
    };
    Ok(command)
}

fn parse_index(raw: &str) -> Result<isize, String> {
    raw.parse()
        .map_err(|_| format!("'{}' is not a stack index", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let script = parse_script(
            "# demo\n\
             push settings animation=fade options={duration:0.2}\n\
             \n\
             insert -1 home\n\
             top 0\n\
             top home\n\
             pop refresh cancel-if-running\n\
             reset\n",
        )
        .unwrap();

        assert_eq!(script.len(), 6);
        assert_eq!(script[0].line, 2);
        assert_eq!(
            script[0].command,
            Command::Push {
                reference: "settings".to_string(),
                options: ScriptOptions {
                    animation: Some("fade".to_string()),
                    animation_options: Some("{duration:0.2}".to_string()),
                    ..ScriptOptions::default()
                },
            }
        );
        assert!(matches!(script[1].command, Command::Insert { index: -1, .. }));
        assert!(matches!(
            script[2].command,
            Command::Top {
                selector: PageSelector::Index(0),
                ..
            }
        ));
        assert!(matches!(
            &script[3].command,
            Command::Top {
                selector: PageSelector::Name(name),
                ..
            } if name == "home"
        ));
        match &script[4].command {
            Command::Pop { options } => {
                assert!(options.refresh);
                assert!(options.cancel_if_running);
            }
            other => panic!("expected pop, got {:?}", other),
        }
        assert_eq!(
            script[5].command,
            Command::Reset {
                reference: None,
                options: ScriptOptions::default()
            }
        );
    }

    #[test]
    fn test_syntax_errors_carry_line() {
        let err = parse_script("push a\njump b\n").unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { line: 2, .. }));

        let err = parse_script("push\n").unwrap_err();
        assert!(err.to_string().contains("wrong number of arguments"));

        let err = parse_script("insert x home\n").unwrap_err();
        assert!(err.to_string().contains("not a stack index"));

        let err = parse_script("pop speed=2\n").unwrap_err();
        assert!(err.to_string().contains("unknown option"));
    }

    #[test]
    fn test_options_to_transition_options() {
        let options = ScriptOptions {
            animation: Some("lift".to_string()),
            animation_options: Some("{duration:0.1}".to_string()),
            refresh: true,
            cancel_if_running: false,
        }
        .to_transition_options();
        assert_eq!(options.animation.as_deref(), Some("lift"));
        assert!(options.wants_refresh());
        assert!(!options.wants_cancel_if_running());
        assert_eq!(options.animation_options.unwrap().duration, Some(0.1));
    }
}
