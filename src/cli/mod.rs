//! Navigation script runner behind the `pagestack` binary.

mod runner;
mod script;

pub use runner::{stack_line, ScriptRunner};
pub use script::{parse_script, Command, ScriptError, ScriptLine, ScriptOptions};
