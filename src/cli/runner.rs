//! Executes a parsed script against a navigator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use super::script::{Command, ScriptError, ScriptLine};
use crate::back_button::{BackButtonDispatcher, BackButtonRegistration};
use crate::error::Result as NavResult;
use crate::navigator::{EventKind, ListenerId, Navigator};
use crate::page::Page;

/// How long `back` waits for the spawned pop to settle.
const BACK_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives one navigator through script commands, collecting a transcript.
pub struct ScriptRunner {
    navigator: Navigator,
    dispatcher: BackButtonDispatcher,
    _root: BackButtonRegistration,
    popped: Arc<Notify>,
    listener: ListenerId,
    exits: usize,
}

impl ScriptRunner {
    /// Attach `navigator` to a fresh back-button chain whose root records
    /// an "exit".
    pub fn new(navigator: Navigator) -> Self {
        let dispatcher = BackButtonDispatcher::new();
        // Oldest handler: the application shell, which has nowhere to go back to.
        let root = dispatcher.register(|event| event.call_parent_handler());
        navigator.attach_back_button(&dispatcher);

        let popped = Arc::new(Notify::new());
        let notify = Arc::clone(&popped);
        let listener = navigator.on(EventKind::PostPop, move |_| notify.notify_one());

        Self {
            navigator,
            dispatcher,
            _root: root,
            popped,
            listener,
            exits: 0,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Back presses that fell through to the root.
    pub fn exits(&self) -> usize {
        self.exits
    }

    /// Run every line, stopping at the first failure.
    ///
    /// Returns one transcript line per command.
    pub async fn run(&mut self, script: &[ScriptLine]) -> Result<Vec<String>, ScriptError> {
        let mut transcript = Vec::with_capacity(script.len());
        for line in script {
            let entry = self
                .execute(&line.command)
                .await
                .map_err(|source| ScriptError::Navigation {
                    line: line.line,
                    source,
                })?;
            tracing::debug!(line = line.line, entry = %entry, "Script step");
            transcript.push(entry);
        }
        Ok(transcript)
    }

    async fn execute(&mut self, command: &Command) -> NavResult<String> {
        let label = match command {
            Command::Push { reference, options } => {
                let page = self
                    .navigator
                    .push_page(reference, options.to_transition_options())
                    .await?;
                format!("push {}", page_label(&page))
            }
            Command::Pop { options } => {
                let page = self
                    .navigator
                    .pop_page(options.to_transition_options())
                    .await?;
                format!("pop -> {}", page_label(&page))
            }
            Command::Insert {
                index,
                reference,
                options,
            } => {
                let page = self
                    .navigator
                    .insert_page(*index, reference, options.to_transition_options())
                    .await?;
                format!("insert {} at {}", page_label(&page), index)
            }
            Command::Replace { reference, options } => {
                let page = self
                    .navigator
                    .replace_page(reference, options.to_transition_options())
                    .await?;
                format!("replace -> {}", page_label(&page))
            }
            Command::Reset { reference, options } => {
                let page = self
                    .navigator
                    .reset_to_page(
                        reference.as_deref().unwrap_or(""),
                        options.to_transition_options(),
                    )
                    .await?;
                format!("reset -> {}", page_label(&page))
            }
            Command::Top { selector, options } => {
                let page = self
                    .navigator
                    .bring_page_top(selector.clone(), options.to_transition_options())
                    .await?;
                format!("top {}", page_label(&page))
            }
            Command::Back => self.press_back().await,
            Command::Print => "print".to_string(),
        };
        Ok(format!("{:<24} {}", label, stack_line(&self.navigator.pages())))
    }

    async fn press_back(&mut self) -> String {
        let depth = self.navigator.len();
        if !self.dispatcher.dispatch() {
            self.exits += 1;
            return "back -> exit".to_string();
        }
        if depth > 1
            && tokio::time::timeout(BACK_SETTLE_TIMEOUT, self.popped.notified())
                .await
                .is_err()
        {
            tracing::warn!("Back press did not settle in time");
        }
        "back".to_string()
    }
}

impl Drop for ScriptRunner {
    fn drop(&mut self) {
        self.navigator.off(self.listener);
        self.navigator.detach_back_button();
    }
}

fn page_label(page: &Page) -> String {
    page.name().unwrap_or("<inline>").to_string()
}

/// `home > settings [profile]`, top page in brackets.
pub fn stack_line(pages: &[Page]) -> String {
    let count = pages.len();
    pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            if index + 1 == count {
                format!("[{}]", page_label(page))
            } else {
                page_label(page)
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}
