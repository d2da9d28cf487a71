#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;

use super::BubbleList;
use super::Orchestrator;
use super::ScopeSelector;
use super::Scroll;
use crate::domain::models::help_text;
use crate::domain::models::quick_prompt;
use crate::domain::models::Scope;
use crate::domain::models::SlashCommand;
use crate::domain::models::TurnOutcome;
use crate::domain::models::TurnRequest;

/// Everything the terminal front-end needs between frames. Chat content
/// lives in the orchestrator's session; `notice` holds local output such as
/// slash command results, which never becomes part of the conversation.
pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub notice: Option<String>,
    pub orchestrator: Orchestrator,
    pub scope_selector: ScopeSelector,
    pub scroll: Scroll,
}

impl AppState {
    pub fn new(scope_selector: ScopeSelector) -> AppState {
        let orchestrator = Orchestrator::new(scope_selector.current().clone());

        let mut app_state = AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            notice: None,
            orchestrator,
            scope_selector,
            scroll: Scroll::default(),
        };
        app_state.sync_dependants();

        return app_state;
    }

    pub fn is_busy(&self) -> bool {
        return self.orchestrator.is_busy();
    }

    /// Seed prompts are offered only before the first question of a session.
    pub fn quick_prompts_visible(&self) -> bool {
        return !self.is_busy() && self.orchestrator.session().messages().len() == 1;
    }

    pub fn submit(&mut self, text: &str) -> Option<TurnRequest> {
        let turn_request = self.orchestrator.submit(text)?;
        self.notice = None;
        self.sync_dependants();
        self.scroll.last();

        return Some(turn_request);
    }

    pub fn submit_quick_prompt(&mut self, idx: usize) -> Option<TurnRequest> {
        if !self.quick_prompts_visible() {
            return None;
        }

        let prompt = quick_prompt(idx)?;
        return self.submit(prompt);
    }

    pub fn handle_backend_reply(&mut self, outcome: TurnOutcome) {
        if !self.orchestrator.complete(outcome) {
            return;
        }

        self.sync_dependants();
        self.scroll.last();
    }

    pub fn next_scope(&mut self) {
        if let Some(scope) = self.scope_selector.next() {
            self.apply_scope(scope);
        }
    }

    /// Runs a local slash command. Quitting is left to the caller.
    pub fn handle_slash_command(&mut self, command: &SlashCommand) {
        if command.is_help() {
            self.notice = Some(help_text());
            return;
        }

        if command.is_scope_list() {
            self.notice = Some(format!(
                "Available scopes: {}\nCurrent scope: {}",
                self.scope_selector.list(),
                self.scope_selector.current()
            ));
            return;
        }

        if command.is_scope_set() {
            let id = match command.scope_arg() {
                Some(id) => id,
                None => {
                    self.notice = Some(format!(
                        "You must specify a scope with `/scope` or `/s`. Available scopes are: {}",
                        self.scope_selector.list()
                    ));
                    return;
                }
            };

            match self.scope_selector.select(&id) {
                Ok(Some(scope)) => {
                    self.notice = None;
                    self.apply_scope(scope);
                }
                Ok(None) => {
                    self.notice = Some(format!(
                        "Already viewing {}.",
                        self.scope_selector.current().label()
                    ));
                }
                Err(err) => {
                    self.notice = Some(err.to_string());
                }
            }
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn apply_scope(&mut self, scope: Scope) {
        if !self.orchestrator.set_scope(scope) {
            return;
        }

        self.scroll = Scroll::default();
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list.set_messages(
            self.orchestrator.session().messages(),
            usize::from(self.last_known_width),
        );

        let list_length = u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX);
        self.scroll.set_state(list_length, self.last_known_height);

        if self.is_busy() {
            self.scroll.last();
        }
    }
}
