//! Command handlers - business logic for processing UI events

use std::path::PathBuf;

use crate::app::AppState;
use crate::feedback::Feedback;
use crate::messages::ui_events::{ActionKind, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::{Action, ActionReport};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next();
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev();
        self.cursor_position = self.current_input().len();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.current_input_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Results scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(1);
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }

    // ========================
    // Actions
    // ========================

    /// Build an action from the current inputs. Inputs are sent as typed.
    pub fn build_action(&self, kind: ActionKind) -> Action {
        match kind {
            ActionKind::Add => Action::Add(self.row.clone()),
            ActionKind::Delete => Action::Delete(self.row.clone()),
            ActionKind::Clear => Action::Clear,
            ActionKind::Contains => Action::Contains(self.row.clone()),
            ActionKind::All => Action::All,
            ActionKind::Between => Action::Between {
                from: self.from.clone(),
                to: self.to.clone(),
            },
            ActionKind::FirstLast => Action::FirstLast,
            ActionKind::EqualLength => Action::EqualLength(self.pattern.clone()),
            ActionKind::LessThan => Action::LessThan(self.pattern.clone()),
            ActionKind::MoreThan => Action::MoreThan(self.pattern.clone()),
            ActionKind::Upload => {
                let path = self.file.trim();
                Action::Upload((!path.is_empty()).then(|| expand_home(path)))
            }
        }
    }

    /// Prepare a command for the Network layer
    pub fn request_action(&mut self, kind: ActionKind) -> NetworkCommand {
        let action = self.build_action(kind);
        let id = self.next_id();
        self.in_flight += 1;
        NetworkCommand::RunAction { id, action }
    }

    /// Handle a response from the Network layer
    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::ActionFinished {
                id,
                action,
                report,
                time_ms,
            } => {
                tracing::debug!(id, action, time_ms, "Applying action report");
                self.in_flight = self.in_flight.saturating_sub(1);
                match report {
                    ActionReport::Panel(text) => {
                        self.result = text;
                        self.result_scroll = 0;
                    }
                    ActionReport::Prompt(text) => self.prompt = Some(text),
                }
            }
        }
    }

    pub fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = feedback;
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::Field;

    fn finished(id: u64, report: ActionReport) -> NetworkResponse {
        NetworkResponse::ActionFinished {
            id,
            action: "all",
            report,
            time_ms: 1,
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut state = AppState::default();
        state.next_field();
        assert_eq!(state.active_field, Field::From);
        state.start_editing();
        for c in "héllo".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.from, "hélo");
        assert!(state.row.is_empty());
    }

    #[test]
    fn test_build_actions_from_inputs() {
        let mut state = AppState::default();
        state.row = String::from("r");
        state.from = String::from("a");
        state.to = String::from("z");
        state.pattern = String::from("abc");

        assert_eq!(state.build_action(ActionKind::Add), Action::Add("r".into()));
        assert_eq!(
            state.build_action(ActionKind::Between),
            Action::Between {
                from: "a".into(),
                to: "z".into()
            }
        );
        assert_eq!(state.build_action(ActionKind::MoreThan), Action::MoreThan("abc".into()));
        assert_eq!(state.build_action(ActionKind::Upload), Action::Upload(None));

        state.file = String::from(" rows.txt ");
        assert_eq!(
            state.build_action(ActionKind::Upload),
            Action::Upload(Some(PathBuf::from("rows.txt")))
        );
    }

    #[test]
    fn test_last_completed_action_wins() {
        let mut state = AppState::default();
        let first = state.request_action(ActionKind::All);
        let second = state.request_action(ActionKind::FirstLast);
        assert_eq!(state.in_flight, 2);

        let (NetworkCommand::RunAction { id: a, .. }, NetworkCommand::RunAction { id: b, .. }) =
            (first, second)
        else {
            panic!("expected run commands");
        };
        assert_ne!(a, b);

        // completion order, not request order, decides the panel
        state.handle_response(finished(b, ActionReport::Panel("second".into())));
        state.handle_response(finished(a, ActionReport::Panel("first".into())));
        assert_eq!(state.result, "first");
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn test_prompt_leaves_panel_alone() {
        let mut state = AppState::default();
        state.result = String::from("rows");
        state.handle_response(finished(1, ActionReport::Prompt("Please select a file first.".into())));
        assert_eq!(state.result, "rows");
        assert_eq!(state.prompt.as_deref(), Some("Please select a file first."));

        state.dismiss_prompt();
        assert!(state.prompt.is_none());
    }
}
