//! App state - pure data structure with no I/O logic

use crate::feedback::Feedback;
use crate::messages::ui_events::{Field, InputMode};
use crate::messages::RenderState;

/// Results panel text before the first action completes
pub const QUICK_REFERENCE: &str = r#"Quick Reference:
────────────────────────────
  a     Add row        d   Delete row
  c     Contains       x   Clear tree
  l     List all       f   First / last
  b     Between        u   Upload file
  =/</> Length queries (pattern field)
  Tab   Next field     e   Edit field
  ?     Full help      q   Quit
────────────────────────────"#;

/// Main application state - pure data, no I/O
pub struct AppState {
    pub base_url: String,

    // Inputs
    pub row: String,
    pub from: String,
    pub to: String,
    pub pattern: String,
    pub file: String,

    // UI state
    pub active_field: Field,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Results panel: last completed action wins
    pub result: String,
    pub result_scroll: u16,
    pub next_request_id: u64,
    pub in_flight: usize,

    // Latest indicator snapshot
    pub feedback: Feedback,

    // Popups
    pub show_help: bool,
    pub prompt: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        use crate::constants::DEFAULT_BASE_URL;
        Self::new(DEFAULT_BASE_URL)
    }
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        AppState {
            base_url: base_url.into(),
            row: String::new(),
            from: String::new(),
            to: String::new(),
            pattern: String::new(),
            file: String::new(),
            active_field: Field::Row,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            result: String::from(QUICK_REFERENCE),
            result_scroll: 0,
            next_request_id: 1,
            in_flight: 0,
            feedback: Feedback::default(),
            show_help: false,
            prompt: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_field {
            Field::Row => &self.row,
            Field::From => &self.from,
            Field::To => &self.to,
            Field::Pattern => &self.pattern,
            Field::File => &self.file,
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> &mut String {
        match self.active_field {
            Field::Row => &mut self.row,
            Field::From => &mut self.from,
            Field::To => &mut self.to,
            Field::Pattern => &mut self.pattern,
            Field::File => &mut self.file,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            base_url: self.base_url.clone(),
            row: self.row.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            pattern: self.pattern.clone(),
            file: self.file.clone(),
            active_field: self.active_field,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            result: self.result.clone(),
            result_scroll: self.result_scroll,
            in_flight: self.in_flight,
            feedback: self.feedback.clone(),
            show_help: self.show_help,
            prompt: self.prompt.clone(),
        }
    }
}
