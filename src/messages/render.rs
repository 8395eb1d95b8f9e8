//! Render state - data structure sent from App layer to UI for rendering

use crate::feedback::Feedback;
use crate::messages::ui_events::{Field, InputMode};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
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

    // Results panel
    pub result: String,
    pub result_scroll: u16,
    pub in_flight: usize,

    // Indicator and message area
    pub feedback: Feedback,

    // Popups
    pub show_help: bool,
    pub prompt: Option<String>,
}

impl RenderState {
    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Row => &self.row,
            Field::From => &self.from,
            Field::To => &self.to,
            Field::Pattern => &self.pattern,
            Field::File => &self.file,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_BASE_URL;
        RenderState {
            base_url: String::from(DEFAULT_BASE_URL),
            row: String::new(),
            from: String::new(),
            to: String::new(),
            pattern: String::new(),
            file: String::new(),
            active_field: Field::Row,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            result: String::new(),
            result_scroll: 0,
            in_flight: 0,
            feedback: Feedback::default(),
            show_help: false,
            prompt: None,
        }
    }
}
