//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Operations the operator can trigger; the App layer fills in the inputs
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionKind {
    Add,
    Delete,
    Clear,
    Contains,
    All,
    Between,
    FirstLast,
    EqualLength,
    LessThan,
    MoreThan,
    Upload,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Field navigation
    NextField,
    PrevField,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Tree operations
    Run(ActionKind),

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissPrompt,

    // System
    Quit,
}

/// Input fields, in focus order
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Row,
    From,
    To,
    Pattern,
    File,
}

impl Field {
    pub fn next(&self) -> Field {
        match self {
            Field::Row => Field::From,
            Field::From => Field::To,
            Field::To => Field::Pattern,
            Field::Pattern => Field::File,
            Field::File => Field::Row,
        }
    }

    pub fn prev(&self) -> Field {
        match self {
            Field::Row => Field::File,
            Field::From => Field::Row,
            Field::To => Field::From,
            Field::Pattern => Field::To,
            Field::File => Field::Pattern,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Field::Row => "Row",
            Field::From => "From",
            Field::To => "To",
            Field::Pattern => "Length pattern",
            Field::File => "Upload file",
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    input_mode: InputMode,
    show_help: bool,
    show_prompt: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Popups swallow the key
    if show_prompt {
        return Some(UiEvent::DismissPrompt);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::BackTab => Some(UiEvent::PrevField),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Up => Some(UiEvent::ScrollUp),
            KeyCode::Down => Some(UiEvent::ScrollDown),
            KeyCode::Char(c) => action_for_key(c).map(UiEvent::Run),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

fn action_for_key(c: char) -> Option<ActionKind> {
    match c {
        'a' => Some(ActionKind::Add),
        'd' => Some(ActionKind::Delete),
        'x' => Some(ActionKind::Clear),
        'c' => Some(ActionKind::Contains),
        'l' => Some(ActionKind::All),
        'b' => Some(ActionKind::Between),
        'f' => Some(ActionKind::FirstLast),
        '=' => Some(ActionKind::EqualLength),
        '<' => Some(ActionKind::LessThan),
        '>' => Some(ActionKind::MoreThan),
        'u' => Some(ActionKind::Upload),
        _ => None,
    }
}
