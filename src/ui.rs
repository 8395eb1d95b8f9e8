use ratatui::{prelude::*, widgets::*};

use crate::feedback::{IndicatorState, Tone};

/// Renders a text input field
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool, is_editing: bool) -> Paragraph<'a> {
    let style = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {} ", title));

    Paragraph::new(content).block(block)
}

/// Style of the indicator badge; `None` when hidden
pub fn indicator_style(state: IndicatorState) -> Option<Style> {
    let color = match state {
        IndicatorState::Hidden => return None,
        IndicatorState::SuccessShown | IndicatorState::SuccessFading => Color::Green,
        IndicatorState::ErrorShown | IndicatorState::ErrorFading => Color::Red,
    };
    let style = if state.is_fading() {
        Style::default().fg(color).dim()
    } else {
        Style::default().fg(Color::Black).bg(color).bold()
    };
    Some(style)
}

/// Terminal column of a byte cursor inside `input`
pub fn cursor_column(input: &str, cursor: usize) -> u16 {
    let end = cursor.min(input.len());
    let chars = input.get(..end).map(|s| s.chars().count()).unwrap_or(end);
    u16::try_from(chars).unwrap_or(u16::MAX)
}

/// Message area color
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
    }
}
