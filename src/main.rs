//! Rowtree - terminal client for the ordered rows service
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - request orchestration and indicator timers

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use rowtree::app::{AppActor, AppState};
use rowtree::config::Config;
use rowtree::constants::{APP_NAME, APP_VERSION, LOG_FILE};
use rowtree::feedback::{FeedbackIndicator, TokioScheduler};
use rowtree::messages::ui_events::{key_to_ui_event, Field, InputMode};
use rowtree::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use rowtree::network::{NetworkActor, RowsClient};
use rowtree::ui::{cursor_column, indicator_style, render_input, tone_color};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load()?;
    tracing::info!(base_url = %config.base_url, "Starting {} {}", APP_NAME, APP_VERSION);

    let indicator = FeedbackIndicator::new(
        Arc::new(TokioScheduler),
        config.timings,
        config.cancel_superseded_timers,
    );
    let feedback_rx = indicator.subscribe();
    let client = RowsClient::from_config(&config, indicator)?;
    let base_url = client.base_url().to_string();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(Arc::new(client), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(base_url), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx, feedback_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.prompt.is_some(),
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header + indicator
            Constraint::Length(3), // Row
            Constraint::Length(3), // From / To
            Constraint::Length(3), // Pattern / File
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Message area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, chunks[0]);
    draw_field(f, state, Field::Row, chunks[1]);

    let pair = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)]);
    let range = pair.split(chunks[2]);
    draw_field(f, state, Field::From, range[0]);
    draw_field(f, state, Field::To, range[1]);
    let lower = pair.split(chunks[3]);
    draw_field(f, state, Field::Pattern, lower[0]);
    draw_field(f, state, Field::File, lower[1]);

    draw_results(f, state, chunks[4]);
    draw_message(f, state, chunks[5]);
    draw_status_bar(f, state, chunks[6]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(prompt) = &state.prompt {
        draw_prompt_popup(f, prompt, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {} ", state.base_url), Style::default().fg(Color::Gray)),
    ];

    if let Some(style) = indicator_style(state.feedback.state) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", state.feedback.label), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_field(f: &mut Frame, state: &RenderState, field: Field, area: Rect) {
    let is_focused = state.active_field == field;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;
    let value = state.field_value(field);
    f.render_widget(render_input(value, field.title(), is_focused, is_editing), area);

    if is_editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let column = cursor_column(value, state.cursor_position);
        let cursor_x = area.x.saturating_add(column).saturating_add(1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_results(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.in_flight > 0 {
        format!(" Result [{} running] ", state.in_flight)
    } else {
        String::from(" Result ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(" ↑/↓ scroll ").right_aligned());

    let result = Paragraph::new(state.result.as_str())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll, 0));
    f.render_widget(result, area);
}

fn draw_message(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = match &state.feedback.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(tone_color(notice.tone)),
        )),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " ESC/Enter:stop editing | arrows:move | Tab:next field "
    } else {
        " Tab:field | e:edit | a:add d:del c:contains l:list b:between u:upload | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 ROWTREE - Keyboard Shortcuts

 FIELDS
   Tab / Shift+Tab    Next / previous field
   e / Enter          Edit focused field
   Esc                Stop editing

 ROWS (uses the Row field)
   a                  Add row
   d                  Delete row
   c                  Check whether the row exists

 QUERIES
   l                  List all rows
   f                  First and last rows
   b                  Rows between From and To
   =  <  >            Rows of equal / shorter / longer
                      length than the pattern field

 TREE
   x                  Clear the tree
   u                  Upload the file in the Upload field

 GENERAL
   ↑ / ↓              Scroll results
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_prompt_popup(f: &mut Frame, prompt: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Notice (any key to close) ")
        .style(Style::default().bg(Color::Black));

    let content = Paragraph::new(prompt)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(content, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
