//! App actor - message loop processing UI events, network responses and feedback changes

use tokio::sync::{mpsc, watch};

use crate::app::state::AppState;
use crate::feedback::Feedback;
use crate::messages::ui_events::{ActionKind, InputMode};
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
        mut feedback_rx: watch::Receiver<Feedback>,
    ) {
        self.state.set_feedback(feedback_rx.borrow_and_update().clone());
        self.render();

        // Bootstrap: show the tree as soon as the client starts
        self.dispatch(ActionKind::All);

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                }
                Ok(()) = feedback_rx.changed() => {
                    let feedback = feedback_rx.borrow_and_update().clone();
                    self.state.set_feedback(feedback);
                }
                else => break,
            }
            self.render();
        }
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    fn dispatch(&mut self, kind: ActionKind) {
        let cmd = self.state.request_action(kind);
        let _ = self.network_tx.send(cmd);
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Field navigation
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Tree operations
            UiEvent::Run(kind) => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                self.dispatch(kind);
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissPrompt => self.state.dismiss_prompt(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
