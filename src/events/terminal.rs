use crate::config::{get_action_for_event, HotkeyAction, InputContext};
use crate::error::{AppError, AppResult};
use crate::state::State;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread. The
    /// thread stops when reading from the terminal fails, which ends the
    /// render loop.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) => {
                        if tx.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> AppResult<bool> {
        let event = self
            .rx
            .recv()
            .map_err(|_| AppError::Terminal("input thread stopped".to_string()))?;
        match event {
            Event::Input(event) => handle_key(event, state),
            Event::Tick => Ok(true),
        }
    }
}

/// Handle a single key press. Returns false if exit was requested.
///
pub fn handle_key(event: KeyEvent, state: &mut State) -> AppResult<bool> {
    if event.kind == KeyEventKind::Release {
        return Ok(true);
    }
    if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", event);
        return Ok(false);
    }

    let context = state.input_context();
    match get_action_for_event(&event, context, state.hotkeys()) {
        Some(action) => {
            debug!("Processing {:?} in {:?} context...", action, context);
            perform(action, state)
        }
        None => {
            if context == InputContext::Form {
                type_char(event, state);
            }
            Ok(true)
        }
    }
}

fn type_char(event: KeyEvent, state: &mut State) {
    if let KeyCode::Char(c) = event.code {
        if (event.modifiers - KeyModifiers::SHIFT).is_empty() {
            if let Some(form) = state.form_mut() {
                form.push_char(c);
            }
        }
    }
}

fn perform(action: HotkeyAction, state: &mut State) -> AppResult<bool> {
    match action {
        HotkeyAction::Quit => {
            debug!("Received quit hotkey.");
            return Ok(false);
        }
        HotkeyAction::ToggleTitle => {
            state.toggle_title();
        }
        HotkeyAction::DismissNotice => {
            state.notices_mut().dismiss();
        }
        HotkeyAction::Close | HotkeyAction::Cancel => {
            state.close_panel();
        }
        HotkeyAction::NavigateNext if state.is_choosing_organization() => {
            state.next_organization();
        }
        HotkeyAction::NavigatePrev if state.is_choosing_organization() => {
            state.previous_organization();
        }
        HotkeyAction::Select if state.is_choosing_organization() => {
            if let Err(e) = state.select_organization() {
                warn!("{}", e);
            }
        }
        HotkeyAction::AddOrganization if state.is_choosing_organization() => {
            state.navigator().open_form_add_new_org();
        }
        HotkeyAction::NextField => {
            if let Some(form) = state.form_mut() {
                form.next_field();
            }
        }
        HotkeyAction::PrevField => {
            if let Some(form) = state.form_mut() {
                form.previous_field();
            }
        }
        HotkeyAction::DeleteChar => {
            if let Some(form) = state.form_mut() {
                form.pop_char();
            }
        }
        HotkeyAction::Submit => state.submit_form()?,
        other => match other.command() {
            Some(command) => state.navigator().apply(command),
            None => debug!("Ignoring {:?} for the current panel.", other),
        },
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Hotkeys;
    use crate::events::network::Event as NetworkEvent;
    use crate::logger::LogBuffer;
    use crate::navigation::{Flag, Navigator, Overlay};
    use crate::state::StateError;
    use crate::ui::Theme;
    use crossterm::event::KeyEventState;
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn control(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char(c))
        }
    }

    fn state_with_channel() -> (State, mpsc::Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        let state = State::new(
            Some(tx),
            Arc::new(Navigator::new()),
            Theme::default(),
            Hotkeys::default(),
            LogBuffer::default(),
        );
        (state, rx)
    }

    fn keys(state: &mut State, codes: &[KeyCode]) -> bool {
        let mut running = true;
        for code in codes {
            running = handle_key(press(*code), state).unwrap();
            state.refresh().unwrap();
        }
        running
    }

    #[test]
    fn test_exit_keys() {
        let (mut state, _rx) = state_with_channel();
        assert!(!handle_key(control('c'), &mut state).unwrap());
        assert!(!handle_key(press(KeyCode::Char('q')), &mut state).unwrap());
    }

    #[test]
    fn test_page_keys_issue_transitions() {
        let (mut state, _rx) = state_with_channel();
        keys(&mut state, &[KeyCode::Char('c')]);
        assert_eq!(state.panel().overlay(), Overlay::Contacts);
        assert!(state.panel().is_visible());

        keys(&mut state, &[KeyCode::Esc]);
        assert!(!state.panel().is_visible());
        assert_eq!(state.panel().overlay(), Overlay::None);

        keys(&mut state, &[KeyCode::Char('t')]);
        assert!(state.panel().flag(Flag::TitleHidden));
        keys(&mut state, &[KeyCode::Char('1'), KeyCode::Char('2')]);
        assert!(state.panel().flag(Flag::ClientListBlock));
        assert!(!state.panel().flag(Flag::RecordsBlock));
    }

    #[test]
    fn test_typing_in_form() {
        let (mut state, rx) = state_with_channel();
        keys(&mut state, &[KeyCode::Char('s')]);
        assert_eq!(state.input_context(), InputContext::Form);

        // 'q' is text inside a form.
        assert!(keys(
            &mut state,
            &[
                KeyCode::Char('q'),
                KeyCode::Char('x'),
                KeyCode::Backspace,
                KeyCode::Tab,
                KeyCode::Char('a'),
                KeyCode::Enter,
            ]
        ));
        let form = state.form().unwrap();
        assert_eq!(form.fields()[0].value, "q");
        assert_eq!(form.fields()[1].value, "a");
        assert!(matches!(
            rx.try_recv().unwrap(),
            NetworkEvent::SubmitSupport { .. }
        ));
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        let (mut state, _rx) = state_with_channel();
        keys(&mut state, &[KeyCode::Char('s')]);
        let event = KeyEvent {
            modifiers: KeyModifiers::SHIFT,
            ..press(KeyCode::Char('A'))
        };
        handle_key(event, &mut state).unwrap();
        assert_eq!(state.form().unwrap().fields()[0].value, "A");
    }

    #[test]
    fn test_register_again_from_form() {
        let (mut state, _rx) = state_with_channel();
        keys(&mut state, &[KeyCode::Char('v'), KeyCode::Char('r')]);
        assert_eq!(state.panel().overlay(), Overlay::Registration);
        state.navigator().set_registration_error(true);

        handle_key(control('r'), &mut state).unwrap();
        state.refresh().unwrap();
        assert!(!state.panel().has_registration_error());
        assert_eq!(state.panel().overlay(), Overlay::Registration);

        handle_key(control('l'), &mut state).unwrap();
        state.refresh().unwrap();
        assert_eq!(state.panel().overlay(), Overlay::Login);
    }

    #[test]
    fn test_organization_keys_only_in_choice() {
        let (mut state, _rx) = state_with_channel();
        keys(&mut state, &[KeyCode::Char('a'), KeyCode::Char('n')]);
        assert_eq!(state.panel().overlay(), Overlay::Description);

        keys(
            &mut state,
            &[KeyCode::Esc, KeyCode::Char('o'), KeyCode::Char('n')],
        );
        assert_eq!(state.panel().overlay(), Overlay::AddOrganization);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let (mut state, _rx) = state_with_channel();
        let event = KeyEvent {
            kind: KeyEventKind::Release,
            ..press(KeyCode::Char('q'))
        };
        assert!(handle_key(event, &mut state).unwrap());
    }

    #[test]
    fn test_submit_with_stopped_network_thread() {
        let (mut state, rx) = state_with_channel();
        keys(&mut state, &[KeyCode::Char('s'), KeyCode::Char('h')]);
        drop(rx);

        let error = handle_key(press(KeyCode::Enter), &mut state).unwrap_err();
        assert!(matches!(
            error,
            AppError::State(StateError::ChannelClosed { .. })
        ));
        assert_eq!(state.form().unwrap().fields()[0].value, "h");
    }
}
