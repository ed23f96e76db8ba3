use super::Frame;
use crate::config::{build_footer_text, format_hotkey_display, HotkeyAction, InputContext};
use crate::events::Panel;
use crate::navigation::Overlay;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Format hotkeys for the current input context as a display string.
///
fn format_hotkeys(state: &State) -> String {
    let hotkeys = state.hotkeys();
    match state.input_context() {
        InputContext::Page => build_footer_text(
            &hotkeys.page,
            &[
                (HotkeyAction::OpenRegistration, "register"),
                (HotkeyAction::OpenLogin, "login"),
                (HotkeyAction::ChooseOrganization, "organizations"),
                (HotkeyAction::OpenDescription, "about"),
                (HotkeyAction::OpenDownload, "download"),
                (HotkeyAction::OpenInstructions, "instructions"),
                (HotkeyAction::OpenContacts, "contacts"),
                (HotkeyAction::OpenSupport, "support"),
                (HotkeyAction::ShowShell, "shell"),
                (HotkeyAction::ToggleTitle, "title"),
                (HotkeyAction::ShowRecords, "records"),
                (HotkeyAction::ShowClientList, "clients"),
                (HotkeyAction::RenameUser, "photo"),
                (HotkeyAction::Quit, "quit"),
            ],
        ),
        InputContext::Overlay
            if state.on_screen() == Some(Panel::Overlay(Overlay::OrganizationChoice)) =>
        {
            build_footer_text(
                &hotkeys.overlay,
                &[
                    (HotkeyAction::NavigateNext, "next"),
                    (HotkeyAction::NavigatePrev, "previous"),
                    (HotkeyAction::Select, "choose"),
                    (HotkeyAction::AddOrganization, "new organization"),
                    (HotkeyAction::Close, "close"),
                ],
            )
        }
        InputContext::Overlay => build_footer_text(
            &hotkeys.overlay,
            &[
                (HotkeyAction::Close, "close"),
                (HotkeyAction::DismissNotice, "dismiss notice"),
                (HotkeyAction::Quit, "quit"),
            ],
        ),
        InputContext::Form => build_footer_text(
            &hotkeys.form,
            &[
                (HotkeyAction::NextField, "next field"),
                (HotkeyAction::PrevField, "previous field"),
                (HotkeyAction::Submit, "submit"),
                (HotkeyAction::Cancel, "cancel"),
            ],
        ),
    }
}

/// Render the footer with the hotkeys that apply right now.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let text = Line::from(Span::styled(
        format_hotkeys(state),
        styling::muted_text_style(state.get_theme()),
    ));
    frame.render_widget(Paragraph::new(text), size);
}

/// Render the most recent notice, if any.
///
pub fn notices(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let line = match state.notices().latest() {
        Some(notice) => {
            let hint = state
                .hotkeys()
                .for_context(state.input_context())
                .get(&HotkeyAction::DismissNotice)
                .map(|hotkey| format!("  ({}: dismiss)", format_hotkey_display(hotkey)))
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(
                    format!(" {}", notice.text()),
                    styling::notice_style(theme, notice),
                ),
                Span::styled(hint, styling::muted_text_style(theme)),
            ])
        }
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), size);
}
