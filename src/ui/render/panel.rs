use super::Frame;
use crate::config::{format_hotkey_display, HotkeyAction, InputContext};
use crate::events::Panel;
use crate::navigation::Overlay;
use crate::state::{Form, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub const DESCRIPTION: &str = "Booking Desk lets organizations publish their services and \
lets clients book appointments with them. Staff see upcoming records and keep their \
client list up to date.";

pub const DOWNLOAD: &str = "The mobile application is available from the usual app stores. \
Search for \"Booking Desk\" and sign in with the account you registered here.";

pub const INSTRUCTIONS: &str = "1. Register an account.\n\
2. Choose your organization, or add it if it is not listed.\n\
3. Open the records block to review appointments.\n\
4. Open the client list to review your own record and update your photo.";

pub const CONTACTS: &str = "Email: hello@booking-desk.example\nPhone: +1 555 0100\n\
Hours: Monday to Friday, 9:00 to 18:00";

/// Return a rectangle centered in `size` taking the given percentages.
///
fn centered_rect(percent_x: u16, percent_y: u16, size: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(size);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(rows[1])[1]
}

/// Render the panel on top of the page.
///
pub fn panel(frame: &mut Frame, size: Rect, on_screen: Panel, state: &mut State) {
    let area = centered_rect(60, 60, size);
    frame.render_widget(Clear, area);

    let title = match on_screen {
        Panel::Overlay(overlay) => overlay.title(),
        Panel::RenameUser => "Update photo",
    };
    let block = Block::default()
        .title(Span::styled(title, styling::active_block_title_style()))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(state.get_theme()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match on_screen {
        Panel::Overlay(Overlay::OrganizationChoice) => organizations(frame, inner, state),
        Panel::Overlay(Overlay::Description) => static_text(frame, inner, DESCRIPTION, state),
        Panel::Overlay(Overlay::Download) => static_text(frame, inner, DOWNLOAD, state),
        Panel::Overlay(Overlay::Instructions) => static_text(frame, inner, INSTRUCTIONS, state),
        Panel::Overlay(Overlay::Contacts) => static_text(frame, inner, CONTACTS, state),
        _ => form(frame, inner, state),
    }
}

fn static_text(frame: &mut Frame, size: Rect, text: &'static str, state: &State) {
    let paragraph = Paragraph::new(text)
        .style(styling::normal_text_style(state.get_theme()))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, size);
}

fn organizations(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    if state.organizations().is_empty() {
        let paragraph = Paragraph::new("No organizations yet.")
            .style(styling::muted_text_style(&theme));
        frame.render_widget(paragraph, size);
        return;
    }
    let items: Vec<ListItem> = state
        .organizations()
        .iter()
        .map(|organization| {
            let mut spans = vec![Span::styled(
                organization.name.clone(),
                styling::normal_text_style(&theme),
            )];
            if let Some(address) = &organization.address {
                spans.push(Span::styled(
                    format!("  {}", address),
                    styling::muted_text_style(&theme),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(items).highlight_style(styling::current_list_item_style(&theme));
    frame.render_stateful_widget(list, size, state.get_organizations_list_state());
}

/// Return the hint for a recovery hotkey in the form context.
///
fn hint(state: &State, action: HotkeyAction, description: &str) -> String {
    state
        .hotkeys()
        .for_context(InputContext::Form)
        .get(&action)
        .map(|hotkey| format!("{}: {}", format_hotkey_display(hotkey), description))
        .unwrap_or_default()
}

fn form(frame: &mut Frame, size: Rect, state: &State) {
    let form = match state.form() {
        Some(form) => form,
        None => return,
    };
    let theme = state.get_theme();
    let mut lines = field_lines(form, state);

    let panel = state.panel();
    if matches!(state.on_screen(), Some(Panel::Overlay(Overlay::Registration)))
        && panel.has_registration_error()
    {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "An account with this email already exists.",
            styling::warning_style(theme),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "{}   {}",
                hint(state, HotkeyAction::RegisterAgain, "register again"),
                hint(state, HotkeyAction::OpenLogin, "log in instead"),
            ),
            styling::muted_text_style(theme),
        )));
    }
    if matches!(state.on_screen(), Some(Panel::Overlay(Overlay::Login)))
        && panel.has_remember_password_prompt()
    {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Wrong password. Check it and try again.",
            styling::warning_style(theme),
        )));
        lines.push(Line::from(Span::styled(
            hint(state, HotkeyAction::DismissPasswordPrompt, "dismiss"),
            styling::muted_text_style(theme),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), size);
}

fn field_lines(form: &Form, state: &State) -> Vec<Line<'static>> {
    let theme = state.get_theme();
    form.fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == form.focus();
            let label_style = if focused {
                styling::active_label_style(theme)
            } else {
                styling::muted_text_style(theme)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:>12}: ", field.label), label_style),
                Span::styled(
                    format!("{}{}", field.display_value(), cursor),
                    styling::normal_text_style(theme),
                ),
            ])
        })
        .collect()
}
