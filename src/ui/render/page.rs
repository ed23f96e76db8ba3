use super::Frame;
use crate::navigation::RecordsView;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const APP_TITLE: &str = "Booking Desk";

pub const WELCOME: &str = "
 Manage appointments for your organization from the terminal.

 Register or log in to get started, then choose the organization
 you work for. The records block shows the organization you picked
 and the client list shows the user you are signed in as.
";

/// Render the title bar.
///
pub fn title(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let mut spans = vec![Span::styled(
        format!(" {} ", APP_TITLE),
        styling::banner_style(theme).add_modifier(Modifier::BOLD),
    )];
    if let Some(organization) = state.selected_organization() {
        spans.push(Span::styled(
            format!(" {}", organization.name),
            styling::normal_text_style(theme),
        ));
    }
    if let Some(name) = state.panel().selected_user().get_str("name") {
        spans.push(Span::styled(
            format!("  signed in as {}", name),
            styling::muted_text_style(theme),
        ));
    }
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), size);
}

/// Render the page body according to the records view.
///
pub fn body(frame: &mut Frame, size: Rect, state: &State) {
    match state.panel().records_view() {
        RecordsView::Records => records(frame, size, state),
        RecordsView::ClientList => client_list(frame, size, state),
        RecordsView::Hidden => welcome(frame, size, state),
    }
}

fn page_block(title: &str, state: &State) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            styling::active_block_title_style(),
        ))
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(state.get_theme()))
}

fn welcome(frame: &mut Frame, size: Rect, state: &State) {
    let paragraph = Paragraph::new(Text::styled(
        WELCOME,
        styling::normal_text_style(state.get_theme()),
    ))
    .wrap(Wrap { trim: false })
    .block(page_block("Welcome", state));
    frame.render_widget(paragraph, size);
}

fn records(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let lines: Vec<Line> = match state.selected_organization() {
        Some(organization) => vec![
            field_line("Organization", &organization.name, state),
            field_line(
                "Address",
                organization.address.as_deref().unwrap_or("-"),
                state,
            ),
            field_line("Phone", organization.phone.as_deref().unwrap_or("-"), state),
        ],
        None => vec![Line::from(Span::styled(
            "No organization chosen yet.",
            styling::muted_text_style(theme),
        ))],
    };
    frame.render_widget(
        Paragraph::new(lines).block(page_block("Records", state)),
        size,
    );
}

fn client_list(frame: &mut Frame, size: Rect, state: &State) {
    let user = state.panel().selected_user();
    let lines: Vec<Line> = if user.is_empty() {
        vec![Line::from(Span::styled(
            "Log in to see your client record.",
            styling::muted_text_style(state.get_theme()),
        ))]
    } else {
        user.iter()
            .map(|(key, value)| {
                let value = match value.as_str() {
                    Some(text) => text.to_string(),
                    None => value.to_string(),
                };
                field_line(key, &value, state)
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(page_block("Clients", state)),
        size,
    );
}

fn field_line(label: &str, value: &str, state: &State) -> Line<'static> {
    let theme = state.get_theme();
    Line::from(vec![
        Span::styled(format!(" {}: ", label), styling::muted_text_style(theme)),
        Span::styled(value.to_string(), styling::normal_text_style(theme)),
    ])
}
