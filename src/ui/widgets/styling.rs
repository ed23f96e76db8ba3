use crate::feedback::Notice;
use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for the panel on top.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for page blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the highlighted list item.
///
pub fn current_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for the focused form field label.
///
pub fn active_label_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.primary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for the banner.
///
pub fn banner_style(theme: &Theme) -> Style {
    Style::default().fg(theme.banner.to_color())
}

/// Return the style for a recovery hint shown after a rejected request.
///
pub fn warning_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.warning.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for a notice.
///
pub fn notice_style(theme: &Theme, notice: &Notice) -> Style {
    let color = if notice.is_error() {
        theme.error
    } else {
        theme.success
    };
    Style::default().fg(color.to_color())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_notice_style_by_kind() {
        let theme = Theme::tokyo_night();
        let error = notice_style(&theme, &Notice::Error("failed".to_string()));
        let success = notice_style(&theme, &Notice::Success("saved".to_string()));
        assert_eq!(error.fg, Some(Color::Rgb(247, 118, 142)));
        assert_eq!(success.fg, Some(Color::Rgb(158, 206, 106)));
    }
}
