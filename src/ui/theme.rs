use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: rgb(125, 207, 255), // Blue
            accent: rgb(255, 159, 196), // Magenta
            banner: rgb(255, 159, 196), // Magenta
            text: rgb(169, 177, 214), // Foreground
            text_muted: rgb(117, 121, 148), // Comment
            success: rgb(158, 206, 106), // Green
            warning: rgb(255, 202, 40), // Yellow
            error: rgb(247, 118, 142), // Red
            border_active: rgb(125, 207, 255), // Blue
            border_normal: rgb(117, 121, 148), // Comment
            highlight_bg: rgb(125, 207, 255), // Blue
            highlight_fg: rgb(26, 27, 38), // Background
        }
    }

    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: rgb(161, 119, 255), // Purple
            accent: rgb(255, 109, 146), // Pink
            banner: rgb(255, 109, 146), // Pink
            text: rgb(88, 82, 96), // Text
            text_muted: rgb(152, 147, 165), // Muted
            success: rgb(59, 247, 209), // Pine
            warning: rgb(255, 210, 0), // Gold
            error: rgb(235, 111, 146), // Love
            border_active: rgb(161, 119, 255), // Purple
            border_normal: rgb(88, 82, 96), // Text
            highlight_bg: rgb(61, 174, 233), // Foam
            highlight_fg: rgb(0, 0, 0), // Black
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: rgb(189, 147, 249), // Purple
            accent: rgb(255, 121, 198), // Pink
            banner: rgb(255, 121, 198), // Pink
            text: rgb(248, 248, 242), // Foreground
            text_muted: rgb(98, 114, 164), // Comment
            success: rgb(80, 250, 123), // Green
            warning: rgb(241, 250, 140), // Yellow
            error: rgb(255, 85, 85), // Red
            border_active: rgb(189, 147, 249), // Purple
            border_normal: rgb(98, 114, 164), // Comment
            highlight_bg: rgb(68, 71, 90), // Current line
            highlight_fg: rgb(248, 248, 242), // Foreground
        }
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        Theme {
            name: "catppuccin-mocha".to_string(),
            primary: rgb(137, 180, 250), // Blue
            accent: rgb(245, 194, 231), // Pink
            banner: rgb(203, 166, 247), // Mauve
            text: rgb(205, 214, 244), // Text
            text_muted: rgb(127, 132, 156), // Overlay1
            success: rgb(166, 227, 161), // Green
            warning: rgb(249, 226, 175), // Yellow
            error: rgb(243, 139, 168), // Red
            border_active: rgb(137, 180, 250), // Blue
            border_normal: rgb(88, 91, 112), // Surface2
            highlight_bg: rgb(137, 180, 250), // Blue
            highlight_fg: rgb(30, 30, 46), // Base
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "dracula" => Some(Self::dracula()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "tokyo-night".to_string(),
            "rose-pine-dawn".to_string(),
            "dracula".to_string(),
            "catppuccin-mocha".to_string(),
        ]
    }
}
