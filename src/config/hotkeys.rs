//! Hotkey configuration management.
//!
//! This module defines the hotkey system for the application, including action types,
//! hotkey bindings, and default configurations per input context.

use crate::navigation::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Page actions
    OpenRegistration,
    OpenLogin,
    ChooseOrganization,
    OpenDescription,
    OpenDownload,
    OpenInstructions,
    OpenContacts,
    OpenSupport,
    ShowShell,
    ToggleTitle,
    ShowRecords,
    ShowClientList,
    RenameUser,
    RegisterAgain,
    DismissPasswordPrompt,
    DismissNotice,
    Quit,

    // Overlay actions
    Close,
    NavigateNext,
    NavigatePrev,
    Select,
    AddOrganization,

    // Form actions
    NextField,
    PrevField,
    DeleteChar,
    Submit,
    Cancel,
}

impl HotkeyAction {
    /// Return the coordinator command this action maps to directly, if any.
    ///
    pub fn command(&self) -> Option<Command> {
        match self {
            HotkeyAction::OpenRegistration => Some(Command::OpenRegistrationForm),
            HotkeyAction::OpenLogin => Some(Command::OpenLoginForm),
            HotkeyAction::ChooseOrganization => Some(Command::OpenRegFormChoiceOrganisation),
            HotkeyAction::OpenDescription => Some(Command::OpenAppDescription),
            HotkeyAction::OpenDownload => Some(Command::DownloadApplication),
            HotkeyAction::OpenInstructions => Some(Command::InstructionsForStart),
            HotkeyAction::OpenContacts => Some(Command::OpenAppContacts),
            HotkeyAction::OpenSupport => Some(Command::OpenAppSupport),
            HotkeyAction::ShowShell => Some(Command::Open),
            HotkeyAction::ShowRecords => Some(Command::OpenRecordsBlockWithData),
            HotkeyAction::ShowClientList => Some(Command::OpenClientListBlockWithData),
            HotkeyAction::RenameUser => Some(Command::OpenModalRenameUser),
            HotkeyAction::RegisterAgain => Some(Command::RegisterAgain),
            HotkeyAction::DismissPasswordPrompt => Some(Command::DismissRememberPassword),
            _ => None,
        }
    }
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    fn key(c: char) -> Self {
        Hotkey {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::empty(),
        }
    }

    fn plain(code: KeyCode) -> Self {
        Hotkey {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn control(c: char) -> Self {
        Hotkey {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

/// Custom serialization for Hotkey.
///
impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Hotkey", 3)?;
        state.serialize_field("code", &KeyCodeSerde::from(self.code))?;
        if let KeyCode::Char(c) = self.code {
            state.serialize_field("char", &c)?;
        }
        state.serialize_field("modifiers", &KeyModifiersSerde::from(self.modifiers))?;
        state.end()
    }
}

/// Custom deserialization for Hotkey.
///
impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct HotkeyHelper {
            code: KeyCodeSerde,
            #[serde(default)]
            char: Option<char>,
            #[serde(default)]
            modifiers: KeyModifiersSerde,
        }

        let helper = HotkeyHelper::deserialize(deserializer)?;
        let code = match helper.code {
            KeyCodeSerde::Char => match helper.char {
                Some(c) => KeyCode::Char(c),
                None => {
                    return Err(serde::de::Error::custom(
                        "Char key code requires 'char' field",
                    ))
                }
            },
            KeyCodeSerde::Esc => KeyCode::Esc,
            KeyCodeSerde::Enter => KeyCode::Enter,
            KeyCodeSerde::Backspace => KeyCode::Backspace,
            KeyCodeSerde::Tab => KeyCode::Tab,
            KeyCodeSerde::BackTab => KeyCode::BackTab,
            KeyCodeSerde::Up => KeyCode::Up,
            KeyCodeSerde::Down => KeyCode::Down,
            KeyCodeSerde::Left => KeyCode::Left,
            KeyCodeSerde::Right => KeyCode::Right,
        };
        Ok(Hotkey {
            code,
            modifiers: helper.modifiers.into(),
        })
    }
}

/// Helper enum for serializing KeyCode.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
enum KeyCodeSerde {
    Char,
    Esc,
    Enter,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
}

impl From<KeyCode> for KeyCodeSerde {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(_) => KeyCodeSerde::Char,
            KeyCode::Esc => KeyCodeSerde::Esc,
            KeyCode::Enter => KeyCodeSerde::Enter,
            KeyCode::Backspace => KeyCodeSerde::Backspace,
            KeyCode::Tab => KeyCodeSerde::Tab,
            KeyCode::BackTab => KeyCodeSerde::BackTab,
            KeyCode::Up => KeyCodeSerde::Up,
            KeyCode::Down => KeyCodeSerde::Down,
            KeyCode::Left => KeyCodeSerde::Left,
            KeyCode::Right => KeyCodeSerde::Right,
            _ => KeyCodeSerde::Char, // Fallback for unsupported keys
        }
    }
}

/// Helper struct for serializing KeyModifiers.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KeyModifiersSerde {
    #[serde(default)]
    control: bool,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    alt: bool,
}

impl From<KeyModifiers> for KeyModifiersSerde {
    fn from(modifiers: KeyModifiers) -> Self {
        KeyModifiersSerde {
            control: modifiers.contains(KeyModifiers::CONTROL),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            alt: modifiers.contains(KeyModifiers::ALT),
        }
    }
}

impl From<KeyModifiersSerde> for KeyModifiers {
    fn from(serde: KeyModifiersSerde) -> Self {
        let mut result = KeyModifiers::empty();
        if serde.control {
            result |= KeyModifiers::CONTROL;
        }
        if serde.shift {
            result |= KeyModifiers::SHIFT;
        }
        if serde.alt {
            result |= KeyModifiers::ALT;
        }
        result
    }
}

/// Specifying the input contexts that have their own bindings.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// No panel on top of the page.
    Page,
    /// A panel without inputs is on top.
    Overlay,
    /// A panel with a form is on top.
    Form,
}

/// Maps hotkey actions to their key bindings for each input context.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkeys {
    #[serde(default = "default_page_hotkeys")]
    pub page: HashMap<HotkeyAction, Hotkey>,
    #[serde(default = "default_overlay_hotkeys")]
    pub overlay: HashMap<HotkeyAction, Hotkey>,
    #[serde(default = "default_form_hotkeys")]
    pub form: HashMap<HotkeyAction, Hotkey>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Hotkeys {
            page: default_page_hotkeys(),
            overlay: default_overlay_hotkeys(),
            form: default_form_hotkeys(),
        }
    }
}

impl Hotkeys {
    /// Return the bindings for an input context.
    ///
    pub fn for_context(&self, context: InputContext) -> &HashMap<HotkeyAction, Hotkey> {
        match context {
            InputContext::Page => &self.page,
            InputContext::Overlay => &self.overlay,
            InputContext::Form => &self.form,
        }
    }
}

fn default_page_hotkeys() -> HashMap<HotkeyAction, Hotkey> {
    HashMap::from([
        (HotkeyAction::OpenRegistration, Hotkey::key('r')),
        (HotkeyAction::OpenLogin, Hotkey::key('l')),
        (HotkeyAction::ChooseOrganization, Hotkey::key('o')),
        (HotkeyAction::OpenDescription, Hotkey::key('a')),
        (HotkeyAction::OpenDownload, Hotkey::key('d')),
        (HotkeyAction::OpenInstructions, Hotkey::key('i')),
        (HotkeyAction::OpenContacts, Hotkey::key('c')),
        (HotkeyAction::OpenSupport, Hotkey::key('s')),
        (HotkeyAction::ShowShell, Hotkey::key('v')),
        (HotkeyAction::ToggleTitle, Hotkey::key('t')),
        (HotkeyAction::ShowRecords, Hotkey::key('1')),
        (HotkeyAction::ShowClientList, Hotkey::key('2')),
        (HotkeyAction::RenameUser, Hotkey::key('u')),
        (HotkeyAction::RegisterAgain, Hotkey::key('g')),
        (HotkeyAction::DismissPasswordPrompt, Hotkey::key('p')),
        (HotkeyAction::DismissNotice, Hotkey::key('x')),
        (HotkeyAction::Quit, Hotkey::key('q')),
    ])
}

fn default_overlay_hotkeys() -> HashMap<HotkeyAction, Hotkey> {
    HashMap::from([
        (HotkeyAction::Close, Hotkey::plain(KeyCode::Esc)),
        (HotkeyAction::NavigateNext, Hotkey::key('j')),
        (HotkeyAction::NavigatePrev, Hotkey::key('k')),
        (HotkeyAction::Select, Hotkey::plain(KeyCode::Enter)),
        (HotkeyAction::AddOrganization, Hotkey::key('n')),
        (HotkeyAction::DismissNotice, Hotkey::key('x')),
        (HotkeyAction::Quit, Hotkey::key('q')),
    ])
}

fn default_form_hotkeys() -> HashMap<HotkeyAction, Hotkey> {
    HashMap::from([
        (HotkeyAction::Cancel, Hotkey::plain(KeyCode::Esc)),
        (HotkeyAction::NextField, Hotkey::plain(KeyCode::Tab)),
        (HotkeyAction::PrevField, Hotkey::plain(KeyCode::BackTab)),
        (HotkeyAction::DeleteChar, Hotkey::plain(KeyCode::Backspace)),
        (HotkeyAction::Submit, Hotkey::plain(KeyCode::Enter)),
        (HotkeyAction::OpenLogin, Hotkey::control('l')),
        (HotkeyAction::RegisterAgain, Hotkey::control('r')),
        (HotkeyAction::DismissPasswordPrompt, Hotkey::control('p')),
    ])
}

/// Checks if a KeyEvent matches a Hotkey. Shift is ignored for characters
/// since the terminal already reports the shifted character.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    let modifiers = match event.code {
        KeyCode::Char(_) | KeyCode::BackTab => event.modifiers - KeyModifiers::SHIFT,
        _ => event.modifiers,
    };
    event.code == hotkey.code && modifiers == hotkey.modifiers
}

/// Gets the action for a KeyEvent in an input context.
///
pub fn get_action_for_event(
    event: &KeyEvent,
    context: InputContext,
    hotkeys: &Hotkeys,
) -> Option<HotkeyAction> {
    hotkeys
        .for_context(context)
        .iter()
        .find(|(_, hotkey)| matches_hotkey(event, hotkey))
        .map(|(action, _)| *action)
}

/// Builds a footer text string from hotkey configurations.
///
pub fn build_footer_text(
    hotkeys: &HashMap<HotkeyAction, Hotkey>,
    actions: &[(HotkeyAction, &str)],
) -> String {
    actions
        .iter()
        .filter_map(|(action, description)| {
            hotkeys
                .get(action)
                .map(|hotkey| format!(" {}: {}", format_hotkey_display(hotkey), description))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a hotkey for display in the footer.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if hotkey.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        _ => "Unknown".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}
