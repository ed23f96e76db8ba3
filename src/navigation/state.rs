//! Panel state snapshot.

use super::overlay::{Flag, Overlay, RecordsView, TitleBar};
use serde_json::{Map, Value};

/// Free-form record of the user selected for the rename/detail modal.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedUser(Map<String, Value>);

impl SelectedUser {
    /// Return a new instance wrapping the given record.
    ///
    pub fn new(record: Map<String, Value>) -> Self {
        SelectedUser(record)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Return the value under `key` when it is a string.
    ///
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for SelectedUser {
    fn from(record: Map<String, Value>) -> Self {
        SelectedUser(record)
    }
}

/// Houses every cell of the shared visibility state. The default value is
/// the baseline: shell hidden, title shown, no overlay, no sub-view.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub(super) visible: bool,
    pub(super) title_bar: TitleBar,
    pub(super) overlay: Overlay,
    pub(super) records_view: RecordsView,
    pub(super) rename_user_modal: bool,
    pub(super) selected_user: SelectedUser,
    pub(super) registration_error: bool,
    pub(super) remember_password_prompt: bool,
}

impl PanelState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title_bar(&self) -> TitleBar {
        self.title_bar
    }

    /// Return the active overlay, `Overlay::None` if nothing is open.
    ///
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn records_view(&self) -> RecordsView {
        self.records_view
    }

    pub fn is_rename_user_modal(&self) -> bool {
        self.rename_user_modal
    }

    pub fn selected_user(&self) -> &SelectedUser {
        &self.selected_user
    }

    pub fn has_registration_error(&self) -> bool {
        self.registration_error
    }

    pub fn has_remember_password_prompt(&self) -> bool {
        self.remember_password_prompt
    }

    /// Return the value of a named flag.
    ///
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Visible => self.visible,
            Flag::TitleHidden => self.title_bar == TitleBar::Hidden,
            Flag::RegistrationForm => self.overlay == Overlay::Registration,
            Flag::OrganizationChoice => self.overlay == Overlay::OrganizationChoice,
            Flag::AddOrganizationForm => self.overlay == Overlay::AddOrganization,
            Flag::LoginForm => self.overlay == Overlay::Login,
            Flag::AppDescription => self.overlay == Overlay::Description,
            Flag::DownloadPrompt => self.overlay == Overlay::Download,
            Flag::Instructions => self.overlay == Overlay::Instructions,
            Flag::ContactsPanel => self.overlay == Overlay::Contacts,
            Flag::SupportPanel => self.overlay == Overlay::Support,
            Flag::RecordsBlock => self.records_view == RecordsView::Records,
            Flag::ClientListBlock => self.records_view == RecordsView::ClientList,
            Flag::RenameUserModal => self.rename_user_modal,
            Flag::RegistrationError => self.registration_error,
            Flag::RememberPasswordPrompt => self.remember_password_prompt,
        }
    }

    /// Return the overlay that should be drawn, if any. An overlay that is
    /// set while the shell is hidden stays latent until the shell opens.
    ///
    pub fn rendered_overlay(&self) -> Option<Overlay> {
        if self.visible && self.overlay != Overlay::None {
            Some(self.overlay)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_baseline() {
        let state = PanelState::default();
        assert!(!state.is_visible());
        assert_eq!(state.title_bar(), TitleBar::Shown);
        assert_eq!(state.overlay(), Overlay::None);
        assert_eq!(state.records_view(), RecordsView::Hidden);
        assert!(state.selected_user().is_empty());
        for flag in Flag::OVERLAYS.iter().chain(Flag::RECORDS.iter()) {
            assert!(!state.flag(*flag));
        }
        assert!(!state.flag(Flag::Visible));
        assert!(!state.flag(Flag::TitleHidden));
        assert!(!state.flag(Flag::RegistrationError));
        assert!(!state.flag(Flag::RememberPasswordPrompt));
    }

    #[test]
    fn test_flag_follows_overlay() {
        for overlay in Overlay::ALL {
            let state = PanelState {
                overlay,
                ..PanelState::default()
            };
            let expected = overlay.flag().unwrap();
            for flag in Flag::OVERLAYS {
                assert_eq!(state.flag(flag), flag == expected);
            }
        }
    }

    #[test]
    fn test_rendered_overlay_requires_shell() {
        let mut state = PanelState {
            overlay: Overlay::Login,
            ..PanelState::default()
        };
        assert_eq!(state.rendered_overlay(), None);
        state.visible = true;
        assert_eq!(state.rendered_overlay(), Some(Overlay::Login));
    }

    #[test]
    fn test_selected_user_accessors() {
        let record = json!({ "name": "Ada", "age": 36 });
        let user = SelectedUser::new(record.as_object().unwrap().clone());
        assert_eq!(user.get_str("name"), Some("Ada"));
        assert_eq!(user.get_str("age"), None);
        assert_eq!(user.get("age"), Some(&json!(36)));
        assert_eq!(user.iter().count(), 2);
    }
}
