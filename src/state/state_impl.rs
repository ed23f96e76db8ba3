use crate::api::Organization;
use crate::app::NetworkEventSender;
use crate::config::{Hotkeys, InputContext};
use crate::events::network::Event as NetworkEvent;
use crate::events::{Panel, PanelScopes};
use crate::feedback::Notices;
use crate::logger::LogBuffer;
use crate::navigation::{Navigator, Overlay, PanelState, TitleBar};
use crate::ui::Theme;
use log::*;
use ratatui::widgets::ListState;
use std::sync::Arc;
use tokio::sync::watch;

use super::error::StateError;
use super::form::{Form, FormKind, FormRequest};

/// Houses data representative of application state.
///
/// Visibility of every panel is owned by the shared `Navigator`; this struct
/// keeps the latest copy of it for rendering together with the data shown
/// inside the panels.
pub struct State {
    net_sender: Option<NetworkEventSender>,
    navigator: Arc<Navigator>,
    updates: watch::Receiver<PanelState>,
    panel: PanelState,
    scopes: PanelScopes,
    form: Option<Form>,
    organizations: Vec<Organization>,
    organizations_list_state: ListState,
    selected_organization: Option<Organization>,
    notices: Notices,
    access_token: Option<String>,
    theme: Theme,
    hotkeys: Hotkeys,
    logs: LogBuffer,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State::new(
            None,
            Arc::new(Navigator::new()),
            Theme::default(),
            Hotkeys::default(),
            LogBuffer::default(),
        )
    }
}

impl State {
    pub fn new(
        net_sender: Option<NetworkEventSender>,
        navigator: Arc<Navigator>,
        theme: Theme,
        hotkeys: Hotkeys,
        logs: LogBuffer,
    ) -> Self {
        let updates = navigator.subscribe();
        let panel = updates.borrow().clone();
        let mut scopes = PanelScopes::new();
        scopes.sync(&panel);
        let form = scopes
            .current()
            .panel()
            .and_then(FormKind::for_panel)
            .map(Form::new);
        State {
            net_sender,
            navigator,
            updates,
            panel,
            scopes,
            form,
            organizations: vec![],
            organizations_list_state: ListState::default(),
            selected_organization: None,
            notices: Notices::new(),
            access_token: None,
            theme,
            hotkeys,
            logs,
        }
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    /// Return the copy of the coordinator state used for rendering.
    ///
    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// Pick up coordinator writes since the last refresh. When the panel on
    /// screen changes, the previous panel's requests are abandoned, its form
    /// is discarded and the new panel is prepared.
    ///
    pub fn refresh(&mut self) -> Result<(), StateError> {
        if !self.updates.has_changed().unwrap_or(false) {
            return Ok(());
        }
        self.panel = self.updates.borrow_and_update().clone();
        if !self.scopes.sync(&self.panel) {
            return Ok(());
        }
        let panel = self.scopes.current().panel();
        debug!("Panel on screen changed to {:?}.", panel);
        self.form = panel.and_then(FormKind::for_panel).map(Form::new);
        if panel == Some(Panel::Overlay(Overlay::OrganizationChoice)) {
            self.dispatch(NetworkEvent::Organizations {
                scope: self.scopes.current().token(),
            })?;
        }
        Ok(())
    }

    /// Return the panel drawn on top of the page.
    ///
    pub fn on_screen(&self) -> Option<Panel> {
        self.scopes.current().panel()
    }

    pub fn is_choosing_organization(&self) -> bool {
        self.on_screen() == Some(Panel::Overlay(Overlay::OrganizationChoice))
    }

    /// Return which set of hotkeys applies.
    ///
    pub fn input_context(&self) -> InputContext {
        if self.form.is_some() {
            InputContext::Form
        } else if self.on_screen().is_some() {
            InputContext::Overlay
        } else {
            InputContext::Page
        }
    }

    /// Close the panel on top using the transition that belongs to it.
    ///
    pub fn close_panel(&mut self) -> &mut Self {
        match self.on_screen() {
            Some(Panel::Overlay(Overlay::Contacts)) => self.navigator.close_contacts(),
            Some(Panel::RenameUser) => self.navigator.close_modal_rename_user(),
            Some(Panel::Overlay(_)) => self.navigator.close(),
            None => debug!("Nothing to close."),
        }
        self
    }

    pub fn toggle_title(&mut self) -> &mut Self {
        match self.panel.title_bar() {
            TitleBar::Shown => self.navigator.hide_title(),
            TitleBar::Hidden => self.navigator.show_title(),
        }
        self
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.form.as_mut()
    }

    /// Send the request built from the open form. The request is attached to
    /// the panel's scope, so it is abandoned if the panel goes away.
    ///
    pub fn submit_form(&mut self) -> Result<(), StateError> {
        let form = self.form.as_ref().ok_or(StateError::NoActiveForm)?;
        let scope = self.scopes.current().token();
        let event = match form.request() {
            FormRequest::Registration(registration) => NetworkEvent::Register {
                registration,
                scope,
            },
            FormRequest::Login(credentials) => NetworkEvent::Login { credentials, scope },
            FormRequest::AddOrganization(organization) => NetworkEvent::AddOrganization {
                organization,
                scope,
            },
            FormRequest::Support(request) => NetworkEvent::SubmitSupport { request, scope },
            FormRequest::Photo(path) => NetworkEvent::UploadPhoto { path, scope },
        };
        self.dispatch(event)
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    /// Replace the organization list and select its first entry.
    ///
    pub fn set_organizations(&mut self, organizations: Vec<Organization>) -> &mut Self {
        self.organizations = organizations;
        self.organizations_list_state
            .select(if self.organizations.is_empty() {
                None
            } else {
                Some(0)
            });
        self
    }

    /// Append a newly created organization and select it.
    ///
    pub fn push_organization(&mut self, organization: Organization) -> &mut Self {
        self.organizations.push(organization);
        self.organizations_list_state
            .select(Some(self.organizations.len() - 1));
        self
    }

    pub fn get_organizations_list_state(&mut self) -> &mut ListState {
        &mut self.organizations_list_state
    }

    pub fn current_organization_index(&self) -> Option<usize> {
        self.organizations_list_state.selected()
    }

    pub fn next_organization(&mut self) -> &mut Self {
        if self.organizations.is_empty() {
            return self;
        }
        let next = match self.organizations_list_state.selected() {
            Some(i) if i + 1 < self.organizations.len() => i + 1,
            _ => 0,
        };
        self.organizations_list_state.select(Some(next));
        self
    }

    pub fn previous_organization(&mut self) -> &mut Self {
        if self.organizations.is_empty() {
            return self;
        }
        let previous = match self.organizations_list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.organizations.len() - 1,
        };
        self.organizations_list_state.select(Some(previous));
        self
    }

    /// Choose the highlighted organization and close the panel.
    ///
    pub fn select_organization(&mut self) -> Result<(), StateError> {
        let organization = self
            .organizations_list_state
            .selected()
            .and_then(|index| self.organizations.get(index))
            .cloned()
            .ok_or(StateError::NoOrganizationSelected)?;
        info!("Selected organization '{}'.", organization.name);
        self.notices
            .success(format!("Organization '{}' selected", organization.name));
        self.selected_organization = Some(organization);
        self.navigator.close();
        Ok(())
    }

    pub fn selected_organization(&self) -> Option<&Organization> {
        self.selected_organization.as_ref()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn set_access_token(&mut self, token: String) -> &mut Self {
        self.access_token = Some(token);
        self
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn hotkeys(&self) -> &Hotkeys {
        &self.hotkeys
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    /// Send a network event to the network thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) -> Result<(), StateError> {
        match &self.net_sender {
            Some(net_sender) => net_sender.send(event).map_err(|err| {
                error!("Received error from network dispatch: {}", err);
                StateError::ChannelClosed {
                    event: err.0.name().to_string(),
                }
            }),
            None => {
                warn!("No network thread for event '{}'.", event.name());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Flag;
    use fake::{Fake, Faker};
    use std::sync::mpsc;

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

    fn type_into(state: &mut State, text: &str) {
        for c in text.chars() {
            state.form_mut().unwrap().push_char(c);
        }
    }

    #[test]
    fn test_refresh_follows_navigator() {
        let (mut state, _rx) = state_with_channel();
        assert_eq!(state.input_context(), InputContext::Page);

        state.navigator().open_app_description();
        assert!(!state.panel().is_visible());
        state.refresh().unwrap();
        assert!(state.panel().is_visible());
        assert_eq!(
            state.on_screen(),
            Some(Panel::Overlay(Overlay::Description))
        );
        assert_eq!(state.input_context(), InputContext::Overlay);
        assert!(state.form().is_none());
    }

    #[test]
    fn test_form_follows_panel() {
        let (mut state, _rx) = state_with_channel();
        state.navigator().open_app_support();
        state.refresh().unwrap();
        assert_eq!(state.input_context(), InputContext::Form);
        assert_eq!(state.form().unwrap().kind(), FormKind::Support);

        type_into(&mut state, "Ada");
        state.navigator().show_title();
        state.refresh().unwrap();
        assert_eq!(state.form().unwrap().fields()[0].value, "Ada");

        state.navigator().open_app_contacts();
        state.refresh().unwrap();
        assert!(state.form().is_none());
    }

    #[test]
    fn test_registration_form_needs_shell() {
        let (mut state, _rx) = state_with_channel();
        state.navigator().open_registration_form();
        state.refresh().unwrap();
        assert_eq!(state.on_screen(), None);
        assert!(state.form().is_none());

        state.navigator().open();
        state.refresh().unwrap();
        assert_eq!(state.form().unwrap().kind(), FormKind::Registration);
    }

    #[test]
    fn test_organization_choice_fetches_list() {
        let (mut state, rx) = state_with_channel();
        state.navigator().open_reg_form_choice_organisation();
        state.refresh().unwrap();
        match rx.try_recv().unwrap() {
            NetworkEvent::Organizations { scope } => assert!(!scope.is_cancelled()),
            other => panic!("unexpected event {:?}", other.name()),
        }

        // Repeated writes keep the same panel and do not fetch again.
        state.navigator().open_reg_form_choice_organisation();
        state.refresh().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_carries_panel_scope() {
        let (mut state, rx) = state_with_channel();
        state.navigator().open_app_support();
        state.refresh().unwrap();
        type_into(&mut state, "Ada");
        state.submit_form().unwrap();

        let scope = match rx.try_recv().unwrap() {
            NetworkEvent::SubmitSupport { request, scope } => {
                assert_eq!(request.name, "Ada");
                scope
            }
            other => panic!("unexpected event {:?}", other.name()),
        };
        assert!(!scope.is_cancelled());

        state.close_panel();
        state.refresh().unwrap();
        assert!(scope.is_cancelled());
    }

    #[test]
    fn test_submit_without_form() {
        let (mut state, _rx) = state_with_channel();
        assert!(matches!(
            state.submit_form(),
            Err(StateError::NoActiveForm)
        ));
    }

    #[test]
    fn test_dispatch_after_network_thread_exit() {
        let (mut state, rx) = state_with_channel();
        drop(rx);
        state.navigator().open_reg_form_choice_organisation();
        assert!(matches!(
            state.refresh(),
            Err(StateError::ChannelClosed { .. })
        ));
    }

    #[test]
    fn test_close_panel_uses_matching_transition() {
        let (mut state, _rx) = state_with_channel();
        state.navigator().open_app_contacts();
        state.refresh().unwrap();
        state.close_panel();
        assert!(!state.navigator().flag(Flag::ContactsPanel));
        assert!(!state.navigator().flag(Flag::Visible));

        state.navigator().open_modal_rename_user();
        state.refresh().unwrap();
        assert_eq!(state.on_screen(), Some(Panel::RenameUser));
        assert_eq!(state.form().unwrap().kind(), FormKind::Photo);
        state.close_panel();
        assert!(!state.navigator().flag(Flag::RenameUserModal));

        state.navigator().open_app_description();
        state.refresh().unwrap();
        state.close_panel();
        assert!(!state.navigator().flag(Flag::Visible));
        assert!(state.navigator().flag(Flag::AppDescription));
    }

    #[test]
    fn test_toggle_title() {
        let (mut state, _rx) = state_with_channel();
        state.toggle_title().refresh().unwrap();
        assert!(state.panel().flag(Flag::TitleHidden));
        state.toggle_title().refresh().unwrap();
        assert!(!state.panel().flag(Flag::TitleHidden));
    }

    #[test]
    fn test_organization_navigation_and_selection() {
        let (mut state, _rx) = state_with_channel();
        assert!(matches!(
            state.select_organization(),
            Err(StateError::NoOrganizationSelected)
        ));

        let organizations: Vec<Organization> = (0..3).map(|_| Faker.fake()).collect();
        state.set_organizations(organizations.clone());
        assert_eq!(state.current_organization_index(), Some(0));
        state.previous_organization();
        assert_eq!(state.current_organization_index(), Some(2));
        state.next_organization();
        assert_eq!(state.current_organization_index(), Some(0));
        state.next_organization();

        state.navigator().open_reg_form_choice_organisation();
        state.select_organization().unwrap();
        assert_eq!(state.selected_organization(), Some(&organizations[1]));
        assert!(!state.navigator().flag(Flag::Visible));
        assert!(state.notices().latest().unwrap().text().contains(&organizations[1].name));
    }

    #[test]
    fn test_push_organization_selects_it() {
        let (mut state, _rx) = state_with_channel();
        state.set_organizations(vec![Faker.fake()]);
        let created: Organization = Faker.fake();
        state.push_organization(created.clone());
        assert_eq!(state.current_organization_index(), Some(1));
        assert_eq!(state.organizations().last(), Some(&created));
    }
}
