//! The navigation coordinator.
//!
//! `Navigator` is the single source of truth for which overlay is on screen.
//! Every operation applies its writes in one step and then notifies all
//! subscribers, even when the end state did not change.

use super::overlay::{Flag, Overlay, RecordsView, TitleBar};
use super::state::{PanelState, SelectedUser};
use log::*;
use serde_json::{Map, Value};
use tokio::sync::watch;

/// Specifying every transition the coordinator accepts.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Open,
    Close,
    HideTitle,
    ShowTitle,
    OpenRegistrationForm,
    OpenLoginForm,
    OpenFormAddNewOrg,
    OpenRegFormChoiceOrganisation,
    OpenAppDescription,
    DownloadApplication,
    InstructionsForStart,
    OpenAppContacts,
    OpenAppSupport,
    CloseContacts,
    OpenRecordsBlockWithData,
    OpenClientListBlockWithData,
    OpenModalRenameUser,
    CloseModalRenameUser,
    RegisterAgain,
    DismissRememberPassword,
}

/// Shared visibility state with publish/subscribe notification.
///
/// Created once by the application and handed to every consumer behind an
/// `Arc`. Operations take `&self` so any holder may issue transitions.
///
pub struct Navigator {
    state: watch::Sender<PanelState>,
}

impl Navigator {
    /// Return a new instance in the baseline state.
    ///
    pub fn new() -> Self {
        let (state, _) = watch::channel(PanelState::default());
        Navigator { state }
    }

    /// Return a copy of the current state.
    ///
    pub fn snapshot(&self) -> PanelState {
        self.state.borrow().clone()
    }

    /// Return the current value of a single flag.
    ///
    pub fn flag(&self, flag: Flag) -> bool {
        self.state.borrow().flag(flag)
    }

    /// Return a receiver that sees the current state immediately and is
    /// notified on every subsequent write.
    ///
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.state.subscribe()
    }

    /// Return a watch over a single named flag.
    ///
    pub fn watch_flag(&self, flag: Flag) -> FlagWatch {
        FlagWatch {
            flag,
            receiver: self.subscribe(),
        }
    }

    /// Apply a command by name.
    ///
    pub fn apply(&self, command: Command) {
        match command {
            Command::Open => self.open(),
            Command::Close => self.close(),
            Command::HideTitle => self.hide_title(),
            Command::ShowTitle => self.show_title(),
            Command::OpenRegistrationForm => self.open_registration_form(),
            Command::OpenLoginForm => self.open_login_form(),
            Command::OpenFormAddNewOrg => self.open_form_add_new_org(),
            Command::OpenRegFormChoiceOrganisation => self.open_reg_form_choice_organisation(),
            Command::OpenAppDescription => self.open_app_description(),
            Command::DownloadApplication => self.download_application(),
            Command::InstructionsForStart => self.instructions_for_start(),
            Command::OpenAppContacts => self.open_app_contacts(),
            Command::OpenAppSupport => self.open_app_support(),
            Command::CloseContacts => self.close_contacts(),
            Command::OpenRecordsBlockWithData => self.open_records_block_with_data(),
            Command::OpenClientListBlockWithData => self.open_client_list_block_with_data(),
            Command::OpenModalRenameUser => self.open_modal_rename_user(),
            Command::CloseModalRenameUser => self.close_modal_rename_user(),
            Command::RegisterAgain => self.register_again(),
            Command::DismissRememberPassword => self.dismiss_remember_password(),
        }
    }

    fn update(&self, modify: impl FnOnce(&mut PanelState)) {
        self.state.send_modify(modify);
    }

    /// Show the shell. Overlay flags are left alone.
    ///
    pub fn open(&self) {
        debug!("Opening shell...");
        self.update(|state| state.visible = true);
    }

    /// Hide the shell and show the title bar again. Overlay flags are left
    /// alone; they are only cleared by the next overlay transition.
    ///
    pub fn close(&self) {
        debug!("Closing shell...");
        self.update(|state| {
            state.visible = false;
            state.title_bar = TitleBar::Shown;
        });
    }

    /// Hide the title bar. Also dismisses the download prompt and the
    /// getting-started instructions.
    ///
    pub fn hide_title(&self) {
        debug!("Hiding title bar...");
        self.update(|state| {
            state.title_bar = TitleBar::Hidden;
            if matches!(state.overlay, Overlay::Download | Overlay::Instructions) {
                state.overlay = Overlay::None;
            }
        });
    }

    pub fn show_title(&self) {
        debug!("Showing title bar...");
        self.update(|state| state.title_bar = TitleBar::Shown);
    }

    /// Clear every overlay.
    ///
    pub fn reset_all_states(&self) {
        debug!("Resetting overlays...");
        self.update(reset_overlays);
    }

    /// Clear every overlay, then activate the given one, opening the shell
    /// first if the overlay is an outside entry point.
    ///
    fn switch_to(&self, overlay: Overlay) {
        debug!("Switching to overlay {:?}...", overlay);
        self.update(|state| {
            if overlay.opens_shell() {
                state.visible = true;
            }
            reset_overlays(state);
            state.overlay = overlay;
        });
    }

    pub fn open_registration_form(&self) {
        self.switch_to(Overlay::Registration);
    }

    pub fn open_login_form(&self) {
        self.switch_to(Overlay::Login);
    }

    pub fn open_form_add_new_org(&self) {
        self.switch_to(Overlay::AddOrganization);
    }

    pub fn open_reg_form_choice_organisation(&self) {
        self.switch_to(Overlay::OrganizationChoice);
    }

    pub fn open_app_description(&self) {
        self.switch_to(Overlay::Description);
    }

    pub fn download_application(&self) {
        self.switch_to(Overlay::Download);
    }

    pub fn instructions_for_start(&self) {
        self.switch_to(Overlay::Instructions);
    }

    pub fn open_app_contacts(&self) {
        self.switch_to(Overlay::Contacts);
    }

    pub fn open_app_support(&self) {
        self.switch_to(Overlay::Support);
    }

    /// Clear the contacts panel and close the shell. Other overlays are not
    /// reset.
    ///
    pub fn close_contacts(&self) {
        debug!("Closing contacts...");
        self.update(|state| {
            if state.overlay == Overlay::Contacts {
                state.overlay = Overlay::None;
            }
            state.visible = false;
            state.title_bar = TitleBar::Shown;
        });
    }

    /// Show the records block. The rename modal is left alone.
    ///
    pub fn open_records_block_with_data(&self) {
        debug!("Opening records block...");
        self.update(|state| state.records_view = RecordsView::Records);
    }

    pub fn open_client_list_block_with_data(&self) {
        debug!("Opening client list block...");
        self.update(|state| {
            state.records_view = RecordsView::ClientList;
            state.rename_user_modal = false;
        });
    }

    /// Open the rename modal, hiding the client list. The records block is
    /// left alone.
    ///
    pub fn open_modal_rename_user(&self) {
        debug!("Opening rename user modal...");
        self.update(|state| {
            if state.records_view == RecordsView::ClientList {
                state.records_view = RecordsView::Hidden;
            }
            state.rename_user_modal = true;
        });
    }

    pub fn close_modal_rename_user(&self) {
        debug!("Closing rename user modal...");
        self.update(|state| {
            if state.records_view == RecordsView::ClientList {
                state.records_view = RecordsView::Hidden;
            }
            state.rename_user_modal = false;
        });
    }

    /// Store the record the rename/detail modal operates on.
    ///
    pub fn set_selected_user(&self, record: Map<String, Value>) {
        self.update(|state| state.selected_user = SelectedUser::new(record));
    }

    pub fn selected_user(&self) -> SelectedUser {
        self.state.borrow().selected_user.clone()
    }

    pub fn set_registration_error(&self, value: bool) {
        self.update(|state| state.registration_error = value);
    }

    pub fn set_remember_password_prompt(&self, value: bool) {
        self.update(|state| state.remember_password_prompt = value);
    }

    /// Clear the registration error and return to the registration form.
    ///
    pub fn register_again(&self) {
        debug!("Registering again...");
        self.update(|state| {
            state.registration_error = false;
            state.overlay = Overlay::Registration;
        });
    }

    pub fn dismiss_remember_password(&self) {
        self.update(|state| state.remember_password_prompt = false);
    }
}

fn reset_overlays(state: &mut PanelState) {
    state.overlay = Overlay::None;
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new()
    }
}

/// Watch over one named flag of a `Navigator`.
///
pub struct FlagWatch {
    flag: Flag,
    receiver: watch::Receiver<PanelState>,
}

impl FlagWatch {
    pub fn flag(&self) -> Flag {
        self.flag
    }

    /// Return the current value.
    ///
    pub fn get(&self) -> bool {
        self.receiver.borrow().flag(self.flag)
    }

    /// Whether a write happened since the value was last seen.
    ///
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next write and return the value after it, or `None` if
    /// the coordinator is gone.
    ///
    pub async fn changed(&mut self) -> Option<bool> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().flag(self.flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use serde_json::json;

    const OVERLAY_COMMANDS: [(Command, Flag); 9] = [
        (Command::OpenRegistrationForm, Flag::RegistrationForm),
        (Command::OpenLoginForm, Flag::LoginForm),
        (Command::OpenFormAddNewOrg, Flag::AddOrganizationForm),
        (Command::OpenRegFormChoiceOrganisation, Flag::OrganizationChoice),
        (Command::OpenAppDescription, Flag::AppDescription),
        (Command::DownloadApplication, Flag::DownloadPrompt),
        (Command::InstructionsForStart, Flag::Instructions),
        (Command::OpenAppContacts, Flag::ContactsPanel),
        (Command::OpenAppSupport, Flag::SupportPanel),
    ];

    const RECORDS_COMMANDS: [Command; 4] = [
        Command::OpenRecordsBlockWithData,
        Command::OpenClientListBlockWithData,
        Command::OpenModalRenameUser,
        Command::CloseModalRenameUser,
    ];

    fn active_overlay_flags(navigator: &Navigator) -> Vec<Flag> {
        Flag::OVERLAYS
            .iter()
            .copied()
            .filter(|flag| navigator.flag(*flag))
            .collect()
    }

    fn overlay_flags(state: &PanelState) -> Vec<bool> {
        Flag::OVERLAYS.iter().map(|f| state.flag(*f)).collect()
    }

    fn records_flags(state: &PanelState) -> Vec<bool> {
        Flag::RECORDS.iter().map(|f| state.flag(*f)).collect()
    }

    #[test]
    fn test_new_is_baseline() {
        let navigator = Navigator::new();
        assert_eq!(navigator.snapshot(), PanelState::default());
        assert!(active_overlay_flags(&navigator).is_empty());
    }

    #[test]
    fn test_open_then_switch_keeps_one_overlay() {
        let navigator = Navigator::new();
        navigator.open_login_form();
        assert_eq!(active_overlay_flags(&navigator), vec![Flag::LoginForm]);

        navigator.open_app_contacts();
        assert_eq!(active_overlay_flags(&navigator), vec![Flag::ContactsPanel]);
        assert!(navigator.flag(Flag::Visible));
        assert!(!navigator.flag(Flag::LoginForm));
    }

    #[test]
    fn test_random_sequences_keep_one_overlay() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let navigator = Navigator::new();
            for _ in 0..20 {
                let (command, flag) = *OVERLAY_COMMANDS.choose(&mut rng).unwrap();
                navigator.apply(command);
                assert_eq!(active_overlay_flags(&navigator), vec![flag]);
            }
        }
    }

    #[test]
    fn test_entry_points_open_shell() {
        for (command, _) in &OVERLAY_COMMANDS[3..] {
            let navigator = Navigator::new();
            navigator.apply(*command);
            assert!(navigator.flag(Flag::Visible), "{:?}", command);
        }
    }

    #[test]
    fn test_inner_forms_leave_shell_hidden() {
        for (command, _) in &OVERLAY_COMMANDS[..3] {
            let navigator = Navigator::new();
            navigator.apply(*command);
            assert!(!navigator.flag(Flag::Visible), "{:?}", command);
        }
    }

    #[test]
    fn test_close_keeps_overlay() {
        let navigator = Navigator::new();
        navigator.open_app_support();
        navigator.hide_title();
        navigator.close();
        let state = navigator.snapshot();
        assert!(!state.is_visible());
        assert_eq!(state.title_bar(), TitleBar::Shown);
        assert_eq!(state.overlay(), Overlay::Support);
    }

    #[test]
    fn test_open_keeps_overlay() {
        let navigator = Navigator::new();
        navigator.open_registration_form();
        navigator.open();
        let state = navigator.snapshot();
        assert!(state.is_visible());
        assert_eq!(state.overlay(), Overlay::Registration);
    }

    #[test]
    fn test_close_contacts_is_idempotent() {
        let navigator = Navigator::new();
        navigator.open_app_contacts();
        navigator.close_contacts();
        let once = navigator.snapshot();
        navigator.close_contacts();
        let twice = navigator.snapshot();
        assert_eq!(once, twice);
        assert!(!twice.flag(Flag::ContactsPanel));
        assert!(!twice.is_visible());
    }

    #[test]
    fn test_close_contacts_shows_title() {
        let navigator = Navigator::new();
        navigator.open_app_contacts();
        navigator.hide_title();
        assert!(navigator.flag(Flag::TitleHidden));
        assert!(navigator.flag(Flag::ContactsPanel));

        navigator.close_contacts();
        let state = navigator.snapshot();
        assert_eq!(state.title_bar(), TitleBar::Shown);
        assert!(!state.flag(Flag::ContactsPanel));
        assert!(!state.is_visible());
    }

    #[test]
    fn test_close_contacts_leaves_other_overlay() {
        let navigator = Navigator::new();
        navigator.open_app_support();
        navigator.close_contacts();
        let state = navigator.snapshot();
        assert!(!state.is_visible());
        assert!(state.flag(Flag::SupportPanel));
    }

    #[test]
    fn test_records_commands_leave_overlays_alone() {
        let mut rng = rand::thread_rng();
        let navigator = Navigator::new();
        navigator.open_app_description();
        let before = overlay_flags(&navigator.snapshot());
        for _ in 0..100 {
            navigator.apply(*RECORDS_COMMANDS.choose(&mut rng).unwrap());
            let state = navigator.snapshot();
            assert_eq!(overlay_flags(&state), before);
            assert!(state.is_visible());
            assert!(!(state.flag(Flag::RecordsBlock) && state.flag(Flag::ClientListBlock)));
            assert!(!(state.flag(Flag::ClientListBlock) && state.flag(Flag::RenameUserModal)));
        }
    }

    #[test]
    fn test_overlay_commands_leave_records_alone() {
        let navigator = Navigator::new();
        navigator.open_records_block_with_data();
        navigator.open_modal_rename_user();
        let before = records_flags(&navigator.snapshot());
        for (command, _) in OVERLAY_COMMANDS {
            navigator.apply(command);
            assert_eq!(records_flags(&navigator.snapshot()), before);
        }
        navigator.close_contacts();
        navigator.hide_title();
        navigator.close();
        assert_eq!(records_flags(&navigator.snapshot()), before);
    }

    #[test]
    fn test_records_transitions() {
        let navigator = Navigator::new();

        navigator.open_client_list_block_with_data();
        let state = navigator.snapshot();
        assert_eq!(state.records_view(), RecordsView::ClientList);
        assert!(!state.is_rename_user_modal());

        navigator.open_modal_rename_user();
        let state = navigator.snapshot();
        assert_eq!(state.records_view(), RecordsView::Hidden);
        assert!(state.is_rename_user_modal());

        navigator.open_records_block_with_data();
        let state = navigator.snapshot();
        assert_eq!(state.records_view(), RecordsView::Records);
        assert!(state.is_rename_user_modal());

        navigator.close_modal_rename_user();
        let state = navigator.snapshot();
        assert_eq!(state.records_view(), RecordsView::Records);
        assert!(!state.is_rename_user_modal());

        navigator.open_modal_rename_user();
        navigator.open_client_list_block_with_data();
        let state = navigator.snapshot();
        assert_eq!(state.records_view(), RecordsView::ClientList);
        assert!(!state.is_rename_user_modal());

        navigator.close_modal_rename_user();
        assert_eq!(navigator.snapshot().records_view(), RecordsView::Hidden);
    }

    #[test]
    fn test_hide_title_side_effects() {
        for (command, flag) in OVERLAY_COMMANDS {
            let navigator = Navigator::new();
            navigator.apply(command);
            navigator.hide_title();
            let state = navigator.snapshot();
            assert!(!state.flag(Flag::DownloadPrompt));
            assert!(!state.flag(Flag::Instructions));
            assert!(state.flag(Flag::TitleHidden));
            if !matches!(flag, Flag::DownloadPrompt | Flag::Instructions) {
                assert!(state.flag(flag));
            }
        }
    }

    #[test]
    fn test_show_title() {
        let navigator = Navigator::new();
        navigator.download_application();
        navigator.show_title();
        let state = navigator.snapshot();
        assert_eq!(state.title_bar(), TitleBar::Shown);
        assert!(state.flag(Flag::DownloadPrompt));
    }

    #[test]
    fn test_repeats_are_idempotent() {
        for (command, _) in OVERLAY_COMMANDS {
            let once = Navigator::new();
            once.apply(command);
            let many = Navigator::new();
            for _ in 0..5 {
                many.apply(command);
            }
            assert_eq!(once.snapshot(), many.snapshot(), "{:?}", command);
        }
    }

    #[test]
    fn test_reset_all_states() {
        let navigator = Navigator::new();
        navigator.open_app_support();
        navigator.reset_all_states();
        let state = navigator.snapshot();
        assert_eq!(state.overlay(), Overlay::None);
        assert!(state.is_visible());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let navigator = Navigator::new();

        navigator.open_app_contacts();
        let state = navigator.snapshot();
        assert!(state.is_visible());
        assert_eq!(active_overlay_flags(&navigator), vec![Flag::ContactsPanel]);

        navigator.close_contacts();
        let state = navigator.snapshot();
        assert!(!state.is_visible());
        assert!(!state.flag(Flag::ContactsPanel));

        navigator.open_login_form();
        let state = navigator.snapshot();
        assert!(!state.is_visible());
        assert!(state.flag(Flag::LoginForm));

        navigator.open();
        let state = navigator.snapshot();
        assert!(state.is_visible());
        assert!(state.flag(Flag::LoginForm));
    }

    #[test]
    fn test_error_flags() {
        let navigator = Navigator::new();
        navigator.open_app_support();
        navigator.set_registration_error(true);
        navigator.set_remember_password_prompt(true);
        assert!(navigator.flag(Flag::RegistrationError));
        assert!(navigator.flag(Flag::RememberPasswordPrompt));
        assert!(navigator.flag(Flag::SupportPanel));

        navigator.register_again();
        assert!(!navigator.flag(Flag::RegistrationError));
        assert_eq!(active_overlay_flags(&navigator), vec![Flag::RegistrationForm]);

        navigator.dismiss_remember_password();
        assert!(!navigator.flag(Flag::RememberPasswordPrompt));
    }

    #[test]
    fn test_selected_user() {
        let navigator = Navigator::new();
        assert!(navigator.selected_user().is_empty());
        let record = json!({ "name": "Grace", "email": "grace@example.com" });
        navigator.set_selected_user(record.as_object().unwrap().clone());
        navigator.open_modal_rename_user();
        assert_eq!(navigator.selected_user().get_str("name"), Some("Grace"));
    }

    #[test]
    fn test_subscriber_sees_current_value() {
        let navigator = Navigator::new();
        navigator.open_app_support();
        let receiver = navigator.subscribe();
        assert_eq!(receiver.borrow().overlay(), Overlay::Support);
        assert!(!receiver.has_changed().unwrap());

        let watch = navigator.watch_flag(Flag::SupportPanel);
        assert!(watch.get());
        assert!(!watch.has_changed());
    }

    #[test]
    fn test_every_write_notifies() {
        let navigator = Navigator::new();
        let mut receiver = navigator.subscribe();

        navigator.show_title();
        assert!(receiver.has_changed().unwrap());
        let _ = receiver.borrow_and_update();
        assert!(!receiver.has_changed().unwrap());

        navigator.open_login_form();
        navigator.open_login_form();
        assert!(receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_flag_watch_changed() {
        let navigator = Navigator::new();
        let mut watch = navigator.watch_flag(Flag::ContactsPanel);
        assert!(!watch.get());

        navigator.open_app_contacts();
        assert_eq!(watch.changed().await, Some(true));

        navigator.close_contacts();
        assert_eq!(watch.changed().await, Some(false));

        drop(navigator);
        assert_eq!(watch.changed().await, None);
    }
}
