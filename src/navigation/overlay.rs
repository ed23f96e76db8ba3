//! Overlay, title bar and sub-view types.
//!
//! This module contains the enumerations that make up the panel state:
//! the primary overlay register, the title bar toggle, the records sub-view
//! and the named flags consumers read to decide what to render.

/// Specifying the top-level overlays. At most one is active at a time.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overlay {
    #[default]
    None,
    Registration,
    OrganizationChoice,
    AddOrganization,
    Login,
    Description,
    Download,
    Instructions,
    Contacts,
    Support,
}

impl Overlay {
    /// Every overlay other than `None`.
    pub const ALL: [Overlay; 9] = [
        Overlay::Registration,
        Overlay::OrganizationChoice,
        Overlay::AddOrganization,
        Overlay::Login,
        Overlay::Description,
        Overlay::Download,
        Overlay::Instructions,
        Overlay::Contacts,
        Overlay::Support,
    ];

    /// Return the display title for this overlay.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            Overlay::None => "",
            Overlay::Registration => "Registration",
            Overlay::OrganizationChoice => "Choose Organization",
            Overlay::AddOrganization => "Add Organization",
            Overlay::Login => "Log In",
            Overlay::Description => "About",
            Overlay::Download => "Download",
            Overlay::Instructions => "Getting Started",
            Overlay::Contacts => "Contacts",
            Overlay::Support => "Support",
        }
    }

    /// Whether opening this overlay also opens the shell. The registration,
    /// login and add-organization forms are only reached from inside an
    /// already visible shell.
    ///
    pub fn opens_shell(&self) -> bool {
        !matches!(
            self,
            Overlay::None | Overlay::Registration | Overlay::Login | Overlay::AddOrganization
        )
    }

    /// Return the flag that reports this overlay as active.
    ///
    pub fn flag(&self) -> Option<Flag> {
        match self {
            Overlay::None => None,
            Overlay::Registration => Some(Flag::RegistrationForm),
            Overlay::OrganizationChoice => Some(Flag::OrganizationChoice),
            Overlay::AddOrganization => Some(Flag::AddOrganizationForm),
            Overlay::Login => Some(Flag::LoginForm),
            Overlay::Description => Some(Flag::AppDescription),
            Overlay::Download => Some(Flag::DownloadPrompt),
            Overlay::Instructions => Some(Flag::Instructions),
            Overlay::Contacts => Some(Flag::ContactsPanel),
            Overlay::Support => Some(Flag::SupportPanel),
        }
    }
}

/// Specifying whether the title bar is shown.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleBar {
    #[default]
    Shown,
    Hidden,
}

/// Specifying which block of the records panel is showing.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordsView {
    #[default]
    Hidden,
    Records,
    ClientList,
}

/// Named boolean cells of the panel state.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Visible,
    TitleHidden,
    RegistrationForm,
    OrganizationChoice,
    AddOrganizationForm,
    LoginForm,
    AppDescription,
    DownloadPrompt,
    Instructions,
    ContactsPanel,
    SupportPanel,
    RecordsBlock,
    ClientListBlock,
    RenameUserModal,
    RegistrationError,
    RememberPasswordPrompt,
}

impl Flag {
    /// Flags belonging to the primary overlay group.
    pub const OVERLAYS: [Flag; 9] = [
        Flag::RegistrationForm,
        Flag::OrganizationChoice,
        Flag::AddOrganizationForm,
        Flag::LoginForm,
        Flag::AppDescription,
        Flag::DownloadPrompt,
        Flag::Instructions,
        Flag::ContactsPanel,
        Flag::SupportPanel,
    ];

    /// Flags belonging to the records sub-navigation.
    pub const RECORDS: [Flag; 3] = [
        Flag::RecordsBlock,
        Flag::ClientListBlock,
        Flag::RenameUserModal,
    ];
}
