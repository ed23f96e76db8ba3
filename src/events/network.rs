use crate::api::{
    Api, ApiError, Credentials, NewOrganization, Registration, SupportRequest,
};
use crate::events::PanelScope;
use crate::feedback::report_failure;
use crate::navigation::Navigator;
use crate::state::State;
use anyhow::Result;
use log::*;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Specify different network event types. Every event carries the scope
/// token of the panel that issued it.
///
#[derive(Debug, Clone)]
pub enum Event {
    SubmitSupport {
        request: SupportRequest,
        scope: CancellationToken,
    },
    Register {
        registration: Registration,
        scope: CancellationToken,
    },
    Login {
        credentials: Credentials,
        scope: CancellationToken,
    },
    Organizations {
        scope: CancellationToken,
    },
    AddOrganization {
        organization: NewOrganization,
        scope: CancellationToken,
    },
    UploadPhoto {
        path: PathBuf,
        scope: CancellationToken,
    },
}

impl Event {
    /// Return the event name used in log lines.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            Event::SubmitSupport { .. } => "SubmitSupport",
            Event::Register { .. } => "Register",
            Event::Login { .. } => "Login",
            Event::Organizations { .. } => "Organizations",
            Event::AddOrganization { .. } => "AddOrganization",
            Event::UploadPhoto { .. } => "UploadPhoto",
        }
    }
}

/// Await `request` within `scope`. Returns `None` if the scope was torn down
/// before the result could be applied.
///
async fn scoped<T>(
    scope: &CancellationToken,
    request: impl Future<Output = Result<T, ApiError>>,
) -> Option<Result<T, ApiError>> {
    let output = PanelScope::guard(scope, request).await;
    if scope.is_cancelled() {
        None
    } else {
        output
    }
}

fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a mut Api,
    navigator: Arc<Navigator>,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, api: &'a mut Api, navigator: Arc<Navigator>) -> Self {
        Handler {
            state,
            api,
            navigator,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{}'...", event.name());
        match event {
            Event::SubmitSupport { request, scope } => self.submit_support(request, scope).await,
            Event::Register {
                registration,
                scope,
            } => self.register(registration, scope).await,
            Event::Login { credentials, scope } => self.login(credentials, scope).await,
            Event::Organizations { scope } => self.organizations(scope).await,
            Event::AddOrganization {
                organization,
                scope,
            } => self.add_organization(organization, scope).await,
            Event::UploadPhoto { path, scope } => self.upload_photo(path, scope).await,
        }
        Ok(())
    }

    /// Send a support message and close the shell.
    ///
    async fn submit_support(&mut self, request: SupportRequest, scope: CancellationToken) {
        info!("Sending support message...");
        match scoped(&scope, self.api.submit_support_message(&request)).await {
            Some(Ok(reply)) => {
                let mut state = self.state.lock().await;
                state
                    .notices_mut()
                    .success(message_or(reply.message, "Message sent"));
                self.navigator.close();
                info!("Support message sent.");
            }
            Some(Err(e)) => self.fail(e).await,
            None => abandoned("support message"),
        }
    }

    /// Register an account and continue with the organization choice.
    ///
    async fn register(&mut self, registration: Registration, scope: CancellationToken) {
        info!("Registering {}...", registration.email);
        match scoped(&scope, self.api.register(&registration)).await {
            Some(Ok(reply)) => {
                let mut state = self.state.lock().await;
                state
                    .notices_mut()
                    .success(message_or(reply.message, "Registration complete"));
                self.navigator.open_reg_form_choice_organisation();
                info!("Registered {}.", registration.email);
            }
            Some(Err(e)) => self.fail(e).await,
            None => abandoned("registration"),
        }
    }

    /// Log in, remember the user and token, and close the shell.
    ///
    async fn login(&mut self, credentials: Credentials, scope: CancellationToken) {
        info!("Logging in as {}...", credentials.email);
        match scoped(&scope, self.api.login(&credentials)).await {
            Some(Ok(reply)) => {
                let mut state = self.state.lock().await;
                state
                    .notices_mut()
                    .success(message_or(reply.message, "Logged in"));
                state.set_access_token(reply.data.token);
                self.navigator.set_selected_user(reply.data.user);
                self.navigator.close();
                info!("Logged in as {}.", credentials.email);
            }
            Some(Err(e)) => self.fail(e).await,
            None => abandoned("login"),
        }
    }

    /// Update state with the organizations available to the user.
    ///
    async fn organizations(&mut self, scope: CancellationToken) {
        info!("Fetching organizations...");
        match scoped(&scope, self.api.organizations()).await {
            Some(Ok(organizations)) => {
                info!("Received {} organizations.", organizations.len());
                let mut state = self.state.lock().await;
                state.set_organizations(organizations);
            }
            Some(Err(e)) => self.fail(e).await,
            None => abandoned("organization list"),
        }
    }

    /// Create an organization and return to the organization choice.
    ///
    async fn add_organization(&mut self, organization: NewOrganization, scope: CancellationToken) {
        info!("Adding organization '{}'...", organization.name);
        match scoped(&scope, self.api.add_organization(&organization)).await {
            Some(Ok(reply)) => {
                let mut state = self.state.lock().await;
                state
                    .notices_mut()
                    .success(message_or(reply.message, "Organization added"));
                state.push_organization(reply.data);
                self.navigator.open_reg_form_choice_organisation();
            }
            Some(Err(e)) => self.fail(e).await,
            None => abandoned("new organization"),
        }
    }

    /// Upload a new photo for the user.
    ///
    async fn upload_photo(&mut self, path: PathBuf, scope: CancellationToken) {
        info!("Uploading photo {}...", path.display());
        match scoped(&scope, self.api.upload_photo(&path)).await {
            Some(Ok(reply)) => {
                debug!("Photo stored at {}.", reply.data.url);
                let mut state = self.state.lock().await;
                state
                    .notices_mut()
                    .success(message_or(reply.message, "Photo uploaded"));
            }
            Some(Err(e)) => self.fail(e).await,
            None => abandoned("photo upload"),
        }
    }

    async fn fail(&self, error: ApiError) {
        let mut state = self.state.lock().await;
        report_failure(&error, &self.navigator, state.notices_mut());
    }
}

fn abandoned(what: &str) {
    debug!("Dropping {} result for a closed panel.", what);
}
