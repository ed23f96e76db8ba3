use crate::api::Api;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{CustomLogger, LogBuffer};
use crate::navigation::Navigator;
use crate::state::State;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    config: Config,
    navigator: Arc<Navigator>,
    state: Arc<Mutex<State>>,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, log_level: LevelFilter) -> Result<()> {
        let logs = LogBuffer::default();
        CustomLogger::install(log_level, &logs)?;

        info!("Starting application...");
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!(
                "Unknown theme '{}', falling back to the default.",
                config.theme_name
            );
            Theme::default()
        });
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let navigator = Arc::new(Navigator::new());
        let state = State::new(
            Some(tx),
            Arc::clone(&navigator),
            theme,
            config.hotkeys.clone(),
            logs,
        );
        let mut app = App {
            config,
            navigator,
            state: Arc::new(Mutex::new(state)),
        };
        app.start_network(rx);
        app.start_ui().await?;
        app.save_token().await;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous requests.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let navigator = Arc::clone(&self.navigator);
        let base_url = self.config.api_base_url.to_owned();
        let access_token = self.config.access_token.to_owned();
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("{}", AppError::RuntimeCreation(e.to_string()));
                    return;
                }
            };
            runtime.block_on(async {
                let mut api = Api::new(&base_url, access_token.as_deref());
                let mut network_event_handler =
                    NetworkEventHandler::new(&cloned_state, &mut api, navigator);
                while let Ok(network_event) = net_receiver.recv() {
                    if let Err(e) = network_event_handler.handle(network_event).await {
                        error!("Failed to handle network event: {}", e);
                    }
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. The terminal is restored even if the
    /// loop fails.
    ///
    async fn start_ui(&mut self) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        enable_raw_mode().map_err(terminal_error)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error)?;
        terminal.hide_cursor().map_err(terminal_error)?;

        let result = self.run(&mut terminal).await;

        disable_raw_mode().map_err(terminal_error)?;
        execute!(io::stdout(), LeaveAlternateScreen).map_err(terminal_error)?;
        terminal.show_cursor().map_err(terminal_error)?;
        result
    }

    async fn run<B: Backend>(&self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            state.refresh()?;
            terminal
                .draw(|frame| crate::ui::render(frame, &mut state))
                .map_err(terminal_error)?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }

    /// Persist the access token issued during this session.
    ///
    async fn save_token(&mut self) {
        let token = self.state.lock().await.access_token().map(str::to_owned);
        if let Some(token) = token {
            if self.config.access_token.as_deref() == Some(token.as_str()) {
                return;
            }
            if let Err(e) = self.config.save_token(token) {
                error!("Failed to save config on exit: {}", e);
            }
        }
    }
}

fn terminal_error(error: io::Error) -> AppError {
    AppError::Terminal(error.to_string())
}
