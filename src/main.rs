mod api;
mod cli;
mod commands;
mod config;
mod logging;
mod models;
mod ui;

use std::io;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use crate::api::{user_message, Api};
use crate::cli::{Cli, Command};
use crate::ui::{
    clients::{self, ClientsScreen},
    dashboard::{render_dashboard, DashboardState},
    layout::{render_shell, Screen, Shell},
    list_view::render_list,
    reservations::{self, ReservationsScreen},
    vehicles::{self, VehiclesScreen},
};

// Main application state
struct App {
    api: Api,
    shell: Shell,
    dashboard: DashboardState,
    vehicles: VehiclesScreen,
    clients: ClientsScreen,
    reservations: ReservationsScreen,
}

impl App {
    fn new(api: Api) -> Self {
        let mut app = Self {
            shell: Shell::new(),
            dashboard: DashboardState::new(),
            vehicles: vehicles::screen(api.clone()),
            clients: clients::screen(api.clone()),
            reservations: reservations::screen(api.clone()),
            api,
        };
        app.dashboard.begin_load();
        app
    }

    /// Switch screens; the target fetches its data again on every activation.
    fn open(&mut self, screen: Screen) {
        if !self.shell.navigate(screen) {
            return;
        }
        match screen {
            Screen::Dashboard => self.dashboard.begin_load(),
            Screen::Vehicles => self.vehicles.view.begin_load(),
            Screen::Clients => self.clients.view.begin_load(),
            Screen::Reservations => self.reservations.view.begin_load(),
        }
    }

    fn is_loading(&self) -> bool {
        match self.shell.current {
            Screen::Dashboard => self.dashboard.is_loading(),
            Screen::Vehicles => self.vehicles.view.is_loading(),
            Screen::Clients => self.clients.view.is_loading(),
            Screen::Reservations => self.reservations.view.is_loading(),
        }
    }

    async fn load_current(&mut self) {
        match self.shell.current {
            Screen::Dashboard => self.dashboard.load(&self.api).await,
            Screen::Vehicles => self.vehicles.load().await,
            Screen::Clients => self.clients.load().await,
            Screen::Reservations => self.reservations.load().await,
        }
    }

    /// True while the active screen owns the keyboard (modal, prompt, search box).
    fn captures_input(&self) -> bool {
        match self.shell.current {
            Screen::Dashboard => false,
            Screen::Vehicles => self.vehicles.view.captures_input(),
            Screen::Clients => self.clients.view.captures_input(),
            Screen::Reservations => self.reservations.view.captures_input(),
        }
    }

    /// Returns true when the user asked to quit.
    async fn handle_key(&mut self, key: KeyCode) -> bool {
        if !self.captures_input() {
            match key {
                KeyCode::Char('q') => return true,
                KeyCode::Tab => {
                    self.shell.toggle_sidebar();
                    return false;
                }
                KeyCode::Char(c) => {
                    if let Some(screen) = Screen::from_key(c) {
                        self.open(screen);
                        return false;
                    }
                }
                _ => {}
            }
        }

        match self.shell.current {
            Screen::Dashboard => {
                if key == KeyCode::Char('r') {
                    self.dashboard.begin_load();
                }
            }
            Screen::Vehicles => {
                if let Some(command) = self.vehicles.handle_key(key) {
                    self.vehicles.run_command(command).await;
                }
            }
            Screen::Clients => {
                if let Some(command) = self.clients.handle_key(key) {
                    self.clients.run(command).await;
                }
            }
            Screen::Reservations => {
                if let Some(command) = self.reservations.handle_key(key) {
                    self.reservations.run(command).await;
                }
            }
        }
        false
    }

    fn render<B: Backend>(&mut self, frame: &mut Frame<B>) {
        let area = render_shell(frame, &self.shell);
        match self.shell.current {
            Screen::Dashboard => render_dashboard(frame, area, &self.dashboard),
            Screen::Vehicles => render_list(frame, area, &mut self.vehicles.view, &vehicles::table()),
            Screen::Clients => render_list(frame, area, &mut self.clients.view, &clients::table()),
            Screen::Reservations => render_list(frame, area, &mut self.reservations.view, &reservations::table()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, command-line flags win over the environment
    let config = config::init()?.with_overrides(cli.base_url, cli.log_dir);
    let _guard = logging::init(&config)?;
    tracing::info!(base_url = %config.api_base_url, "starting rental console");

    let api = Api::new(&config.api_base_url, config.request_timeout()).map_err(|e| anyhow!(user_message(&e)))?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Check => commands::run_check(&api).await,
        Command::List { entity, status } => commands::run_list(&api, entity, status.as_deref()).await,
        Command::Show { entity, id } => commands::run_show(&api, entity, id).await,
        Command::Tui => run_tui(api).await,
    }
}

async fn run_tui(api: Api) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "console stopped");
    }
    tracing::info!("console closed");

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        // The loading state has been drawn; now wait for the data
        if app.is_loading() {
            app.load_current().await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code).await {
                return Ok(());
            }
        }
    }
}
