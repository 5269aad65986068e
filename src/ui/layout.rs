use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Vehicles,
    Clients,
    Reservations,
}

pub struct Route {
    pub screen: Screen,
    pub key: char,
    pub label: &'static str,
}

pub const ROUTES: [Route; 4] = [
    Route { screen: Screen::Dashboard, key: '1', label: "Tableau de bord" },
    Route { screen: Screen::Vehicles, key: '2', label: "Véhicules" },
    Route { screen: Screen::Clients, key: '3', label: "Clients" },
    Route { screen: Screen::Reservations, key: '4', label: "Réservations" },
];

impl Screen {
    pub fn from_key(key: char) -> Option<Screen> {
        ROUTES.iter().find(|r| r.key == key).map(|r| r.screen)
    }

    pub fn label(self) -> &'static str {
        ROUTES
            .iter()
            .find(|r| r.screen == self)
            .map(|r| r.label)
            .unwrap_or_default()
    }
}

/// Navigation chrome around the active screen.
pub struct Shell {
    pub current: Screen,
    pub sidebar_open: bool,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            current: Screen::Dashboard,
            sidebar_open: true,
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Switch screens; returns true when the route actually changed.
    pub fn navigate(&mut self, screen: Screen) -> bool {
        if self.current == screen {
            return false;
        }
        tracing::debug!(from = ?self.current, to = ?screen, "navigate");
        self.current = screen;
        true
    }
}

/// Draw the header and the sidebar, returning the area left for the screen itself.
pub fn render_shell<B: Backend>(frame: &mut Frame<B>, shell: &Shell) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(frame.size());

    let header = Paragraph::new(Spans::from(vec![
        Span::styled("Location de véhicules", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(shell.current.label(), Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Tab Menu | 1-4 Écrans | Q Quitter"),
    );
    frame.render_widget(header, rows[0]);

    if !shell.sidebar_open {
        return rows[1];
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(20)])
        .split(rows[1]);

    let items: Vec<ListItem> = ROUTES
        .iter()
        .map(|route| {
            let style = if route.screen == shell.current {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Spans::from(Span::styled(format!(" {}  {}", route.key, route.label), style)))
        })
        .collect();
    let sidebar = List::new(items).block(Block::default().title("Navigation").borders(Borders::ALL));
    frame.render_widget(sidebar, columns[0]);

    columns[1]
}
