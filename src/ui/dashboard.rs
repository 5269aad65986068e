use chrono::NaiveDate;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::api::{user_message, Api, ApiError};
use crate::models::{Client, Reservation, ReservationStatus, Vehicle};
use crate::ui::reservations::{badge, CLIENT_MISSING, VEHICLE_MISSING};

const RECENT_COUNT: usize = 3;

const RECENT_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(22),
    Constraint::Percentage(24),
    Constraint::Percentage(26),
    Constraint::Percentage(14),
    Constraint::Percentage(14),
];

#[derive(Clone, Debug, PartialEq)]
pub struct RecentReservation {
    pub id: i64,
    pub client: String,
    pub vehicle: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub amount: f64,
}

/// Figures shown on the dashboard. `Default` is the all-zero state used after a failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardStats {
    pub total_clients: usize,
    pub total_vehicles: usize,
    pub active_reservations: usize,
    pub revenue: f64,
    pub recent: Vec<RecentReservation>,
}

pub fn summarize(clients: &[Client], vehicles: &[Vehicle], reservations: &[Reservation]) -> DashboardStats {
    let mut by_date: Vec<&Reservation> = reservations.iter().collect();
    by_date.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    let recent = by_date
        .into_iter()
        .take(RECENT_COUNT)
        .map(|r| RecentReservation {
            id: r.id,
            client: r.client_name().unwrap_or(CLIENT_MISSING).to_string(),
            vehicle: r.vehicle_label().unwrap_or_else(|| VEHICLE_MISSING.to_string()),
            start_date: r.start_date,
            end_date: r.end_date,
            status: r.status.clone(),
            amount: r.total_amount.unwrap_or(0.0),
        })
        .collect();

    DashboardStats {
        total_clients: clients.len(),
        total_vehicles: vehicles.len(),
        active_reservations: reservations.iter().filter(|r| r.status.is_active()).count(),
        revenue: reservations.iter().filter_map(|r| r.total_amount).sum(),
        recent,
    }
}

#[derive(Default)]
pub struct DashboardState {
    stats: DashboardStats,
    loading: bool,
    error: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn finish_load(&mut self, result: Result<(Vec<Client>, Vec<Vehicle>, Vec<Reservation>), ApiError>) {
        self.loading = false;
        match result {
            Ok((clients, vehicles, reservations)) => {
                self.stats = summarize(&clients, &vehicles, &reservations);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "dashboard load failed");
                self.stats = DashboardStats::default();
                self.error = Some(user_message(&e));
            }
        }
    }

    /// The three lists are fetched together; any failure fails the whole dashboard.
    pub async fn load(&mut self, api: &Api) {
        self.begin_load();
        let result = tokio::try_join!(api.clients(), api.vehicles(), api.reservations());
        self.finish_load(result);
    }
}

fn stat_card(title: &str, value: String, color: Color) -> Paragraph<'static> {
    Paragraph::new(Spans::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().title(title.to_string()).borders(Borders::ALL))
}

pub fn render_dashboard<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &DashboardState) {
    let banner_height = if state.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Length(4),
            Constraint::Min(5),
        ])
        .split(area);

    if let Some(error) = &state.error {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::White).bg(Color::Red))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[0]);
    }

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    let stats = &state.stats;
    let value = |v: String| if state.loading { "...".to_string() } else { v };
    frame.render_widget(stat_card("Clients", value(stats.total_clients.to_string()), Color::Cyan), cards[0]);
    frame.render_widget(stat_card("Véhicules", value(stats.total_vehicles.to_string()), Color::Blue), cards[1]);
    frame.render_widget(
        stat_card("Réservations actives", value(stats.active_reservations.to_string()), Color::Yellow),
        cards[2],
    );
    frame.render_widget(
        stat_card("Chiffre d'affaires", value(format!("{:.2} €", stats.revenue)), Color::Green),
        cards[3],
    );

    let header = Row::new(
        ["Client", "Véhicule", "Période", "Statut", "Montant"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow))),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = if state.loading {
        vec![Row::new(vec![Cell::from("Chargement...")])]
    } else if stats.recent.is_empty() {
        vec![Row::new(vec![Cell::from("Aucune réservation récente.")])]
    } else {
        stats
            .recent
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.client.clone()),
                    Cell::from(r.vehicle.clone()),
                    Cell::from(format!("{} → {}", r.start_date.format("%d/%m/%Y"), r.end_date.format("%d/%m/%Y"))),
                    Cell::from(badge(&r.status)),
                    Cell::from(format!("{:.2} €", r.amount)),
                ])
            })
            .collect()
    };

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title("Activité récente").borders(Borders::ALL))
        .widths(&RECENT_WIDTHS);
    frame.render_widget(table, chunks[2]);
}
