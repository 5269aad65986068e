use chrono::{Duration, Local, NaiveDate};
use tui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Cell,
};

use crate::api::{Api, ApiError};
use crate::models::{Client, NewReservation, Reservation, ReservationStatus, Vehicle};
use crate::ui::form::{Choice, FormField, FormMode, FormState};
use crate::ui::list_view::{ListConfig, ListController, ListOps, Resync, TableLayout};

const CLIENT: usize = 0;
const VEHICLE: usize = 1;
const START: usize = 2;
const END: usize = 3;
const STATUS: usize = 4;

pub const CLIENT_MISSING: &str = "Client non trouvé";
pub const VEHICLE_MISSING: &str = "Véhicule non trouvé";

pub type ReservationsScreen = ListController<ReservationOps>;

/// Reservations plus the clients and vehicles offered in the create form.
pub struct ReservationOps {
    api: Api,
    clients: Vec<Client>,
    vehicles: Vec<Vehicle>,
}

impl ReservationOps {
    fn client_choices(&self) -> Vec<Choice> {
        self.clients
            .iter()
            .map(|c| Choice::new(c.id.to_string(), c.name.clone()))
            .collect()
    }

    fn vehicle_choices(&self) -> Vec<Choice> {
        self.vehicles
            .iter()
            .map(|v| Choice::new(v.id.to_string(), format!("{} ({:.2} €/jour)", v.label(), v.price_per_day)))
            .collect()
    }

    fn form(&self, title: &str, mode: FormMode, values: FormValues) -> FormState {
        let locked = matches!(mode, FormMode::Edit(_));
        let statuses = ReservationStatus::ALL
            .iter()
            .map(|s| Choice::new(s.code(), s.label()))
            .collect();

        let form = FormState::new(
            title,
            mode,
            vec![
                FormField::choice("Client", self.client_choices(), values.client.as_deref())
                    .required()
                    .locked(locked),
                FormField::choice("Véhicule", self.vehicle_choices(), values.vehicle.as_deref())
                    .required()
                    .locked(locked),
                FormField::date("Début", values.start).locked(locked),
                FormField::date("Fin", values.end).locked(locked),
                FormField::choice("Statut", statuses, Some(values.status.code())).required(),
            ],
        );
        if locked {
            form.with_notice("Seule l'annulation est transmise au serveur pour une réservation existante.")
        } else {
            form
        }
    }
}

struct FormValues {
    client: Option<String>,
    vehicle: Option<String>,
    start: NaiveDate,
    end: NaiveDate,
    status: ReservationStatus,
}

fn selected_id(form: &FormState, index: usize) -> Result<i64, ApiError> {
    form.choice(index)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| ApiError::Config(format!("{} non sélectionné", form.fields[index].label)))
}

impl ListOps for ReservationOps {
    type Entity = Reservation;

    fn id(entity: &Reservation) -> i64 {
        entity.id
    }

    fn blank_form(&self) -> FormState {
        let today = Local::now().date_naive();
        self.form(
            "Nouvelle réservation",
            FormMode::Create,
            FormValues {
                client: None,
                vehicle: None,
                start: today,
                end: today + Duration::days(1),
                status: ReservationStatus::Pending,
            },
        )
    }

    fn edit_form(&self, reservation: &Reservation) -> FormState {
        self.form(
            "Modifier la réservation",
            FormMode::Edit(reservation.id),
            FormValues {
                client: reservation.client.as_ref().map(|c| c.id.to_string()),
                vehicle: reservation.vehicle.as_ref().map(|v| v.id.to_string()),
                start: reservation.start_date,
                end: reservation.end_date,
                status: reservation.status.clone(),
            },
        )
    }

    async fn fetch_all(&mut self) -> Result<Vec<Reservation>, ApiError> {
        let (reservations, clients, vehicles) =
            tokio::try_join!(self.api.reservations(), self.api.clients(), self.api.vehicles())?;
        self.clients = clients;
        self.vehicles = vehicles;
        Ok(reservations)
    }

    async fn submit(&self, form: &FormState) -> Result<Option<Reservation>, ApiError> {
        let status = form
            .choice(STATUS)
            .and_then(ReservationStatus::from_code)
            .unwrap_or(ReservationStatus::Pending);

        match form.mode {
            FormMode::Create => {
                let reservation = NewReservation {
                    client_id: selected_id(form, CLIENT)?,
                    vehicle_id: selected_id(form, VEHICLE)?,
                    start_date: form.date(START).unwrap_or_else(|| Local::now().date_naive()),
                    end_date: form.date(END).unwrap_or_else(|| Local::now().date_naive()),
                    status,
                };
                let created = self.api.create_reservation(&reservation).await?;
                tracing::info!(reservation_id = created.id, "reservation created");
            }
            FormMode::Edit(id) if status == ReservationStatus::Cancelled => {
                self.api.cancel_reservation(id).await?;
                tracing::info!(reservation_id = id, "reservation cancelled");
            }
            FormMode::Edit(id) => {
                tracing::warn!(
                    reservation_id = id,
                    status = status.code(),
                    "backend only supports cancellation, status change not sent"
                );
            }
        }
        Ok(None)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_reservation(id).await?;
        tracing::info!(reservation_id = id, "reservation deleted");
        Ok(())
    }
}

pub fn config() -> ListConfig<Reservation> {
    ListConfig {
        title: "Réservations",
        page_size: 8,
        search_fields: |r| {
            vec![
                r.client_name().unwrap_or_default().to_string(),
                r.vehicle_label().unwrap_or_default(),
                r.status.code().to_string(),
                r.status.label().to_string(),
            ]
        },
        resync: Resync::Refetch,
        delete_prompt: |r| format!("Êtes-vous sûr de vouloir supprimer la réservation n°{} ?", r.id),
    }
}

pub fn screen(api: Api) -> ReservationsScreen {
    ListController::new(
        ReservationOps {
            api,
            clients: Vec::new(),
            vehicles: Vec::new(),
        },
        config(),
    )
}

pub fn badge(status: &ReservationStatus) -> Span<'static> {
    let color = match status {
        ReservationStatus::Pending => Color::Yellow,
        ReservationStatus::Confirmed => Color::Green,
        ReservationStatus::Completed => Color::Gray,
        ReservationStatus::Cancelled => Color::Red,
        ReservationStatus::Other(_) => Color::White,
    };
    Span::styled(status.label().to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD))
}

pub fn period(reservation: &Reservation) -> String {
    format!(
        "{} → {}",
        reservation.start_date.format("%d/%m/%Y"),
        reservation.end_date.format("%d/%m/%Y")
    )
}

const WIDTHS: [Constraint; 6] = [
    Constraint::Percentage(6),
    Constraint::Percentage(20),
    Constraint::Percentage(22),
    Constraint::Percentage(24),
    Constraint::Percentage(14),
    Constraint::Percentage(14),
];

pub fn table() -> TableLayout<Reservation> {
    TableLayout {
        headers: &["#", "Client", "Véhicule", "Période", "Statut", "Montant"],
        widths: &WIDTHS,
        row: |r| {
            vec![
                Cell::from(r.id.to_string()),
                Cell::from(r.client_name().unwrap_or(CLIENT_MISSING).to_string()),
                Cell::from(r.vehicle_label().unwrap_or_else(|| VEHICLE_MISSING.to_string())),
                Cell::from(period(r)),
                Cell::from(badge(&r.status)),
                Cell::from(match r.total_amount {
                    Some(amount) => format!("{amount:.2} €"),
                    None => "-".to_string(),
                }),
            ]
        },
        hints: "N Nouvelle | E Modifier | D Supprimer",
    }
}
