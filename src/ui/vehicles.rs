use tui::{
    layout::Constraint,
    style::{Color, Style},
    widgets::Cell,
};

use crate::api::{Api, ApiError};
use crate::models::{Vehicle, VehiclePayload};
use crate::ui::form::{FormField, FormMode, FormState};
use crate::ui::list_view::{ListCommand, ListConfig, ListController, ListOps, Resync, TableLayout};

const MAKE: usize = 0;
const MODEL: usize = 1;
const PRICE: usize = 2;
const AVAILABLE: usize = 3;

pub type VehiclesScreen = ListController<VehicleOps>;

pub struct VehicleOps {
    api: Api,
}

impl ListOps for VehicleOps {
    type Entity = Vehicle;

    fn id(entity: &Vehicle) -> i64 {
        entity.id
    }

    fn blank_form(&self) -> FormState {
        FormState::new(
            "Nouveau véhicule",
            FormMode::Create,
            vec![
                FormField::text("Marque", "").required(),
                FormField::text("Modèle", "").required(),
                FormField::number("Prix par jour (€)", "").required(),
                FormField::toggle("Disponible", true),
            ],
        )
    }

    fn edit_form(&self, vehicle: &Vehicle) -> FormState {
        FormState::new(
            "Modifier le véhicule",
            FormMode::Edit(vehicle.id),
            vec![
                FormField::text("Marque", &vehicle.make).required(),
                FormField::text("Modèle", &vehicle.model).required(),
                FormField::number("Prix par jour (€)", &vehicle.price_per_day.to_string()).required(),
                FormField::toggle("Disponible", vehicle.available),
            ],
        )
    }

    async fn fetch_all(&mut self) -> Result<Vec<Vehicle>, ApiError> {
        self.api.vehicles().await
    }

    async fn submit(&self, form: &FormState) -> Result<Option<Vehicle>, ApiError> {
        let payload = VehiclePayload {
            make: form.text(MAKE),
            model: form.text(MODEL),
            price_per_day: form.number(PRICE).unwrap_or(0.0),
            available: form.toggle(AVAILABLE),
        };
        let saved = match form.mode {
            FormMode::Create => self.api.create_vehicle(&payload).await?,
            FormMode::Edit(id) => self.api.update_vehicle(id, &payload).await?,
        };
        tracing::info!(vehicle_id = saved.id, "vehicle saved");
        Ok(Some(saved))
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_vehicle(id).await?;
        tracing::info!(vehicle_id = id, "vehicle deleted");
        Ok(())
    }
}

impl VehiclesScreen {
    /// Flip the availability flag of the selected vehicle.
    pub async fn toggle_availability(&mut self) {
        let Some(vehicle) = self.view.selected().cloned() else {
            return;
        };
        let available = !vehicle.available;
        match self.ops.api.set_vehicle_availability(vehicle.id, available).await {
            Ok(()) => {
                tracing::info!(vehicle_id = vehicle.id, available, "availability changed");
                self.view.apply_saved(Vehicle { available, ..vehicle }, VehicleOps::id);
            }
            Err(e) => self.view.fail_mutation(&e),
        }
    }

    pub async fn run_command(&mut self, command: ListCommand) {
        match command {
            ListCommand::Extra('a') => self.toggle_availability().await,
            other => self.run(other).await,
        }
    }
}

pub fn config() -> ListConfig<Vehicle> {
    ListConfig {
        title: "Véhicules",
        page_size: 6,
        search_fields: |v| vec![v.make.clone(), v.model.clone()],
        resync: Resync::ApplyReturned,
        delete_prompt: |v| format!("Êtes-vous sûr de vouloir supprimer le véhicule {} ?", v.label()),
    }
}

pub fn screen(api: Api) -> VehiclesScreen {
    ListController::new(VehicleOps { api }, config())
}

const WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(8),
    Constraint::Percentage(25),
    Constraint::Percentage(25),
    Constraint::Percentage(17),
    Constraint::Percentage(25),
];

pub fn availability_cell(available: bool) -> Cell<'static> {
    if available {
        Cell::from("Disponible").style(Style::default().fg(Color::Green))
    } else {
        Cell::from("Indisponible").style(Style::default().fg(Color::Red))
    }
}

pub fn table() -> TableLayout<Vehicle> {
    TableLayout {
        headers: &["#", "Marque", "Modèle", "Prix/jour", "État"],
        widths: &WIDTHS,
        row: |v| {
            vec![
                Cell::from(v.id.to_string()),
                Cell::from(v.make.clone()),
                Cell::from(v.model.clone()),
                Cell::from(format!("{:.2} €", v.price_per_day)),
                availability_cell(v.available),
            ]
        },
        hints: "N Nouveau | E Modifier | D Supprimer | A Disponibilité",
    }
}
