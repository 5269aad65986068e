use tui::{layout::Constraint, widgets::Cell};

use crate::api::{Api, ApiError};
use crate::models::{Client, ClientPayload};
use crate::ui::form::{FormField, FormMode, FormState};
use crate::ui::list_view::{ListConfig, ListController, ListOps, Resync, TableLayout};

const NAME: usize = 0;
const EMAIL: usize = 1;
const PHONE: usize = 2;

pub type ClientsScreen = ListController<ClientOps>;

pub struct ClientOps {
    api: Api,
}

impl ClientOps {
    fn payload(form: &FormState) -> ClientPayload {
        ClientPayload {
            name: form.text(NAME),
            email: form.text(EMAIL),
            phone: form.text(PHONE),
        }
    }
}

impl ListOps for ClientOps {
    type Entity = Client;

    fn id(entity: &Client) -> i64 {
        entity.id
    }

    fn blank_form(&self) -> FormState {
        FormState::new(
            "Nouveau client",
            FormMode::Create,
            vec![
                FormField::text("Nom", "").required(),
                FormField::text("Email", "").required(),
                FormField::text("Téléphone", ""),
            ],
        )
    }

    fn edit_form(&self, client: &Client) -> FormState {
        FormState::new(
            "Modifier le client",
            FormMode::Edit(client.id),
            vec![
                FormField::text("Nom", &client.name).required(),
                FormField::text("Email", &client.email).required(),
                FormField::text("Téléphone", &client.phone),
            ],
        )
    }

    async fn fetch_all(&mut self) -> Result<Vec<Client>, ApiError> {
        self.api.clients().await
    }

    async fn submit(&self, form: &FormState) -> Result<Option<Client>, ApiError> {
        let payload = Self::payload(form);
        let saved = match form.mode {
            FormMode::Create => self.api.create_client(&payload).await?,
            FormMode::Edit(id) => self.api.update_client(id, &payload).await?,
        };
        tracing::info!(client_id = saved.id, "client saved");
        Ok(Some(saved))
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_client(id).await?;
        tracing::info!(client_id = id, "client deleted");
        Ok(())
    }
}

pub fn config() -> ListConfig<Client> {
    ListConfig {
        title: "Clients",
        page_size: 5,
        search_fields: |c| vec![c.name.clone(), c.email.clone()],
        resync: Resync::ApplyReturned,
        delete_prompt: |c| format!("Êtes-vous sûr de vouloir supprimer le client {} ?", c.name),
    }
}

pub fn screen(api: Api) -> ClientsScreen {
    ListController::new(ClientOps { api }, config())
}

const WIDTHS: [Constraint; 4] = [
    Constraint::Percentage(8),
    Constraint::Percentage(32),
    Constraint::Percentage(35),
    Constraint::Percentage(25),
];

pub fn table() -> TableLayout<Client> {
    TableLayout {
        headers: &["#", "Nom", "Email", "Téléphone"],
        widths: &WIDTHS,
        row: |c| {
            vec![
                Cell::from(c.id.to_string()),
                Cell::from(c.name.clone()),
                Cell::from(c.email.clone()),
                Cell::from(c.phone.clone()),
            ]
        },
        hints: "N Nouveau | E Modifier | D Supprimer",
    }
}
