//! In-process stand-in for the rental backend, used by the async tests.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

use crate::models::{Client, Reservation, ReservationStatus, Vehicle};

type Reply<T> = Result<T, (StatusCode, Json<Value>)>;

#[derive(Default)]
pub struct Store {
    pub clients: Vec<Client>,
    pub vehicles: Vec<Vehicle>,
    pub reservations: Vec<Reservation>,
    /// When set, every request answers with this status.
    pub fail_with: Option<u16>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<RwLock<Store>>;

pub struct MockBackend {
    pub base_url: String,
    pub store: Shared,
}

impl MockBackend {
    pub async fn fail_with(&self, status: u16) {
        self.store.write().await.fail_with = Some(status);
    }
}

/// Start the mock on a random local port with the given data.
pub async fn spawn(clients: Vec<Client>, vehicles: Vec<Vehicle>, reservations: Vec<Reservation>) -> MockBackend {
    let next_id = clients
        .iter()
        .map(|c| c.id)
        .chain(vehicles.iter().map(|v| v.id))
        .chain(reservations.iter().map(|r| r.id))
        .max()
        .unwrap_or(0);
    let store: Shared = Arc::new(RwLock::new(Store {
        clients,
        vehicles,
        reservations,
        fail_with: None,
        next_id,
    }));

    let app = Router::new()
        .route("/api/client", get(list_clients).post(create_client))
        .route("/api/client/{id}", put(update_client).delete(delete_client))
        .route("/api/vehicule", get(list_vehicles).post(create_vehicle))
        .route("/api/vehicule/disponibles", get(available_vehicles))
        .route(
            "/api/vehicule/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/api/vehicule/{id}/disponibilite", put(set_availability))
        .route("/api/reservation", get(list_reservations).post(create_reservation))
        .route("/api/reservation/status/{status}", get(reservations_by_status))
        .route("/api/reservation/{id}", get(get_reservation).delete(delete_reservation))
        .route("/api/reservation/{id}/cancel", put(cancel_reservation))
        .with_state(store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    MockBackend {
        base_url: format!("http://{addr}/api"),
        store,
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub fn client(id: i64, name: &str, email: &str) -> Client {
    Client {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: format!("06 00 00 00 {:02}", id % 100),
    }
}

pub fn vehicle(id: i64, make: &str, model: &str, price_per_day: f64, available: bool) -> Vehicle {
    Vehicle {
        id,
        make: make.to_string(),
        model: model.to_string(),
        price_per_day,
        available,
    }
}

pub fn reservation(
    id: i64,
    client: Option<Client>,
    vehicle: Option<Vehicle>,
    start: &str,
    status: ReservationStatus,
    total_amount: f64,
) -> Reservation {
    let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    Reservation {
        id,
        client,
        vehicle,
        start_date,
        end_date: start_date + chrono::Duration::days(3),
        status,
        total_amount: Some(total_amount),
    }
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "status": status.as_u16(), "message": message })))
}

async fn guard(store: &Shared) -> Reply<()> {
    match store.read().await.fail_with {
        Some(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Err(error(status, "forced failure"))
        }
        None => Ok(()),
    }
}

#[derive(Deserialize)]
struct ClientInput {
    nom: String,
    email: String,
    telephone: String,
}

#[derive(Deserialize)]
struct VehicleInput {
    marque: String,
    modele: String,
    #[serde(rename = "prixParJour")]
    prix_par_jour: f64,
    disponible: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReservationInput {
    client_id: i64,
    vehicule_id: i64,
    date_debut: NaiveDate,
    date_fin: NaiveDate,
    status_reservation: ReservationStatus,
}

#[derive(Deserialize)]
struct AvailabilityQuery {
    disponible: bool,
}

async fn list_clients(State(store): State<Shared>) -> Reply<Json<Vec<Client>>> {
    guard(&store).await?;
    Ok(Json(store.read().await.clients.clone()))
}

async fn create_client(State(store): State<Shared>, Json(input): Json<ClientInput>) -> Reply<(StatusCode, Json<Client>)> {
    guard(&store).await?;
    if input.nom.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Le nom est obligatoire"));
    }
    let mut store = store.write().await;
    let client = Client {
        id: store.next_id(),
        name: input.nom,
        email: input.email,
        phone: input.telephone,
    };
    store.clients.push(client.clone());
    Ok((StatusCode::CREATED, Json(client)))
}

async fn update_client(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Json(input): Json<ClientInput>,
) -> Reply<Json<Client>> {
    guard(&store).await?;
    let mut store = store.write().await;
    let client = store
        .clients
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Client introuvable"))?;
    client.name = input.nom;
    client.email = input.email;
    client.phone = input.telephone;
    Ok(Json(client.clone()))
}

async fn delete_client(State(store): State<Shared>, Path(id): Path<i64>) -> Reply<StatusCode> {
    guard(&store).await?;
    let mut store = store.write().await;
    let before = store.clients.len();
    store.clients.retain(|c| c.id != id);
    if store.clients.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Client introuvable"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_vehicles(State(store): State<Shared>) -> Reply<Json<Vec<Vehicle>>> {
    guard(&store).await?;
    Ok(Json(store.read().await.vehicles.clone()))
}

async fn available_vehicles(State(store): State<Shared>) -> Reply<Json<Vec<Vehicle>>> {
    guard(&store).await?;
    let store = store.read().await;
    Ok(Json(store.vehicles.iter().filter(|v| v.available).cloned().collect()))
}

async fn get_vehicle(State(store): State<Shared>, Path(id): Path<i64>) -> Reply<Json<Vehicle>> {
    guard(&store).await?;
    let store = store.read().await;
    store
        .vehicles
        .iter()
        .find(|v| v.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Véhicule introuvable"))
}

async fn create_vehicle(State(store): State<Shared>, Json(input): Json<VehicleInput>) -> Reply<(StatusCode, Json<Vehicle>)> {
    guard(&store).await?;
    let mut store = store.write().await;
    let vehicle = Vehicle {
        id: store.next_id(),
        make: input.marque,
        model: input.modele,
        price_per_day: input.prix_par_jour,
        available: input.disponible,
    };
    store.vehicles.push(vehicle.clone());
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Json(input): Json<VehicleInput>,
) -> Reply<Json<Vehicle>> {
    guard(&store).await?;
    let mut store = store.write().await;
    let vehicle = store
        .vehicles
        .iter_mut()
        .find(|v| v.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Véhicule introuvable"))?;
    vehicle.make = input.marque;
    vehicle.model = input.modele;
    vehicle.price_per_day = input.prix_par_jour;
    vehicle.available = input.disponible;
    Ok(Json(vehicle.clone()))
}

async fn delete_vehicle(State(store): State<Shared>, Path(id): Path<i64>) -> Reply<StatusCode> {
    guard(&store).await?;
    let mut store = store.write().await;
    let before = store.vehicles.len();
    store.vehicles.retain(|v| v.id != id);
    if store.vehicles.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Véhicule introuvable"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn set_availability(
    State(store): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Reply<StatusCode> {
    guard(&store).await?;
    let mut store = store.write().await;
    let vehicle = store
        .vehicles
        .iter_mut()
        .find(|v| v.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Véhicule introuvable"))?;
    vehicle.available = query.disponible;
    Ok(StatusCode::OK)
}

async fn list_reservations(State(store): State<Shared>) -> Reply<Json<Vec<Reservation>>> {
    guard(&store).await?;
    let store = store.read().await;
    if store.reservations.is_empty() {
        return Err(error(StatusCode::INTERNAL_SERVER_ERROR, "Aucune réservation trouvée"));
    }
    Ok(Json(store.reservations.clone()))
}

async fn reservations_by_status(State(store): State<Shared>, Path(status): Path<String>) -> Reply<Json<Vec<Reservation>>> {
    guard(&store).await?;
    let status = ReservationStatus::from_code(&status)
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Statut inconnu"))?;
    let store = store.read().await;
    Ok(Json(
        store
            .reservations
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect(),
    ))
}

async fn get_reservation(State(store): State<Shared>, Path(id): Path<i64>) -> Reply<Json<Reservation>> {
    guard(&store).await?;
    let store = store.read().await;
    store
        .reservations
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Réservation introuvable"))
}

async fn create_reservation(
    State(store): State<Shared>,
    Json(input): Json<ReservationInput>,
) -> Reply<(StatusCode, Json<Reservation>)> {
    guard(&store).await?;
    let mut store = store.write().await;
    let client = store.clients.iter().find(|c| c.id == input.client_id).cloned();
    let vehicle = store.vehicles.iter().find(|v| v.id == input.vehicule_id).cloned();
    let (Some(client), Some(vehicle)) = (client, vehicle) else {
        return Err(error(StatusCode::BAD_REQUEST, "Client ou véhicule inconnu"));
    };
    let days = (input.date_fin - input.date_debut).num_days().max(1) as f64;
    let reservation = Reservation {
        id: store.next_id(),
        total_amount: Some(days * vehicle.price_per_day),
        client: Some(client),
        vehicle: Some(vehicle),
        start_date: input.date_debut,
        end_date: input.date_fin,
        status: input.status_reservation,
    };
    store.reservations.push(reservation.clone());
    Ok((StatusCode::CREATED, Json(reservation)))
}

async fn cancel_reservation(State(store): State<Shared>, Path(id): Path<i64>) -> Reply<StatusCode> {
    guard(&store).await?;
    let mut store = store.write().await;
    let reservation = store
        .reservations
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Réservation introuvable"))?;
    reservation.status = ReservationStatus::Cancelled;
    Ok(StatusCode::OK)
}

async fn delete_reservation(State(store): State<Shared>, Path(id): Path<i64>) -> Reply<StatusCode> {
    guard(&store).await?;
    let mut store = store.write().await;
    let before = store.reservations.len();
    store.reservations.retain(|r| r.id != id);
    if store.reservations.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Réservation introuvable"));
    }
    Ok(StatusCode::NO_CONTENT)
}
