//! Non-interactive subcommands.

use anyhow::{anyhow, Result};

use crate::api::{user_message, Api, ApiError};
use crate::cli::{ListTarget, ShowTarget};
use crate::models::ReservationStatus;

/// Outcome of probing one endpoint.
#[derive(Debug, PartialEq)]
pub struct Probe {
    pub endpoint: &'static str,
    pub outcome: Result<usize, String>,
}

/// Hit each list endpoint once and record how many rows came back.
pub async fn check(api: &Api) -> Vec<Probe> {
    let (clients, vehicles, reservations) =
        tokio::join!(api.clients(), api.vehicles(), api.reservations());

    vec![
        probe("/client", clients.map(|rows| rows.len())),
        probe("/vehicule", vehicles.map(|rows| rows.len())),
        probe("/reservation", reservations.map(|rows| rows.len())),
    ]
}

fn probe(endpoint: &'static str, result: Result<usize, ApiError>) -> Probe {
    Probe {
        endpoint,
        outcome: result.map_err(|e| user_message(&e)),
    }
}

pub async fn run_check(api: &Api) -> Result<()> {
    println!("Test de connectivité API sur {}", api.base_url());

    let probes = check(api).await;
    let mut failures = 0;
    for probe in &probes {
        match &probe.outcome {
            Ok(count) => println!("  OK  {:<14} {} élément(s)", probe.endpoint, count),
            Err(message) => {
                failures += 1;
                println!("  KO  {:<14} {}", probe.endpoint, message);
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{failures} endpoint(s) unreachable"));
    }
    Ok(())
}

pub async fn run_list(api: &Api, target: ListTarget, status: Option<&str>) -> Result<()> {
    let lines = list_lines(api, target, status).await?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

async fn list_lines(api: &Api, target: ListTarget, status: Option<&str>) -> Result<Vec<String>> {
    let lines = match target {
        ListTarget::Clients => api
            .clients()
            .await
            .map_err(describe)?
            .iter()
            .map(|c| format!("{:>5}  {:<25} {:<30} {}", c.id, c.name, c.email, c.phone))
            .collect(),
        ListTarget::Vehicles | ListTarget::AvailableVehicles => {
            let vehicles = if target == ListTarget::Vehicles {
                api.vehicles().await
            } else {
                api.available_vehicles().await
            }
            .map_err(describe)?;
            vehicles
                .iter()
                .map(|v| {
                    format!(
                        "{:>5}  {:<30} {:>8.2} €/jour  {}",
                        v.id,
                        v.label(),
                        v.price_per_day,
                        if v.available { "disponible" } else { "indisponible" }
                    )
                })
                .collect()
        }
        ListTarget::Reservations => {
            let reservations = match status {
                Some(code) => {
                    let status = ReservationStatus::from_code(code)
                        .ok_or_else(|| anyhow!("unknown reservation status `{code}`"))?;
                    api.reservations_by_status(status).await
                }
                None => api.reservations().await,
            }
            .map_err(describe)?;
            reservations
                .iter()
                .map(|r| {
                    format!(
                        "{:>5}  {:<20} {:<25} {} → {}  {:<11} {:>9.2} €",
                        r.id,
                        r.client_name().unwrap_or("-"),
                        r.vehicle_label().unwrap_or_else(|| "-".to_string()),
                        r.start_date.format("%d/%m/%Y"),
                        r.end_date.format("%d/%m/%Y"),
                        r.status.label(),
                        r.total_amount.unwrap_or(0.0)
                    )
                })
                .collect()
        }
    };
    Ok(lines)
}

pub async fn run_show(api: &Api, target: ShowTarget, id: i64) -> Result<()> {
    for line in show_lines(api, target, id).await? {
        println!("{line}");
    }
    Ok(())
}

async fn show_lines(api: &Api, target: ShowTarget, id: i64) -> Result<Vec<String>> {
    let lines = match target {
        ShowTarget::Vehicle => {
            let v = api.vehicle(id).await.map_err(describe)?;
            vec![
                format!("Véhicule #{}", v.id),
                format!("  Marque         {}", v.make),
                format!("  Modèle         {}", v.model),
                format!("  Prix par jour  {:.2} €", v.price_per_day),
                format!("  Disponible     {}", if v.available { "oui" } else { "non" }),
            ]
        }
        ShowTarget::Reservation => {
            let r = api.reservation(id).await.map_err(describe)?;
            vec![
                format!("Réservation #{}", r.id),
                format!("  Client    {}", r.client_name().unwrap_or("-")),
                format!("  Véhicule  {}", r.vehicle_label().unwrap_or_else(|| "-".to_string())),
                format!(
                    "  Période   {} → {}",
                    r.start_date.format("%d/%m/%Y"),
                    r.end_date.format("%d/%m/%Y")
                ),
                format!("  Statut    {}", r.status),
                format!("  Montant   {:.2} €", r.total_amount.unwrap_or(0.0)),
            ]
        }
    };
    Ok(lines)
}

fn describe(error: ApiError) -> anyhow::Error {
    anyhow!(user_message(&error))
}
