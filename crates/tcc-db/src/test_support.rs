//! Shared fixtures for tcc-db unit tests.

use tcc_core::entities::{Branch, Consignment, Truck};
use tcc_core::requests::{NewBranch, NewConsignment, NewTruck};

use crate::service::TccService;

pub async fn test_service() -> TccService {
    TccService::in_memory().await.unwrap()
}

pub async fn seed_branch(svc: &TccService, name: &str) -> Branch {
    svc.create_branch(
        &NewBranch {
            name: name.to_string(),
            location: format!("{name} depot"),
        },
        None,
    )
    .await
    .unwrap()
}

pub async fn seed_truck(svc: &TccService, registration: &str, branch_id: Option<&str>) -> Truck {
    svc.create_truck(
        &NewTruck {
            registration_number: registration.to_string(),
            branch_id: branch_id.map(String::from),
            capacity_kg: Some(8000.0),
            is_available: None,
        },
        None,
    )
    .await
    .unwrap()
}

pub async fn seed_consignment(svc: &TccService, origin: &str, destination: &str) -> Consignment {
    svc.create_consignment(
        &NewConsignment {
            origin_branch_id: origin.to_string(),
            destination_branch_id: destination.to_string(),
            sender_name: "Acme Textiles".into(),
            receiver_name: "Bright Retail".into(),
            description: None,
            weight_kg: Some(120.0),
        },
        None,
    )
    .await
    .unwrap()
}
