use reqwest::Method;
use tcc_core::entities::Truck;
use tcc_core::requests::{NewTruck, TruckUpdate};
use tcc_core::responses::MessageResponse;

use crate::{ApiClient, ClientError, query_string, segment};

/// Filters for `GET /trucks`.
#[derive(Debug, Clone, Default)]
pub struct TruckQuery {
    pub available: Option<bool>,
    pub branch_id: Option<String>,
}

impl TruckQuery {
    fn to_query_string(&self) -> String {
        query_string(&[
            ("available", self.available.map(|a| a.to_string())),
            ("branch", self.branch_id.clone()),
        ])
    }
}

impl ApiClient {
    pub async fn list_trucks(
        &self,
        token: &str,
        query: &TruckQuery,
    ) -> Result<Vec<Truck>, ClientError> {
        self.get_json(&format!("/trucks{}", query.to_query_string()), token)
            .await
    }

    pub async fn get_truck(&self, token: &str, id: &str) -> Result<Truck, ClientError> {
        self.get_json(&format!("/trucks/{}", segment(id)), token)
            .await
    }

    pub async fn create_truck(&self, token: &str, new: &NewTruck) -> Result<Truck, ClientError> {
        self.send_json(Method::POST, "/trucks", Some(token), new).await
    }

    pub async fn update_truck(
        &self,
        token: &str,
        id: &str,
        update: &TruckUpdate,
    ) -> Result<Truck, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/trucks/{}", segment(id)),
            Some(token),
            update,
        )
        .await
    }

    pub async fn delete_truck(&self, token: &str, id: &str) -> Result<MessageResponse, ClientError> {
        self.send_empty(Method::DELETE, &format!("/trucks/{}", segment(id)), token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truck_query_string() {
        assert_eq!(TruckQuery::default().to_query_string(), "");
        let query = TruckQuery {
            available: Some(false),
            branch_id: Some("brn-1a2b3c4d".into()),
        };
        assert_eq!(query.to_query_string(), "?available=false&branch=brn-1a2b3c4d");
    }
}
