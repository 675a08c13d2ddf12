//! Consignments and the dispatch workflow.

use reqwest::Method;
use tcc_core::entities::Consignment;
use tcc_core::enums::ConsignmentStatus;
use tcc_core::requests::{ConsignmentUpdate, DispatchRequest, NewConsignment};
use tcc_core::responses::MessageResponse;

use crate::{ApiClient, ClientError, query_string, segment};

impl ApiClient {
    pub async fn list_consignments(
        &self,
        token: &str,
        status: Option<ConsignmentStatus>,
    ) -> Result<Vec<Consignment>, ClientError> {
        let query = query_string(&[("status", status.map(|s| s.as_str().to_string()))]);
        self.get_json(&format!("/consignments{query}"), token).await
    }

    pub async fn get_consignment(&self, token: &str, id: &str) -> Result<Consignment, ClientError> {
        self.get_json(&format!("/consignments/{}", segment(id)), token)
            .await
    }

    pub async fn track_consignment(
        &self,
        token: &str,
        tracking_number: &str,
    ) -> Result<Consignment, ClientError> {
        self.get_json(
            &format!("/consignments/track/{}", segment(tracking_number)),
            token,
        )
        .await
    }

    pub async fn create_consignment(
        &self,
        token: &str,
        new: &NewConsignment,
    ) -> Result<Consignment, ClientError> {
        self.send_json(Method::POST, "/consignments", Some(token), new)
            .await
    }

    pub async fn update_consignment(
        &self,
        token: &str,
        id: &str,
        update: &ConsignmentUpdate,
    ) -> Result<Consignment, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/consignments/{}", segment(id)),
            Some(token),
            update,
        )
        .await
    }

    pub async fn delete_consignment(
        &self,
        token: &str,
        id: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.send_empty(
            Method::DELETE,
            &format!("/consignments/{}", segment(id)),
            token,
        )
        .await
    }

    pub async fn list_dispatched(&self, token: &str) -> Result<Vec<Consignment>, ClientError> {
        self.get_json("/dispatch", token).await
    }

    /// # Errors
    ///
    /// [`ClientError::Api`] with 409 when the consignment is not pending or
    /// the truck is busy.
    pub async fn dispatch(
        &self,
        token: &str,
        request: &DispatchRequest,
    ) -> Result<Consignment, ClientError> {
        self.send_json(Method::POST, "/dispatch", Some(token), request)
            .await
    }

    pub async fn deliver(&self, token: &str, consignment_id: &str) -> Result<Consignment, ClientError> {
        self.send_empty(
            Method::PUT,
            &format!("/dispatch/{}", segment(consignment_id)),
            token,
        )
        .await
    }

    pub async fn cancel_dispatch(
        &self,
        token: &str,
        consignment_id: &str,
    ) -> Result<Consignment, ClientError> {
        self.send_empty(
            Method::DELETE,
            &format!("/dispatch/{}", segment(consignment_id)),
            token,
        )
        .await
    }
}
