use reqwest::Method;
use tcc_core::entities::Branch;
use tcc_core::requests::{BranchUpdate, NewBranch};
use tcc_core::responses::MessageResponse;

use crate::{ApiClient, ClientError, segment};

impl ApiClient {
    pub async fn list_branches(&self, token: &str) -> Result<Vec<Branch>, ClientError> {
        self.get_json("/branches", token).await
    }

    pub async fn get_branch(&self, token: &str, id: &str) -> Result<Branch, ClientError> {
        self.get_json(&format!("/branches/{}", segment(id)), token)
            .await
    }

    pub async fn create_branch(&self, token: &str, new: &NewBranch) -> Result<Branch, ClientError> {
        self.send_json(Method::POST, "/branches", Some(token), new)
            .await
    }

    pub async fn update_branch(
        &self,
        token: &str,
        id: &str,
        update: &BranchUpdate,
    ) -> Result<Branch, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/branches/{}", segment(id)),
            Some(token),
            update,
        )
        .await
    }

    pub async fn delete_branch(&self, token: &str, id: &str) -> Result<MessageResponse, ClientError> {
        self.send_empty(Method::DELETE, &format!("/branches/{}", segment(id)), token)
            .await
    }
}
