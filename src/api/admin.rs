use serde_json::Value;

use super::{ApiClient, ApiRequest};
use crate::error::ClientResult;

pub struct Admin<'a> {
    client: &'a ApiClient,
}

impl<'a> Admin<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    /// Reset the backend collections to demo data.
    pub async fn seed_database(&self) -> ClientResult<Value> {
        self.client.send(ApiRequest::post("/seed")).await
    }

    pub async fn list_users(&self) -> ClientResult<Value> {
        self.client.send(ApiRequest::get("/users")).await
    }
}
