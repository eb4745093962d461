use serde_json::Value;

use super::{with_query, ApiClient, ApiRequest};
use crate::error::ClientResult;

pub struct Experts<'a> {
    client: &'a ApiClient,
}

impl<'a> Experts<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn get_all(&self, category: Option<&str>) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(with_query("/experts", "category", category))).await
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(format!("/experts/{}", id))).await
    }

    pub async fn create(&self, data: Value) -> ClientResult<Value> {
        self.client.send(ApiRequest::post("/experts").json(data)).await
    }

    pub async fn update(&self, id: &str, data: Value) -> ClientResult<Value> {
        self.client.send(ApiRequest::put(format!("/experts/{}", id)).json(data)).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::delete(format!("/experts/{}", id))).await
    }
}
