use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ApiRequest};
use crate::error::ClientResult;

/// Relative weights of the four relevance components used by the scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    pub w1_item_expert_cosine: f64,
    pub w2_item_expert_llm: f64,
    pub w3_expert_candidates_cosine: f64,
    pub w4_expert_candidates_llm: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            w1_item_expert_cosine: 0.35,
            w2_item_expert_llm: 0.35,
            w3_expert_candidates_cosine: 0.15,
            w4_expert_candidates_llm: 0.15,
        }
    }
}

/// Optional scoring knobs; unset fields are omitted so the default serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_llm: Option<bool>,
    /// 3, 5 or 7 panelists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,
}

impl MatchingOptions {
    pub fn with_llm(mut self, on: bool) -> Self {
        self.use_llm = Some(on);
        self
    }

    pub fn with_panel_size(mut self, size: u32) -> Self {
        self.panel_size = Some(size);
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = Some(weights);
        self
    }
}

pub struct Matching<'a> {
    client: &'a ApiClient,
}

impl<'a> Matching<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn calculate_scores(&self, item_id: &str, options: &MatchingOptions) -> ClientResult<Value> {
        self.client.send(ApiRequest::post(format!("/matching/calculate/{}", item_id)).body(options)).await
    }

    pub async fn generate_panel(&self, item_id: &str, options: &MatchingOptions) -> ClientResult<Value> {
        self.client.send(ApiRequest::post(format!("/matching/generate-panel/{}", item_id)).body(options)).await
    }

    pub async fn get_score_breakdown(&self, item_id: &str, expert_id: &str, use_llm: bool) -> ClientResult<Value> {
        let path = format!("/matching/score/{}/{}?use_llm={}", item_id, expert_id, use_llm);
        self.client.send(ApiRequest::get(path)).await
    }

    pub async fn update_embeddings(&self) -> ClientResult<Value> {
        self.client.send(ApiRequest::post("/matching/update-embeddings")).await
    }

    pub async fn get_experts_with_scores(&self, item_id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(format!("/matching/experts-with-scores/{}", item_id))).await
    }

    pub async fn ollama_status(&self) -> ClientResult<Value> {
        self.client.send(ApiRequest::get("/matching/ollama-status")).await
    }
}
