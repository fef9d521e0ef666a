use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};

/// Client for a model server speaking the Hugging Face inference convention:
/// `POST {base_url}/models/{model}` with `{"inputs": ..., "parameters": ...}`.
#[derive(Clone)]
pub struct InferenceClient {
    base_url: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct InferenceRequest<'a, P: Serialize> {
    inputs: &'a str,
    parameters: P,
}

impl InferenceClient {
    pub fn new(base_url: String, api_token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client: reqwest::Client::new(),
        }
    }

    pub async fn infer<P, R>(&self, model: &str, inputs: &str, parameters: P) -> Result<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let url = format!("{}/models/{}", self.base_url, model);

        let request = InferenceRequest { inputs, parameters };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to send request to model {}", model))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model {} request failed: {} {}", model, status, body.trim());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from model {}", model))
    }

    /// Ping the server root; used by the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .context("Failed to reach inference server")?;

        if response.status().is_server_error() {
            anyhow::bail!("Inference server unhealthy: {}", response.status());
        }

        Ok(())
    }
}
