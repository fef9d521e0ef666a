use anyhow::{Context, Result};
use extract::GenerationConstraints;
use ingest::Bounds;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::str::FromStr;

const ENV_PREFIX: &str = "FACTGRAPH_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub bounds: Bounds,
    pub generation: GenerationConstraints,
    pub verification: VerificationConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub json_logs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Combined token limit for one (reference, sentence) pair.
    pub max_pair_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub inference_url: String,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub summarizer: String,
    pub entailment: String,
    pub ner: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
                json_logs: false,
            },
            bounds: Bounds::default(),
            generation: GenerationConstraints::default(),
            verification: VerificationConfig {
                max_pair_length: 512,
            },
            models: ModelConfig {
                inference_url: "http://localhost:8080".to_string(),
                api_token: None,
                summarizer: "facebook/bart-large-cnn".to_string(),
                entailment: "roberta-large-mnli".to_string(),
                ner: "dslim/bert-base-NER".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `FACTGRAPH_*` variables (a `.env` file is read first).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let mut config = Self::default();

        override_parsed(&get, "BIND_ADDRESS", &mut config.server.bind_address)?;
        override_parsed(&get, "JSON_LOGS", &mut config.server.json_logs)?;
        if let Some(format) = get("LOG_FORMAT") {
            config.server.json_logs = format.eq_ignore_ascii_case("json");
        }

        override_parsed(&get, "SUMMARIZATION_BOUND", &mut config.bounds.summarization)?;
        override_parsed(&get, "VERIFICATION_BOUND", &mut config.bounds.verification)?;
        override_parsed(&get, "GRAPH_BOUND", &mut config.bounds.graph)?;

        override_parsed(&get, "MIN_SUMMARY_TOKENS", &mut config.generation.min_tokens)?;
        override_parsed(&get, "MAX_SUMMARY_TOKENS", &mut config.generation.max_tokens)?;
        override_parsed(&get, "NUM_BEAMS", &mut config.generation.num_beams)?;
        override_parsed(&get, "REPETITION_PENALTY", &mut config.generation.repetition_penalty)?;
        override_parsed(&get, "LENGTH_PENALTY", &mut config.generation.length_penalty)?;

        override_parsed(&get, "MAX_PAIR_LENGTH", &mut config.verification.max_pair_length)?;

        if let Some(url) = get("INFERENCE_URL") {
            config.models.inference_url = url;
        }
        config.models.api_token = get("API_TOKEN").or(config.models.api_token);
        if let Some(model) = get("SUMMARIZER_MODEL") {
            config.models.summarizer = model;
        }
        if let Some(model) = get("ENTAILMENT_MODEL") {
            config.models.entailment = model;
        }
        if let Some(model) = get("NER_MODEL") {
            config.models.ner = model;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        if b.summarization == 0 || b.verification == 0 || b.graph == 0 {
            anyhow::bail!("Truncation bounds must be greater than zero");
        }

        let g = &self.generation;
        if g.min_tokens > g.max_tokens {
            anyhow::bail!(
                "Minimum summary length {} exceeds maximum {}",
                g.min_tokens,
                g.max_tokens
            );
        }
        if g.num_beams == 0 {
            anyhow::bail!("Beam width must be at least 1");
        }
        if g.repetition_penalty <= 1.0 {
            anyhow::bail!("Repetition penalty must be greater than 1.0");
        }

        if self.verification.max_pair_length == 0 {
            anyhow::bail!("Entailment max length must be greater than zero");
        }

        Ok(())
    }

    pub fn engine_config(&self) -> analysis::EngineConfig {
        analysis::EngineConfig {
            bounds: self.bounds,
            generation: self.generation.clone(),
            max_pair_length: self.verification.max_pair_length,
        }
    }
}

fn override_parsed<T, G>(get: &G, name: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    if let Some(raw) = get(name) {
        *target = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}{}: {:?}", ENV_PREFIX, name, raw))?;
    }
    Ok(())
}
