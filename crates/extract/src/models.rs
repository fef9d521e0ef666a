//! HTTP-backed capability implementations.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capability::{EntailmentClassifier, LinguisticAnalyzer, Summarizer};
use crate::llm::InferenceClient;
use crate::normalizer::{normalize_category, normalize_surface};
use crate::schema::{
    Analysis, Classification, EntityMention, GenerationConstraints, NliLabel,
};
use crate::segment::{sentence_index, split_sentences};

// ---------------------------------------------------------------------------
// Summarization
// ---------------------------------------------------------------------------

pub struct HfSummarizer {
    client: InferenceClient,
    model: String,
}

#[derive(Serialize)]
struct SummarizationParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
    num_beams: usize,
    repetition_penalty: f32,
    length_penalty: f32,
    early_stopping: bool,
}

impl From<&GenerationConstraints> for SummarizationParameters {
    fn from(c: &GenerationConstraints) -> Self {
        Self {
            min_length: c.min_tokens,
            max_length: c.max_tokens,
            do_sample: c.do_sample,
            num_beams: c.num_beams,
            repetition_penalty: c.repetition_penalty,
            length_penalty: c.length_penalty,
            early_stopping: c.early_stopping,
        }
    }
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

impl HfSummarizer {
    pub fn new(client: InferenceClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl Summarizer for HfSummarizer {
    async fn summarize(&self, text: &str, constraints: &GenerationConstraints) -> Result<String> {
        let outputs: Vec<SummaryOutput> = self
            .client
            .infer(&self.model, text, SummarizationParameters::from(constraints))
            .await
            .context("Summarization request failed")?;

        first_summary(outputs)
    }
}

fn first_summary(outputs: Vec<SummaryOutput>) -> Result<String> {
    outputs
        .into_iter()
        .next()
        .map(|o| o.summary_text.trim().to_string())
        .context("Summarizer returned no candidates")
}

// ---------------------------------------------------------------------------
// Entailment
// ---------------------------------------------------------------------------

pub struct HfEntailmentClassifier {
    client: InferenceClient,
    model: String,
}

#[derive(Serialize)]
struct ClassificationParameters {
    truncation: bool,
    max_length: usize,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// Text-classification servers return either a flat list or one list per input.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationOutput {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl HfEntailmentClassifier {
    pub fn new(client: InferenceClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl EntailmentClassifier for HfEntailmentClassifier {
    async fn classify(
        &self,
        pair_text: &str,
        max_length: usize,
        truncate: bool,
    ) -> Result<Classification> {
        let parameters = ClassificationParameters {
            truncation: truncate,
            max_length,
        };

        let output: ClassificationOutput = self
            .client
            .infer(&self.model, pair_text, parameters)
            .await
            .context("Entailment request failed")?;

        top_label(output)
    }
}

fn top_label(output: ClassificationOutput) -> Result<Classification> {
    let scores = match output {
        ClassificationOutput::Nested(lists) => lists.into_iter().next().unwrap_or_default(),
        ClassificationOutput::Flat(list) => list,
    };

    let best = scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .context("Classifier returned no labels")?;

    Ok(Classification {
        label: best.label.parse::<NliLabel>()?,
        score: best.score,
    })
}

// ---------------------------------------------------------------------------
// Linguistic analysis
// ---------------------------------------------------------------------------

/// Local UAX #29 sentence segmentation plus a remote token-classification
/// model for entities.
pub struct NerAnalyzer {
    client: InferenceClient,
    model: String,
}

#[derive(Serialize)]
struct NerParameters {
    aggregation_strategy: &'static str,
}

#[derive(Debug, Deserialize)]
struct NerEntity {
    #[serde(alias = "entity")]
    entity_group: String,
    #[serde(default)]
    word: String,
    start: Option<usize>,
    end: Option<usize>,
}

impl NerAnalyzer {
    pub fn new(client: InferenceClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl LinguisticAnalyzer for NerAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Analysis> {
        let entities: Vec<NerEntity> = self
            .client
            .infer(
                &self.model,
                text,
                NerParameters {
                    aggregation_strategy: "simple",
                },
            )
            .await
            .context("Entity recognition request failed")?;

        let analysis = assemble_analysis(text, entities);

        tracing::debug!(
            model = %self.model,
            sentences = analysis.sentences.len(),
            mentions = analysis.entities.len(),
            "Linguistic analysis complete"
        );

        Ok(analysis)
    }
}

fn assemble_analysis(text: &str, mut raw: Vec<NerEntity>) -> Analysis {
    let sentences = split_sentences(text);
    let chars: Vec<char> = text.chars().collect();

    raw.sort_by_key(|e| e.start.unwrap_or(usize::MAX));

    let entities = raw
        .into_iter()
        .filter_map(|e| {
            let surface = match (e.start, e.end) {
                (Some(start), Some(end)) if start < end && end <= chars.len() => {
                    chars[start..end].iter().collect::<String>()
                }
                _ => e.word.clone(),
            };
            let surface = normalize_surface(&surface);
            if surface.is_empty() {
                return None;
            }

            Some(EntityMention {
                text: surface,
                category: normalize_category(&e.entity_group),
                sentence: e.start.and_then(|start| sentence_index(&sentences, start)),
            })
        })
        .collect();

    Analysis {
        sentences,
        entities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityCategory;

    #[test]
    fn test_first_summary() {
        let outputs: Vec<SummaryOutput> =
            serde_json::from_str(r#"[{"summary_text": " Alice works at Acme. "}]"#).unwrap();
        assert_eq!(first_summary(outputs).unwrap(), "Alice works at Acme.");

        assert!(first_summary(Vec::new()).is_err());
    }

    #[test]
    fn test_summarization_parameters_from_defaults() {
        let params = SummarizationParameters::from(&GenerationConstraints::default());
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["do_sample"], false);
        assert_eq!(json["num_beams"], 4);
        assert_eq!(json["early_stopping"], true);
        assert_eq!(json["min_length"], 50);
        assert_eq!(json["max_length"], 150);
        assert!(json["repetition_penalty"].as_f64().unwrap() > 1.0);
        assert!(json["length_penalty"].is_number());
    }

    #[test]
    fn test_top_label_flat_and_nested() {
        let flat: ClassificationOutput =
            serde_json::from_str(r#"[{"label": "CONTRADICTION", "score": 0.91}]"#).unwrap();
        let c = top_label(flat).unwrap();
        assert_eq!(c.label, NliLabel::Contradiction);
        assert!((c.score - 0.91).abs() < 1e-6);

        let nested: ClassificationOutput = serde_json::from_str(
            r#"[[{"label": "LABEL_1", "score": 0.2}, {"label": "LABEL_2", "score": 0.7}]]"#,
        )
        .unwrap();
        assert_eq!(top_label(nested).unwrap().label, NliLabel::Entailment);
    }

    #[test]
    fn test_top_label_rejects_unknown_and_empty() {
        let unknown: ClassificationOutput =
            serde_json::from_str(r#"[{"label": "POSITIVE", "score": 0.99}]"#).unwrap();
        assert!(top_label(unknown).is_err());

        let empty: ClassificationOutput = serde_json::from_str("[]").unwrap();
        assert!(top_label(empty).is_err());
    }

    #[test]
    fn test_assemble_analysis_assigns_sentences() {
        let text = "Alice works at Acme. Bob founded Acme in 2001.";
        let raw: Vec<NerEntity> = serde_json::from_str(
            r#"[
                {"entity_group": "PER", "word": "Alice", "start": 0, "end": 5},
                {"entity_group": "ORG", "word": "Acme", "start": 15, "end": 19},
                {"entity_group": "PER", "word": "Bob", "start": 21, "end": 24},
                {"entity_group": "ORG", "word": "Acme", "start": 33, "end": 37},
                {"entity_group": "DATE", "word": "2001", "start": 41, "end": 45}
            ]"#,
        )
        .unwrap();

        let analysis = assemble_analysis(text, raw);

        assert_eq!(analysis.sentences.len(), 2);
        assert_eq!(analysis.entities.len(), 5);
        assert_eq!(analysis.entities[0].text, "Alice");
        assert_eq!(analysis.entities[0].sentence, Some(0));
        assert_eq!(analysis.entities[1].category, EntityCategory::Organization);
        assert_eq!(analysis.entities[2].sentence, Some(1));
        assert_eq!(
            analysis.entities[4].category,
            EntityCategory::Other("DATE".to_string())
        );
    }

    #[test]
    fn test_assemble_analysis_keeps_honorifics_in_sentence() {
        let text = "Mr. Smith met Mrs. Jones at Acme in Paris.";
        let raw: Vec<NerEntity> = serde_json::from_str(
            r#"[
                {"entity_group": "PER", "word": "Smith", "start": 4, "end": 9},
                {"entity_group": "PER", "word": "Jones", "start": 19, "end": 24},
                {"entity_group": "ORG", "word": "Acme", "start": 28, "end": 32},
                {"entity_group": "LOC", "word": "Paris", "start": 36, "end": 41}
            ]"#,
        )
        .unwrap();

        let analysis = assemble_analysis(text, raw);

        assert_eq!(analysis.sentences.len(), 1);
        assert_eq!(analysis.sentences[0].text, text);
        let surfaces: Vec<&str> = analysis.entities.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(surfaces, vec!["Smith", "Jones", "Acme", "Paris"]);
        assert!(analysis.entities.iter().all(|e| e.sentence == Some(0)));
    }

    #[test]
    fn test_assemble_analysis_falls_back_to_word() {
        let raw: Vec<NerEntity> =
            serde_json::from_str(r#"[{"entity": "B-LOC", "word": " Paris "}]"#).unwrap();

        let analysis = assemble_analysis("She moved to Paris.", raw);

        assert_eq!(analysis.entities[0].text, "Paris");
        assert_eq!(analysis.entities[0].category, EntityCategory::Location);
        assert_eq!(analysis.entities[0].sentence, None);
    }
}
