use serde::{Deserialize, Serialize};

/// Decoding constraints handed to the summarization capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConstraints {
    pub min_tokens: usize,
    pub max_tokens: usize,
    pub do_sample: bool,
    pub num_beams: usize,
    pub repetition_penalty: f32,
    pub length_penalty: f32,
    pub early_stopping: bool,
}

impl Default for GenerationConstraints {
    fn default() -> Self {
        Self {
            min_tokens: 50,
            max_tokens: 150,
            do_sample: false,
            num_beams: 4,
            repetition_penalty: 2.0,
            length_penalty: 2.0,
            early_stopping: true,
        }
    }
}

/// NLI label for a (reference, hypothesis) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NliLabel {
    Contradiction,
    Neutral,
    Entailment,
}

impl std::str::FromStr for NliLabel {
    type Err = anyhow::Error;

    /// Accepts the readable names and the raw MNLI head ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONTRADICTION" | "LABEL_0" => Ok(Self::Contradiction),
            "NEUTRAL" | "LABEL_1" => Ok(Self::Neutral),
            "ENTAILMENT" | "LABEL_2" => Ok(Self::Entailment),
            other => anyhow::bail!("Unknown NLI label: {}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: NliLabel,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    #[serde(rename = "PERSON")]
    Person,
    #[serde(rename = "ORG")]
    Organization,
    #[serde(rename = "LOC")]
    Location,
    #[serde(untagged)]
    Other(String),
}

impl EntityCategory {
    /// Person, Organization and Location make it into the graph.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// A sentence with its character span in the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl SentenceSpan {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    pub category: EntityCategory,
    /// Index into `Analysis::sentences`, if the mention falls inside one.
    pub sentence: Option<usize>,
}

impl EntityMention {
    pub fn new(text: impl Into<String>, category: EntityCategory, sentence: usize) -> Self {
        Self {
            text: text.into(),
            category,
            sentence: Some(sentence),
        }
    }
}

/// Output of one linguistic-analysis pass. Mentions are in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentences: Vec<SentenceSpan>,
    pub entities: Vec<EntityMention>,
}

impl Analysis {
    pub fn sentence_texts(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(|s| s.text.as_str())
    }

    /// Mentions belonging to sentence `idx`, in document order.
    pub fn mentions_in(&self, idx: usize) -> impl Iterator<Item = &EntityMention> {
        self.entities
            .iter()
            .filter(move |m| m.sentence == Some(idx))
    }
}
