use extract::NliLabel;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerificationStatus {
    Verified,
    Unverified,
    #[serde(rename = "Hallucination Risk")]
    HallucinationRisk,
}

impl From<NliLabel> for VerificationStatus {
    fn from(label: NliLabel) -> Self {
        match label {
            NliLabel::Contradiction => Self::HallucinationRisk,
            NliLabel::Neutral => Self::Unverified,
            NliLabel::Entailment => Self::Verified,
        }
    }
}

/// One sentence of the generated summary and its fact-check outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySentence {
    pub text: String,
    pub status: VerificationStatus,
    /// Classifier score for the returned label, rounded to 2 decimals.
    pub confidence: f64,
}

impl SummarySentence {
    pub fn new(text: String, label: NliLabel, score: f32) -> Self {
        Self {
            text,
            status: label.into(),
            confidence: round_confidence(score),
        }
    }

    /// Record used when the classifier could not score the sentence.
    pub fn degraded(text: String) -> Self {
        Self {
            text,
            status: VerificationStatus::Unverified,
            confidence: 0.0,
        }
    }
}

pub fn round_confidence(score: f32) -> f64 {
    let clamped = f64::from(score).clamp(0.0, 1.0);
    (clamped * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(
            VerificationStatus::from(NliLabel::Contradiction),
            VerificationStatus::HallucinationRisk
        );
        assert_eq!(
            VerificationStatus::from(NliLabel::Neutral),
            VerificationStatus::Unverified
        );
        assert_eq!(
            VerificationStatus::from(NliLabel::Entailment),
            VerificationStatus::Verified
        );
    }

    #[test]
    fn test_round_confidence() {
        assert_eq!(round_confidence(0.91), 0.91);
        assert_eq!(round_confidence(0.987), 0.99);
        assert_eq!(round_confidence(0.004), 0.0);
        assert_eq!(round_confidence(1.3), 1.0);
        assert_eq!(round_confidence(-0.2), 0.0);
    }

    #[test]
    fn test_status_wire_names() {
        let s = SummarySentence::new("x".to_string(), NliLabel::Contradiction, 0.5);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["status"], "Hallucination Risk");
        assert_eq!(json["confidence"], 0.5);
    }
}
