//! Questionnaire submission model

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

/// Who filled in the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "Self")]
    SelfReport,
    Parent,
    Relative,
    #[serde(rename = "Healthcare professional")]
    HealthcareProfessional,
    Others,
}

impl Relation {
    /// Wire label, as submitted by the client
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::SelfReport => "Self",
            Relation::Parent => "Parent",
            Relation::Relative => "Relative",
            Relation::HealthcareProfessional => "Healthcare professional",
            Relation::Others => "Others",
        }
    }
}

/// A validated AQ-10 screening submission.
///
/// Construct through serde + [`Validate`]; the `/predict` extractor rejects
/// anything that fails either step before encoding starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionnaireRecord {
    // Core demographics
    #[validate(range(min = 1, max = 120, message = "age must be between 1 and 120"))]
    pub age: i32,
    pub gender: Gender,
    #[serde(deserialize_with = "trimmed")]
    pub ethnicity: String,
    #[serde(deserialize_with = "trimmed")]
    pub country_of_residence: String,

    // Medical/family history
    pub jaundice: YesNo,
    pub family_history_asd: YesNo,

    // App usage and relation
    pub used_app_before: YesNo,
    pub relation: Relation,

    // AQ-10 answers (binary after scoring)
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a1: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a2: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a3: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a4: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a5: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a6: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a7: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a8: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a9: i32,
    #[validate(range(min = 0, max = 1, message = "answer must be 0 or 1"))]
    pub a10: i32,
}

impl QuestionnaireRecord {
    /// AQ-10 answers in question order
    pub fn answers(&self) -> [i32; 10] {
        [
            self.a1, self.a2, self.a3, self.a4, self.a5,
            self.a6, self.a7, self.a8, self.a9, self.a10,
        ]
    }

    /// Sum of AQ-10 answers (0-10)
    pub fn aq_score(&self) -> i32 {
        self.answers().iter().sum()
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

#[cfg(test)]
pub(crate) fn sample_record() -> QuestionnaireRecord {
    QuestionnaireRecord {
        age: 25,
        gender: Gender::M,
        ethnicity: "White-European".to_string(),
        country_of_residence: "United Kingdom".to_string(),
        jaundice: YesNo::No,
        family_history_asd: YesNo::No,
        used_app_before: YesNo::No,
        relation: Relation::SelfReport,
        a1: 1,
        a2: 1,
        a3: 1,
        a4: 1,
        a5: 1,
        a6: 0,
        a7: 0,
        a8: 0,
        a9: 0,
        a10: 0,
    }
}

#[cfg(test)]
pub(crate) fn sample_json() -> serde_json::Value {
    serde_json::json!({
        "age": 25,
        "gender": "M",
        "ethnicity": "  White-European ",
        "country_of_residence": "United Kingdom\n",
        "jaundice": "No",
        "family_history_asd": "No",
        "used_app_before": "No",
        "relation": "Self",
        "a1": 1, "a2": 1, "a3": 1, "a4": 1, "a5": 1,
        "a6": 0, "a7": 0, "a8": 0, "a9": 0, "a10": 0
    })
}
