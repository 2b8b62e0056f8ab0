//! Named-column representation of a questionnaire record.
//!
//! Used by the tabular fallback: one column per submitted field, untransformed.

use serde::Serialize;

use crate::models::QuestionnaireRecord;

/// Column names in submission order
pub const COLUMN_NAMES: [&str; 18] = [
    "age",
    "gender",
    "ethnicity",
    "country_of_residence",
    "jaundice",
    "family_history_asd",
    "used_app_before",
    "relation",
    "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "a10",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Number(f64),
    Text(String),
}

impl ColumnValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ColumnValue::Number(n) => Some(*n),
            ColumnValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(s) => Some(s),
            ColumnValue::Number(_) => None,
        }
    }
}

/// Single-row table keyed by column name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRecord {
    columns: Vec<(&'static str, ColumnValue)>,
}

impl NamedRecord {
    pub fn from_record(record: &QuestionnaireRecord) -> Self {
        let text = |s: &str| ColumnValue::Text(s.to_string());

        let mut columns = vec![
            ("age", ColumnValue::Number(f64::from(record.age))),
            ("gender", text(record.gender.as_str())),
            ("ethnicity", text(&record.ethnicity)),
            ("country_of_residence", text(&record.country_of_residence)),
            ("jaundice", text(record.jaundice.as_str())),
            ("family_history_asd", text(record.family_history_asd.as_str())),
            ("used_app_before", text(record.used_app_before.as_str())),
            ("relation", text(record.relation.as_str())),
        ];
        for (name, answer) in COLUMN_NAMES[8..].iter().zip(record.answers()) {
            columns.push((*name, ColumnValue::Number(f64::from(answer))));
        }

        Self { columns }
    }

    pub fn get(&self, name: &str) -> Option<&ColumnValue> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
