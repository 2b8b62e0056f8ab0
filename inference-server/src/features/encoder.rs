//! Feature Encoder - questionnaire record → positional feature vector
//!
//! Pure and total: a record that passed validation always encodes.

use crate::models::{Gender, QuestionnaireRecord};
use super::layout::{AQ_OFFSET, GENDER_OFFSET, RELATION_OFFSET, RELATION_SLOTS};
use super::vector::FeatureVector;

/// Relation labels in slot order. The last slot doubles as the default bucket.
pub const RELATION_ORDER: [&str; RELATION_SLOTS] = [
    "Self",
    "Parent",
    "Relative",
    "Healthcare professional",
    "Others",
];

/// Slot used for any relation label outside [`RELATION_ORDER`]
pub const RELATION_FALLBACK_SLOT: usize = RELATION_SLOTS - 1;

const JAUNDICE: usize = 3;
const FAMILY_HISTORY: usize = 4;
const USED_APP_BEFORE: usize = 5;

/// Position of a relation label inside the one-hot group
pub fn relation_slot(label: &str) -> usize {
    RELATION_ORDER
        .iter()
        .position(|&known| known == label)
        .unwrap_or(RELATION_FALLBACK_SLOT)
}

fn flag(on: bool) -> f64 {
    if on { 1.0 } else { 0.0 }
}

/// Encode a validated record into the 21-slot layout
pub fn encode(record: &QuestionnaireRecord) -> FeatureVector {
    let mut vector = FeatureVector::new();

    vector.set(0, f64::from(record.age));

    let gender_slot = match record.gender {
        Gender::M => 0,
        Gender::F => 1,
    };
    vector.set(GENDER_OFFSET + gender_slot, 1.0);

    vector.set(JAUNDICE, flag(record.jaundice.is_yes()));
    vector.set(FAMILY_HISTORY, flag(record.family_history_asd.is_yes()));
    vector.set(USED_APP_BEFORE, flag(record.used_app_before.is_yes()));

    for (i, answer) in record.answers().iter().enumerate() {
        vector.set(AQ_OFFSET + i, f64::from(*answer));
    }

    vector.set(RELATION_OFFSET + relation_slot(record.relation.as_str()), 1.0);

    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::layout::feature_index;
    use crate::models::questionnaire::sample_record;
    use crate::models::{Relation, YesNo};

    #[test]
    fn test_relation_slot_matches_layout() {
        assert_eq!(RELATION_OFFSET + relation_slot("Self"), feature_index("relation_Self").unwrap());
        assert_eq!(
            RELATION_OFFSET + relation_slot("Healthcare professional"),
            feature_index("relation_Healthcare").unwrap()
        );
        assert_eq!(RELATION_OFFSET + relation_slot("Others"), feature_index("relation_Others").unwrap());
    }

    #[test]
    fn test_unknown_relation_falls_back_to_others() {
        assert_eq!(relation_slot("Guardian"), RELATION_FALLBACK_SLOT);
        assert_eq!(relation_slot(""), RELATION_FALLBACK_SLOT);
        assert_eq!(relation_slot("self"), RELATION_FALLBACK_SLOT);
    }

    #[test]
    fn test_flags_and_gender() {
        let mut record = sample_record();
        record.gender = Gender::F;
        record.jaundice = YesNo::Yes;
        record.used_app_before = YesNo::Yes;
        record.relation = Relation::Parent;

        let vector = encode(&record);
        assert_eq!(vector.get_by_name("gender_M"), Some(0.0));
        assert_eq!(vector.get_by_name("gender_F"), Some(1.0));
        assert_eq!(vector.get_by_name("jaundice_Yes"), Some(1.0));
        assert_eq!(vector.get_by_name("family_history_asd_Yes"), Some(0.0));
        assert_eq!(vector.get_by_name("used_app_before_Yes"), Some(1.0));
        assert_eq!(vector.get_by_name("relation_Parent"), Some(1.0));
        assert_eq!(vector.get_by_name("relation_Self"), Some(0.0));
    }

    #[test]
    fn test_age_copied_verbatim() {
        let mut record = sample_record();
        record.age = 120;
        assert_eq!(encode(&record).get_by_name("age"), Some(120.0));
    }
}
