use serde::{Deserialize, Serialize};

/// Pairwise interaction record from the `d2d_collection` collection.
/// Field names keep the dataset's capitalized headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "Drug_1")]
    pub drug_1: String,
    #[serde(rename = "Drug_2")]
    pub drug_2: String,
    #[serde(rename = "Interaction_Description")]
    pub interaction_description: String,
}

impl Interaction {
    /// Placeholder entry returned when no interaction is on record for a pair.
    pub fn none_on_record(drug_1: &str, drug_2: &str) -> Self {
        Interaction {
            drug_1: drug_1.to_string(),
            drug_2: drug_2.to_string(),
            interaction_description: "No interaction".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckInteractionRequest {
    #[serde(default)]
    pub drugs: Vec<String>,
}

/// All unordered pairs of the submitted drug names, in submission order.
pub fn drug_pairs(drugs: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for i in 0..drugs.len() {
        for j in (i + 1)..drugs.len() {
            pairs.push((drugs[i].clone(), drugs[j].clone()));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_cover_every_combination_once() {
        let drugs = vec![
            "aspirin".to_string(),
            "ibuprofen".to_string(),
            "warfarin".to_string(),
        ];
        let pairs = drug_pairs(&drugs);
        assert_eq!(
            pairs,
            vec![
                ("aspirin".to_string(), "ibuprofen".to_string()),
                ("aspirin".to_string(), "warfarin".to_string()),
                ("ibuprofen".to_string(), "warfarin".to_string()),
            ]
        );
    }

    #[test]
    fn interaction_serializes_with_dataset_field_names() {
        let entry = Interaction::none_on_record("aspirin", "warfarin");
        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(encoded["Drug_1"], "aspirin");
        assert_eq!(encoded["Interaction_Description"], "No interaction");
    }
}
