use serde::{Deserialize, Serialize};

/// Full drug record as stored in the `dd_collection` collection.
/// The dataset is scraped, so every field is optional on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drug {
    pub drug_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_classes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_otc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancy_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_drugs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_condition_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_reviews: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_condition_url: Option<String>,
}

/// Projection returned by the check-drugs endpoint. Missing fields
/// pass through as absent, verbatim from the stored document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugSummary {
    pub drug_name: Option<String>,
    pub side_effects: Option<String>,
    pub drug_classes: Option<String>,
    pub medical_condition: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckDrugsRequest {
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckDrugsResponse {
    pub drugs: Vec<DrugSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tolerates_missing_fields() {
        let summary: DrugSummary =
            serde_json::from_value(serde_json::json!({ "drug_name": "aspirin" })).unwrap();
        assert_eq!(summary.drug_name.as_deref(), Some("aspirin"));
        assert!(summary.side_effects.is_none());

        let encoded = serde_json::to_value(&summary).unwrap();
        assert_eq!(encoded["side_effects"], serde_json::Value::Null);
    }

    #[test]
    fn check_drugs_request_defaults_to_empty_words() {
        let req: CheckDrugsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.words.is_empty());
    }
}
