use axum::{
    extract::{Path, State},
    response::Json,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;

use crate::database::connection::{DRUGS_COLLECTION, INTERACTIONS_COLLECTION};
use crate::errors::{AppError, Result};
use crate::models::drug::{CheckDrugsRequest, CheckDrugsResponse, Drug, DrugSummary};
use crate::models::interaction::{drug_pairs, CheckInteractionRequest, Interaction};
use crate::state::AppState;

/// Exact set-membership lookup of candidate words against the drug
/// collection. Pure read; no dedup, no fuzzy matching.
pub async fn check_drugs(
    State(state): State<AppState>,
    Json(req): Json<CheckDrugsRequest>,
) -> Result<Json<CheckDrugsResponse>> {
    let collection: Collection<DrugSummary> = state.db.collection(DRUGS_COLLECTION);

    let drugs: Vec<DrugSummary> = collection
        .find(doc! { "drug_name": { "$in": req.words.clone() } })
        .projection(doc! {
            "_id": 0,
            "drug_name": 1,
            "side_effects": 1,
            "drug_classes": 1,
            "medical_condition": 1,
        })
        .await?
        .try_collect()
        .await?;

    Ok(Json(CheckDrugsResponse { drugs }))
}

pub async fn list_drugs(State(state): State<AppState>) -> Result<Json<Vec<Drug>>> {
    let collection: Collection<Drug> = state.db.collection(DRUGS_COLLECTION);
    let drugs: Vec<Drug> = collection.find(doc! {}).await?.try_collect().await?;
    Ok(Json(drugs))
}

pub async fn get_drug(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Drug>> {
    let collection: Collection<Drug> = state.db.collection(DRUGS_COLLECTION);

    let drug = collection
        .find_one(doc! { "drug_name": &name })
        .await?
        .ok_or(AppError::DrugNotFound)?;

    Ok(Json(drug))
}

/// Looks up every unordered pair of the submitted names in the
/// interaction collection; a pair with no record reports "No interaction".
pub async fn check_interaction(
    State(state): State<AppState>,
    Json(req): Json<CheckInteractionRequest>,
) -> Result<Json<Vec<Interaction>>> {
    if req.drugs.len() < 2 {
        return Err(AppError::invalid_data(
            "At least two drugs are required to check interactions",
        ));
    }

    let collection: Collection<Interaction> = state.db.collection(INTERACTIONS_COLLECTION);

    let mut results = Vec::new();
    for (first, second) in drug_pairs(&req.drugs) {
        let filter = doc! {
            "$or": [
                { "Drug_1": anchored(&first), "Drug_2": anchored(&second) },
                { "Drug_1": anchored(&second), "Drug_2": anchored(&first) },
            ]
        };

        let entry = collection
            .find_one(filter)
            .await?
            .unwrap_or_else(|| Interaction::none_on_record(&first, &second));
        results.push(entry);
    }

    Ok(Json(results))
}

// Case-insensitive whole-name match, same as the dataset importer uses.
fn anchored(name: &str) -> Document {
    doc! {
        "$regex": Bson::String(format!("^{}$", name)),
        "$options": "i",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_filter_is_case_insensitive_and_whole_name() {
        let filter = anchored("Aspirin");
        assert_eq!(filter.get_str("$regex").unwrap(), "^Aspirin$");
        assert_eq!(filter.get_str("$options").unwrap(), "i");
    }
}
