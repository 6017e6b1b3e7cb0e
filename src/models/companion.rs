use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::plant::Plant;

/// Curated relationship between two catalog plants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Good,
    Bad,
    Neutral,
}

/// Chart classification of two catalog plants compared by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    Good,
    Fair,
    Poor,
}

/// Proximity classification of a pair of placed plants in the same bed.
///
/// Variants are ordered by severity so `max` yields the worst class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LineClass {
    Good,
    Warning,
    Bad,
}

/// Derived connection between two placed plants. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionLine {
    pub plant_a_id: String,
    pub plant_b_id: String,
    pub class: LineClass,
}

/// Edge of the curated companion table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRelationship {
    pub id: u32,
    pub plant_id: u32,
    pub companion_id: u32,
    pub compatibility: Relationship,
    pub notes: Option<String>,
}

/// `GET /api/companions/{plantId}` item: the edge plus the resolved companion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanionEntry {
    pub id: u32,
    pub plant_id: u32,
    pub companion_id: u32,
    pub compatibility: Relationship,
    pub notes: Option<String>,
    pub plant: Plant,
}

/// Row-major chart: `rows[i][j]` classifies `plants[i]` against `plants[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompatibilityMatrix {
    pub plants: Vec<String>,
    pub rows: Vec<Vec<Compatibility>>,
}
