use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::logic::geometry::shape_errors;
use crate::models::{bed::GardenBed, plant::PlacedPlant};

/// A persisted garden: beds and placed plants embedded as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenLayout {
    pub id: u64,
    pub name: String,
    pub beds: Vec<GardenBed>,
    pub plants: Vec<PlacedPlant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/garden-layouts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPayload {
    pub name: String,
    #[serde(default)]
    pub beds: Vec<GardenBed>,
    #[serde(default)]
    pub plants: Vec<PlacedPlant>,
}

/// Body of `PUT /api/garden-layouts/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPatch {
    pub name: Option<String>,
    pub beds: Option<Vec<GardenBed>>,
    pub plants: Option<Vec<PlacedPlant>>,
}

impl LayoutPayload {
    /// Merges `patch` over this payload.
    pub fn patched(self, patch: LayoutPatch) -> Self {
        Self {
            name: patch.name.unwrap_or(self.name),
            beds: patch.beds.unwrap_or(self.beds),
            plants: patch.plants.unwrap_or(self.plants),
        }
    }

    /// Returns one message per violation; empty when the payload is valid.
    /// `known_plant` tells whether a catalog plant id exists.
    pub fn validate(&self, known_plant: impl Fn(u32) -> bool) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Garden name is required.".to_string());
        }

        let mut bed_ids = HashSet::new();
        for (i, bed) in self.beds.iter().enumerate() {
            if bed.id.is_empty() {
                errors.push(format!("beds[{i}]: id is required."));
            } else if !bed_ids.insert(bed.id.as_str()) {
                errors.push(format!("beds[{i}]: duplicate bed id '{}'.", bed.id));
            }
            errors.extend(shape_errors(&bed.shape).into_iter().map(|e| format!("beds[{i}]: {e}")));
        }

        let mut plant_ids = HashSet::new();
        for (i, plant) in self.plants.iter().enumerate() {
            if plant.id.is_empty() {
                errors.push(format!("plants[{i}]: id is required."));
            } else if !plant_ids.insert(plant.id.as_str()) {
                errors.push(format!("plants[{i}]: duplicate placed plant id '{}'.", plant.id));
            }
            if !plant.x.is_finite() || !plant.y.is_finite() {
                errors.push(format!("plants[{i}]: position must be finite."));
            }
            if !known_plant(plant.plant_id) {
                errors.push(format!("plants[{i}]: unknown plant id {}.", plant.plant_id));
            }
        }

        errors
    }
}

impl From<GardenLayout> for LayoutPayload {
    fn from(layout: GardenLayout) -> Self {
        Self { name: layout.name, beds: layout.beds, plants: layout.plants }
    }
}

/// Clears every `bed_id` that does not name one of `beds`.
/// Returns how many plants were detached.
pub fn clear_dangling_bed_refs(beds: &[GardenBed], plants: &mut [PlacedPlant]) -> usize {
    let known: HashSet<&str> = beds.iter().map(|b| b.id.as_str()).collect();
    let mut cleared = 0;
    for plant in plants.iter_mut() {
        if plant.bed_id.as_deref().is_some_and(|id| !known.contains(id)) {
            plant.bed_id = None;
            cleared += 1;
        }
    }
    cleared
}
