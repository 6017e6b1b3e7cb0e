//! Process-wide in-memory store behind the REST API.
//!
//! Everything resets on restart. Layout ids come from a counter starting at 1.

use std::collections::BTreeMap;

use chrono::Utc;
use log::{debug, warn};
use tokio::sync::RwLock;

use crate::data::plants::default_catalog;
use crate::error::StoreError;
use crate::logic::companion;
use crate::models::{
    companion::{CompanionEntry, CompanionRelationship, CompatibilityMatrix},
    layout::{clear_dangling_bed_refs, GardenLayout, LayoutPatch, LayoutPayload},
    plant::Plant,
};

#[derive(Debug, Default)]
pub struct MemStorage {
    plants: BTreeMap<u32, Plant>,
    relationships: Vec<CompanionRelationship>,
    layouts: BTreeMap<u64, GardenLayout>,
    next_layout_id: u64,
}

impl MemStorage {
    /// Empty catalog, no layouts.
    pub fn new() -> Self {
        Self { next_layout_id: 1, ..Default::default() }
    }

    /// Catalog and companion table from [`default_catalog`].
    pub fn seeded() -> Self {
        let (plants, relationships) = default_catalog();
        let mut storage = Self::new();
        storage.plants = plants.into_iter().map(|p| (p.id, p)).collect();
        storage.relationships = relationships;
        debug!(
            "Seeded {} plants and {} companion relationships",
            storage.plants.len(),
            storage.relationships.len()
        );
        storage
    }

    pub fn all_plants(&self) -> Vec<Plant> {
        self.plants.values().cloned().collect()
    }

    pub fn plant(&self, id: u32) -> Result<&Plant, StoreError> {
        self.plants.get(&id).ok_or(StoreError::CatalogPlantNotFound(id))
    }

    /// Every curated edge touching `plant_id`, oriented so that `plantId` is
    /// the requested plant and `plant` is the other one. Edges whose
    /// companion is missing from the catalog are skipped.
    pub fn companions_of(&self, plant_id: u32) -> Result<Vec<CompanionEntry>, StoreError> {
        self.plant(plant_id)?;
        let entries = self
            .relationships
            .iter()
            .filter_map(|r| {
                let companion_id = if r.plant_id == plant_id {
                    r.companion_id
                } else if r.companion_id == plant_id {
                    r.plant_id
                } else {
                    return None;
                };
                let plant = self.plants.get(&companion_id)?.clone();
                Some(CompanionEntry {
                    id: r.id,
                    plant_id,
                    companion_id,
                    compatibility: r.compatibility,
                    notes: r.notes.clone(),
                    plant,
                })
            })
            .collect();
        Ok(entries)
    }

    pub fn compatibility_matrix(&self) -> CompatibilityMatrix {
        companion::compatibility_matrix(&self.all_plants())
    }

    pub fn all_layouts(&self) -> Vec<GardenLayout> {
        self.layouts.values().cloned().collect()
    }

    pub fn layout(&self, id: u64) -> Result<&GardenLayout, StoreError> {
        self.layouts.get(&id).ok_or(StoreError::LayoutNotFound(id))
    }

    /// Validates and stores a new layout under the next id.
    pub fn create_layout(&mut self, payload: LayoutPayload) -> Result<GardenLayout, StoreError> {
        let payload = self.checked(payload)?;
        let id = self.next_layout_id;
        self.next_layout_id += 1;
        let now = Utc::now();
        let layout = GardenLayout {
            id,
            name: payload.name,
            beds: payload.beds,
            plants: payload.plants,
            created_at: now,
            updated_at: now,
        };
        debug!(
            "Created layout {id} '{}' ({} beds, {} plants)",
            layout.name,
            layout.beds.len(),
            layout.plants.len()
        );
        self.layouts.insert(id, layout.clone());
        Ok(layout)
    }

    /// Merges `patch` over the stored layout and validates the result.
    /// The stored layout is untouched when validation fails.
    pub fn update_layout(&mut self, id: u64, patch: LayoutPatch) -> Result<GardenLayout, StoreError> {
        let current = self.layout(id)?.clone();
        let payload = self.checked(LayoutPayload::from(current.clone()).patched(patch))?;
        let layout = GardenLayout {
            name: payload.name,
            beds: payload.beds,
            plants: payload.plants,
            updated_at: Utc::now(),
            ..current
        };
        debug!("Updated layout {id}");
        self.layouts.insert(id, layout.clone());
        Ok(layout)
    }

    pub fn delete_layout(&mut self, id: u64) -> Result<GardenLayout, StoreError> {
        let layout = self.layouts.remove(&id).ok_or(StoreError::LayoutNotFound(id))?;
        debug!("Deleted layout {id}");
        Ok(layout)
    }

    fn checked(&self, mut payload: LayoutPayload) -> Result<LayoutPayload, StoreError> {
        let errors = payload.validate(|id| self.plants.contains_key(&id));
        if !errors.is_empty() {
            warn!("Rejected layout '{}': {}", payload.name, errors.join("; "));
            return Err(StoreError::Invalid(errors));
        }
        let cleared = clear_dangling_bed_refs(&payload.beds, &mut payload.plants);
        if cleared > 0 {
            debug!("Cleared {cleared} dangling bed reference(s)");
        }
        Ok(payload)
    }
}

/// Shared state injected into every handler.
pub struct AppState {
    pub storage: RwLock<MemStorage>,
}

impl AppState {
    pub fn new(storage: MemStorage) -> Self {
        Self { storage: RwLock::new(storage) }
    }

    pub fn seeded() -> Self {
        Self::new(MemStorage::seeded())
    }
}
