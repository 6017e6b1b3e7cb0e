//! In-memory beds and placed plants of the layout being edited.

use log::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    bed::{BedDetails, GardenBed},
    layout::clear_dangling_bed_refs,
    plant::PlacedPlant,
    Point,
};

/// Beds are kept in draw order: the last bed is drawn on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutStore {
    beds: Vec<GardenBed>,
    plants: Vec<PlacedPlant>,
}

fn fresh_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted parts. Duplicate ids are re-issued and
    /// plants pointing at missing beds are detached.
    pub fn from_parts(beds: Vec<GardenBed>, plants: Vec<PlacedPlant>) -> Self {
        let mut store = Self::new();
        for bed in beds {
            store.add_bed(bed);
        }
        for plant in plants {
            store.add_placed_plant(plant);
        }
        store
    }

    pub fn to_parts(&self) -> (Vec<GardenBed>, Vec<PlacedPlant>) {
        (self.beds.clone(), self.plants.clone())
    }

    pub fn clear(&mut self) {
        self.beds.clear();
        self.plants.clear();
    }

    pub fn beds(&self) -> &[GardenBed] {
        &self.beds
    }

    pub fn placed_plants(&self) -> &[PlacedPlant] {
        &self.plants
    }

    pub fn bed(&self, id: &str) -> Option<&GardenBed> {
        self.beds.iter().find(|b| b.id == id)
    }

    pub fn placed_plant(&self, id: &str) -> Option<&PlacedPlant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn plants_in_bed<'a>(&'a self, bed_id: &'a str) -> impl Iterator<Item = &'a PlacedPlant> + 'a {
        self.plants.iter().filter(move |p| p.bed_id.as_deref() == Some(bed_id))
    }

    /// Stores `bed` on top of the others, issuing an id when it has none or
    /// its id is already taken.
    pub fn add_bed(&mut self, mut bed: GardenBed) -> &GardenBed {
        if bed.id.is_empty() || self.bed(&bed.id).is_some() {
            bed.id = fresh_id("bed");
        }
        debug!("Adding {} bed {}", bed.shape.kind(), bed.id);
        self.beds.push(bed);
        &self.beds[self.beds.len() - 1]
    }

    pub fn update_bed(&mut self, bed: GardenBed) -> Result<&GardenBed, StoreError> {
        let index = self
            .beds
            .iter()
            .position(|b| b.id == bed.id)
            .ok_or_else(|| StoreError::BedNotFound(bed.id.clone()))?;
        self.beds[index] = bed;
        Ok(&self.beds[index])
    }

    pub fn update_bed_details(&mut self, id: &str, details: &BedDetails) -> Result<&GardenBed, StoreError> {
        let bed = self
            .beds
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::BedNotFound(id.to_string()))?;
        bed.apply_details(details);
        Ok(&*bed)
    }

    /// Translates a bed and re-derives every plant's bed membership, since
    /// plants stay where they are while the bed moves under or away from them.
    pub fn move_bed(&mut self, id: &str, dx: f64, dy: f64) -> Result<&GardenBed, StoreError> {
        let index = self
            .beds
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StoreError::BedNotFound(id.to_string()))?;
        self.beds[index].shape = self.beds[index].shape.translated(dx, dy);
        self.refresh_memberships();
        Ok(&self.beds[index])
    }

    /// Removes the bed. Plants inside it are detached, not deleted.
    pub fn delete_bed(&mut self, id: &str) -> Result<GardenBed, StoreError> {
        let index = self
            .beds
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StoreError::BedNotFound(id.to_string()))?;
        let bed = self.beds.remove(index);
        let mut detached = 0;
        for plant in self.plants.iter_mut().filter(|p| p.bed_id.as_deref() == Some(id)) {
            plant.bed_id = None;
            detached += 1;
        }
        debug!("Deleted bed {id}, detached {detached} plant(s)");
        Ok(bed)
    }

    /// Stores `plant`, issuing an id when needed. A `bed_id` naming no
    /// current bed is cleared.
    pub fn add_placed_plant(&mut self, mut plant: PlacedPlant) -> &PlacedPlant {
        if plant.id.is_empty() || self.placed_plant(&plant.id).is_some() {
            plant.id = fresh_id("plant");
        }
        clear_dangling_bed_refs(&self.beds, std::slice::from_mut(&mut plant));
        debug!("Placing plant {} ({}) in {:?}", plant.id, plant.plant_id, plant.bed_id);
        self.plants.push(plant);
        &self.plants[self.plants.len() - 1]
    }

    pub fn update_placed_plant(&mut self, mut plant: PlacedPlant) -> Result<&PlacedPlant, StoreError> {
        let index = self
            .plants
            .iter()
            .position(|p| p.id == plant.id)
            .ok_or_else(|| StoreError::PlantNotFound(plant.id.clone()))?;
        clear_dangling_bed_refs(&self.beds, std::slice::from_mut(&mut plant));
        self.plants[index] = plant;
        Ok(&self.plants[index])
    }

    /// Drag-end for a plant: new position and recomputed bed membership.
    pub fn move_placed_plant(&mut self, id: &str, to: Point) -> Result<&PlacedPlant, StoreError> {
        let bed_id = self.find_bed_at_point(to).map(str::to_string);
        let plant = self
            .plants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PlantNotFound(id.to_string()))?;
        plant.x = to.x;
        plant.y = to.y;
        plant.bed_id = bed_id;
        Ok(&*plant)
    }

    pub fn delete_placed_plant(&mut self, id: &str) -> Result<PlacedPlant, StoreError> {
        let index = self
            .plants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::PlantNotFound(id.to_string()))?;
        Ok(self.plants.remove(index))
    }

    /// Topmost bed containing `point`. Beds are tried from the last added
    /// to the first, so overlapping beds resolve to the one drawn on top.
    pub fn find_bed_at_point(&self, point: Point) -> Option<&str> {
        self.beds
            .iter()
            .rev()
            .find(|b| b.shape.contains_point(point))
            .map(|b| b.id.as_str())
    }

    fn refresh_memberships(&mut self) {
        let memberships: Vec<Option<String>> = self
            .plants
            .iter()
            .map(|p| self.find_bed_at_point(p.position()).map(str::to_string))
            .collect();
        for (plant, bed_id) in self.plants.iter_mut().zip(memberships) {
            plant.bed_id = bed_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bed::Shape;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> GardenBed {
        GardenBed::new(Shape::Rectangle { x, y, width: w, height: h }, "#3E2723", "#4CAF50")
    }

    fn plant_at(x: f64, y: f64) -> PlacedPlant {
        PlacedPlant::new(1, Point::new(x, y))
    }

    #[test]
    fn test_add_bed_assigns_unique_ids() {
        let mut store = LayoutStore::new();
        let a = store.add_bed(rect(0.0, 0.0, 50.0, 50.0)).id.clone();
        let b = store.add_bed(rect(0.0, 0.0, 50.0, 50.0)).id.clone();
        let c = store.add_bed(rect(0.0, 0.0, 50.0, 50.0).with_id(a.clone())).id.clone();
        assert!(a.starts_with("bed-"));
        assert_ne!(a, b);
        assert_ne!(a, c, "a taken id is re-issued");
        assert_eq!(store.beds().len(), 3);
    }

    #[test]
    fn test_add_bed_keeps_supplied_id() {
        let mut store = LayoutStore::new();
        assert_eq!(store.add_bed(rect(0.0, 0.0, 50.0, 50.0).with_id("north")).id, "north");
    }

    #[test]
    fn test_update_unknown_bed() {
        let mut store = LayoutStore::new();
        let err = store.update_bed(rect(0.0, 0.0, 1.0, 1.0).with_id("nope")).unwrap_err();
        assert_eq!(err, StoreError::BedNotFound("nope".into()));
    }

    #[test]
    fn test_delete_bed_detaches_all_plants() {
        let mut store = LayoutStore::new();
        let bed = store.add_bed(rect(0.0, 0.0, 100.0, 100.0).with_id("b")).id.clone();
        store.add_bed(rect(200.0, 0.0, 100.0, 100.0).with_id("other"));
        for x in [10.0, 20.0, 30.0] {
            store.add_placed_plant(plant_at(x, 10.0).in_bed(bed.clone()));
        }
        store.add_placed_plant(plant_at(250.0, 10.0).in_bed("other"));

        store.delete_bed(&bed).unwrap();

        assert_eq!(store.placed_plants().len(), 4, "plants are not deleted");
        assert_eq!(store.plants_in_bed("b").count(), 0);
        assert_eq!(store.plants_in_bed("other").count(), 1);
    }

    #[test]
    fn test_dangling_bed_reference_is_cleared() {
        let mut store = LayoutStore::new();
        let p = store.add_placed_plant(plant_at(0.0, 0.0).in_bed("ghost"));
        assert_eq!(p.bed_id, None);
    }

    #[test]
    fn test_find_bed_prefers_topmost() {
        let mut store = LayoutStore::new();
        store.add_bed(rect(0.0, 0.0, 100.0, 100.0).with_id("bottom"));
        store.add_bed(rect(50.0, 50.0, 100.0, 100.0).with_id("top"));
        assert_eq!(store.find_bed_at_point(Point::new(75.0, 75.0)), Some("top"));
        assert_eq!(store.find_bed_at_point(Point::new(25.0, 25.0)), Some("bottom"));
        assert_eq!(store.find_bed_at_point(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_move_plant_recomputes_membership() {
        let mut store = LayoutStore::new();
        store.add_bed(rect(0.0, 0.0, 100.0, 100.0).with_id("b"));
        let id = store.add_placed_plant(plant_at(500.0, 500.0)).id.clone();
        assert_eq!(store.move_placed_plant(&id, Point::new(50.0, 50.0)).unwrap().bed_id.as_deref(), Some("b"));
        assert_eq!(store.move_placed_plant(&id, Point::new(150.0, 50.0)).unwrap().bed_id, None);
    }

    #[test]
    fn test_move_bed_translates_and_rebinds() {
        let mut store = LayoutStore::new();
        store.add_bed(rect(0.0, 0.0, 100.0, 100.0).with_id("b"));
        let inside = store.add_placed_plant(plant_at(50.0, 50.0).in_bed("b")).id.clone();
        let outside = store.add_placed_plant(plant_at(250.0, 50.0)).id.clone();

        store.move_bed("b", 200.0, 0.0).unwrap();

        assert_eq!(
            store.bed("b").unwrap().shape,
            Shape::Rectangle { x: 200.0, y: 0.0, width: 100.0, height: 100.0 }
        );
        assert_eq!(store.placed_plant(&inside).unwrap().bed_id, None);
        assert_eq!(store.placed_plant(&outside).unwrap().bed_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_update_bed_details() {
        let mut store = LayoutStore::new();
        store.add_bed(rect(0.0, 0.0, 100.0, 100.0).with_id("b"));
        let details = BedDetails { name: Some("Tomatoes".into()), soil_type: Some("Loamy".into()), ..Default::default() };
        let bed = store.update_bed_details("b", &details).unwrap();
        assert_eq!(bed.name.as_deref(), Some("Tomatoes"));
        assert_eq!(bed.soil_type.as_deref(), Some("Loamy"));
    }

    #[test]
    fn test_delete_plant() {
        let mut store = LayoutStore::new();
        let id = store.add_placed_plant(plant_at(0.0, 0.0)).id.clone();
        store.delete_placed_plant(&id).unwrap();
        assert!(store.placed_plants().is_empty());
        assert!(matches!(store.delete_placed_plant(&id), Err(StoreError::PlantNotFound(_))));
    }

    #[test]
    fn test_update_placed_plant_replaces_by_id() {
        let mut store = LayoutStore::new();
        store.add_bed(rect(0.0, 0.0, 100.0, 100.0).with_id("b"));
        store.add_placed_plant(plant_at(10.0, 10.0).with_id("p").in_bed("b"));
        store.add_placed_plant(plant_at(20.0, 20.0).with_id("q"));

        let updated = store
            .update_placed_plant(PlacedPlant::new(7, Point::new(40.0, 60.0)).with_id("p").in_bed("b"))
            .unwrap();
        assert_eq!(updated.plant_id, 7);
        assert_eq!(updated.position(), Point::new(40.0, 60.0));
        assert_eq!(updated.bed_id.as_deref(), Some("b"));
        assert_eq!(store.placed_plants().len(), 2);
        assert_eq!(store.placed_plants()[0].id, "p", "order is kept");
        assert_eq!(store.placed_plant("q").unwrap().position(), Point::new(20.0, 20.0));
    }

    #[test]
    fn test_update_placed_plant_clears_dangling_bed() {
        let mut store = LayoutStore::new();
        store.add_placed_plant(plant_at(10.0, 10.0).with_id("p"));
        let updated = store.update_placed_plant(plant_at(10.0, 10.0).with_id("p").in_bed("ghost")).unwrap();
        assert_eq!(updated.bed_id, None);
    }

    #[test]
    fn test_update_unknown_placed_plant() {
        let mut store = LayoutStore::new();
        store.add_placed_plant(plant_at(10.0, 10.0).with_id("p"));
        let err = store.update_placed_plant(plant_at(0.0, 0.0).with_id("missing")).unwrap_err();
        assert_eq!(err, StoreError::PlantNotFound("missing".into()));
        assert_eq!(store.placed_plants().len(), 1);
    }

    #[test]
    fn test_from_parts_round_trip() {
        let mut store = LayoutStore::new();
        store.add_bed(rect(0.0, 0.0, 100.0, 100.0).with_id("b"));
        store.add_placed_plant(plant_at(10.0, 10.0).with_id("p").in_bed("b"));
        let (beds, plants) = store.to_parts();
        assert_eq!(LayoutStore::from_parts(beds, plants), store);
    }
}
