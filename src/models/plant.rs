use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::models::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Herb,
    Flower,
    Fruit,
}

/// Catalog entry. Companion lists hold plant *names*, as shown in the
/// compatibility chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: u32,
    pub name: String,
    pub category: Category,
    /// Icon identifier drawn inside the plant marker (`circle`, `leaf`, `triangle`, ...).
    pub icon: String,
    pub color: String,
    pub growing_info: String,
    pub sun_requirement: String,
    pub water_needs: String,
    pub spacing_cm: u32,
    pub harvest_time: String,
    pub good_companions: Vec<String>,
    pub bad_companions: Vec<String>,
}

/// An instance of a catalog plant on the canvas.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlant {
    /// Empty when the plant has not been stored yet.
    #[serde(default)]
    pub id: String,
    pub plant_id: u32,
    pub x: f64,
    pub y: f64,
    pub bed_id: Option<String>,
}

impl PlacedPlant {
    pub fn new(plant_id: u32, position: Point) -> Self {
        Self {
            id: String::new(),
            plant_id,
            x: position.x,
            y: position.y,
            bed_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn in_bed(mut self, bed_id: impl Into<String>) -> Self {
        self.bed_id = Some(bed_id.into());
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placed_plant_uses_camel_case() {
        let plant = PlacedPlant::new(3, Point::new(10.0, 20.0)).with_id("p1").in_bed("b1");
        let json = serde_json::to_value(&plant).unwrap();
        assert_eq!(json["plantId"], 3);
        assert_eq!(json["bedId"], "b1");
    }

    #[test]
    fn test_unbedded_plant_omits_bed_id() {
        let plant = PlacedPlant::new(3, Point::new(10.0, 20.0)).with_id("p1");
        let json = serde_json::to_value(&plant).unwrap();
        assert!(json.get("bedId").is_none());
    }
}
