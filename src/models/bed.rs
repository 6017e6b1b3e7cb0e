use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// Geometry of a garden bed. Serialised with a `shape` discriminator and
/// the variant's fields inline, e.g.
/// `{"shape": "circle", "x": 10, "y": 10, "radius": 40}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle with a top-left origin.
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Circle around `(x, y)`.
    Circle { x: f64, y: f64, radius: f64 },
    /// Freeform outline as a flat `[x0, y0, x1, y1, ...]` list, implicitly closed.
    Polygon { points: Vec<f64> },
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rectangle { .. } => "rectangle",
            Shape::Circle { .. } => "circle",
            Shape::Polygon { .. } => "polygon",
        }
    }
}

/// A user-drawn planting area.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenBed {
    /// Empty when the bed has not been stored yet.
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub shape: Shape,
    pub fill: String,
    pub stroke: String,
    pub name: Option<String>,
    pub sun_exposure: Option<String>,
    pub soil_type: Option<String>,
    pub notes: Option<String>,
}

impl GardenBed {
    /// A bed without an id or descriptors; the layout store assigns the id.
    pub fn new(shape: Shape, fill: impl Into<String>, stroke: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            shape,
            fill: fill.into(),
            stroke: stroke.into(),
            name: None,
            sun_exposure: None,
            soil_type: None,
            notes: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Applies every field set in `details`, leaving the others untouched.
    pub fn apply_details(&mut self, details: &BedDetails) {
        if let Some(name) = &details.name {
            self.name = Some(name.clone());
        }
        if let Some(sun) = &details.sun_exposure {
            self.sun_exposure = Some(sun.clone());
        }
        if let Some(soil) = &details.soil_type {
            self.soil_type = Some(soil.clone());
        }
        if let Some(notes) = &details.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(fill) = &details.fill {
            self.fill = fill.clone();
        }
        if let Some(stroke) = &details.stroke {
            self.stroke = stroke.clone();
        }
    }
}

/// Attribute edits from the bed info panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedDetails {
    pub name: Option<String>,
    pub sun_exposure: Option<String>,
    pub soil_type: Option<String>,
    pub notes: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bed_serialises_shape_inline() {
        let bed = GardenBed::new(
            Shape::Rectangle { x: 0.0, y: 10.0, width: 100.0, height: 50.0 },
            "#3E2723",
            "#4CAF50",
        )
        .with_id("bed-1");
        let json = serde_json::to_value(&bed).unwrap();
        assert_eq!(json["shape"], "rectangle");
        assert_eq!(json["width"], 100.0);
        assert_eq!(json["id"], "bed-1");
        assert!(json.get("name").is_none(), "unset descriptors must be omitted");
    }

    #[test]
    fn test_bed_deserialises_integer_coordinates() {
        let json = serde_json::json!({
            "id": "c",
            "shape": "circle",
            "x": 5,
            "y": 6,
            "radius": 40,
            "fill": "#000",
            "stroke": "#fff",
            "sunExposure": "Full sun"
        });
        let bed: GardenBed = serde_json::from_value(json).unwrap();
        assert_eq!(bed.shape, Shape::Circle { x: 5.0, y: 6.0, radius: 40.0 });
        assert_eq!(bed.sun_exposure.as_deref(), Some("Full sun"));
    }

    #[test]
    fn test_apply_details_keeps_unset_fields() {
        let mut bed = GardenBed::new(Shape::Circle { x: 0.0, y: 0.0, radius: 30.0 }, "#111", "#222")
            .with_name("Herbs");
        bed.apply_details(&BedDetails {
            notes: Some("Water twice a week".into()),
            ..Default::default()
        });
        assert_eq!(bed.name.as_deref(), Some("Herbs"));
        assert_eq!(bed.notes.as_deref(), Some("Water twice a week"));
        assert_eq!(bed.fill, "#111");
    }
}
