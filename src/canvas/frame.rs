//! Render description of one canvas frame, in canvas coordinates.
//!
//! A frame is plain data; whatever draws it applies the frame's `scale` and
//! `pan` as a single transform.

use serde::Serialize;

use crate::logic::geometry::Bounds;
use crate::models::{bed::Shape, companion::LineClass, Point};

pub const SELECTED_BED_STROKE: &str = "#FF9800";
pub const SELECTED_STROKE_WIDTH: f64 = 3.0;
pub const BED_STROKE_WIDTH: f64 = 2.0;
pub const GRID_COLOR: &str = "#E0E0E0";
pub const DASH: [f64; 2] = [5.0, 5.0];
pub const DROP_PREVIEW_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeOutline {
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64 },
    Polyline { points: Vec<f64>, closed: bool },
}

/// Drawable outline of a bed shape. Polygons are closed.
pub fn outline(shape: &Shape) -> ShapeOutline {
    match shape {
        Shape::Rectangle { x, y, width, height } => {
            ShapeOutline::Rect { x: *x, y: *y, width: *width, height: *height }
        }
        Shape::Circle { x, y, radius } => ShapeOutline::Circle { x: *x, y: *y, radius: *radius },
        Shape::Polygon { points } => ShapeOutline::Polyline { points: points.clone(), closed: true },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Vertical then horizontal lines every `size` units covering `region`.
pub fn grid_lines(region: Bounds, size: f64) -> Vec<Segment> {
    if size.is_nan() || size <= 0.0 || region.width <= 0.0 || region.height <= 0.0 {
        return vec![];
    }
    let mut lines = Vec::new();
    let mut x = (region.x / size).floor() * size;
    while x <= region.right() {
        lines.push(Segment { from: Point::new(x, region.y), to: Point::new(x, region.bottom()) });
        x += size;
    }
    let mut y = (region.y / size).floor() * size;
    while y <= region.bottom() {
        lines.push(Segment { from: Point::new(region.x, y), to: Point::new(region.right(), y) });
        y += size;
    }
    lines
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedSprite {
    pub bed_id: String,
    pub outline: ShapeOutline,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub selected: bool,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSprite {
    pub plant_a_id: String,
    pub plant_b_id: String,
    pub from: Point,
    pub to: Point,
    pub class: LineClass,
    pub color: &'static str,
    /// Legend text for the class.
    pub label: &'static str,
    pub dash: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSprite {
    pub id: String,
    pub plant_id: u32,
    pub center: Point,
    pub radius: f64,
    pub color: String,
    pub icon: String,
    /// Worst class among the plant's companion lines.
    pub indicator: Option<LineClass>,
    pub ring_color: Option<&'static str>,
    pub selected: bool,
}

/// Dashed outline of the gesture in progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSprite {
    pub outline: ShapeOutline,
    pub stroke: String,
    pub dash: [f64; 2],
}

/// Translucent marker under a plant dragged in from the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPreview {
    pub plant_id: u32,
    pub center: Point,
    pub radius: f64,
    pub color: String,
    pub opacity: f64,
}

/// Everything on screen, back to front: grid, beds, lines, plants, previews.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub scale: f64,
    pub pan: Point,
    pub grid: Vec<Segment>,
    pub beds: Vec<BedSprite>,
    pub lines: Vec<LineSprite>,
    pub plants: Vec<PlantSprite>,
    pub preview: Option<PreviewSprite>,
    pub drop_preview: Option<DropPreview>,
}

impl Frame {
    pub fn bed(&self, id: &str) -> Option<&BedSprite> {
        self.beds.iter().find(|b| b.bed_id == id)
    }

    pub fn plant(&self, id: &str) -> Option<&PlantSprite> {
        self.plants.iter().find(|p| p.id == id)
    }
}
