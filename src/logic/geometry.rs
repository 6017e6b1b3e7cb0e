//! Hit-testing and measurement helpers for bed shapes.
//!
//! Everything here is pure. Coordinates are canvas space.

use crate::models::{bed::Shape, Point};

/// Axis-aligned box with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn into_shape(self) -> Shape {
        Shape::Rectangle { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Turns two arbitrary corners into a top-left box with non-negative size.
pub fn normalize_rectangle(p1: Point, p2: Point) -> Bounds {
    Bounds {
        x: p1.x.min(p2.x),
        y: p1.y.min(p2.y),
        width: (p2.x - p1.x).abs(),
        height: (p2.y - p1.y).abs(),
    }
}

/// Iterates the vertices of a flat `[x0, y0, x1, y1, ...]` list. A trailing
/// odd value is ignored.
pub fn vertices(points: &[f64]) -> impl Iterator<Item = Point> + '_ {
    points.chunks_exact(2).map(|c| Point::new(c[0], c[1]))
}

pub fn contains_point(shape: &Shape, point: Point) -> bool {
    match shape {
        Shape::Rectangle { x, y, width, height } => {
            point.x >= *x && point.x <= x + width && point.y >= *y && point.y <= y + height
        }
        Shape::Circle { x, y, radius } => {
            let dx = point.x - x;
            let dy = point.y - y;
            dx * dx + dy * dy <= radius * radius
        }
        Shape::Polygon { points } => polygon_contains(points, point),
    }
}

/// Even-odd ray casting towards +x.
fn polygon_contains(points: &[f64], point: Point) -> bool {
    let n = points.len() / 2;
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (points[2 * i], points[2 * i + 1]);
        let (xj, yj) = (points[2 * j], points[2 * j + 1]);
        // The straddle test is false for horizontal edges, so yj != yi below.
        if (yi > point.y) != (yj > point.y) {
            let crossing_x = xi + (point.y - yi) * (xj - xi) / (yj - yi);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Number of different vertices in a flat point list, counting at most `limit`.
fn distinct_vertices(points: &[f64], limit: usize) -> usize {
    let mut seen: Vec<Point> = Vec::with_capacity(limit);
    for p in vertices(points) {
        if seen.len() == limit {
            break;
        }
        if !seen.contains(&p) {
            seen.push(p);
        }
    }
    seen.len()
}

/// Rectangles need both sides above `threshold`, circles a radius above it.
/// Polygons only need three distinct vertices.
pub fn meets_minimum_size(shape: &Shape, threshold: f64) -> bool {
    match shape {
        Shape::Rectangle { width, height, .. } => *width > threshold && *height > threshold,
        Shape::Circle { radius, .. } => *radius > threshold,
        Shape::Polygon { points } => distinct_vertices(points, 3) == 3,
    }
}

pub fn translate(shape: &Shape, dx: f64, dy: f64) -> Shape {
    match shape {
        Shape::Rectangle { x, y, width, height } => Shape::Rectangle {
            x: x + dx,
            y: y + dy,
            width: *width,
            height: *height,
        },
        Shape::Circle { x, y, radius } => Shape::Circle { x: x + dx, y: y + dy, radius: *radius },
        Shape::Polygon { points } => Shape::Polygon {
            points: points
                .chunks_exact(2)
                .flat_map(|c| [c[0] + dx, c[1] + dy])
                .collect(),
        },
    }
}

pub fn bounds(shape: &Shape) -> Bounds {
    match shape {
        Shape::Rectangle { x, y, width, height } => {
            Bounds { x: *x, y: *y, width: *width, height: *height }
        }
        Shape::Circle { x, y, radius } => Bounds {
            x: x - radius,
            y: y - radius,
            width: radius * 2.0,
            height: radius * 2.0,
        },
        Shape::Polygon { points } => {
            let mut min_x = f64::INFINITY;
            let mut min_y = f64::INFINITY;
            let mut max_x = f64::NEG_INFINITY;
            let mut max_y = f64::NEG_INFINITY;
            for p in vertices(points) {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
            if min_x > max_x {
                return Bounds { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
            }
            Bounds { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y }
        }
    }
}

/// Structural problems that make a shape unstorable.
pub fn shape_errors(shape: &Shape) -> Vec<String> {
    let mut errors = Vec::new();
    match shape {
        Shape::Rectangle { x, y, width, height } => {
            if !x.is_finite() || !y.is_finite() {
                errors.push("rectangle origin must be finite.".to_string());
            }
            if !(width.is_finite() && *width > 0.0) || !(height.is_finite() && *height > 0.0) {
                errors.push("rectangle width and height must be positive.".to_string());
            }
        }
        Shape::Circle { x, y, radius } => {
            if !x.is_finite() || !y.is_finite() {
                errors.push("circle center must be finite.".to_string());
            }
            if !(radius.is_finite() && *radius > 0.0) {
                errors.push("circle radius must be positive.".to_string());
            }
        }
        Shape::Polygon { points } => {
            if points.len() % 2 != 0 {
                errors.push("polygon points must come in x/y pairs.".to_string());
            }
            if distinct_vertices(points, 3) < 3 {
                errors.push("polygon needs at least 3 distinct points.".to_string());
            }
            if points.iter().any(|v| !v.is_finite()) {
                errors.push("polygon points must be finite.".to_string());
            }
        }
    }
    errors
}

impl Shape {
    pub fn contains_point(&self, point: Point) -> bool {
        contains_point(self, point)
    }

    pub fn meets_minimum_size(&self, threshold: f64) -> bool {
        meets_minimum_size(self, threshold)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Shape {
        translate(self, dx, dy)
    }

    pub fn bounds(&self) -> Bounds {
        bounds(self)
    }
}
