//! Pointer gestures to bed shapes.
//!
//! The machine is either idle or tracking one gesture. It only proposes
//! shapes; storing them (and assigning ids) is the layout store's job.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::logic::geometry::{distance, normalize_rectangle};
use crate::models::{bed::Shape, Point};

/// Active input mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Rectangle,
    Circle,
    /// Closed freehand outline; the preview is drawn closed.
    Polygon,
    /// Same accumulation as `Polygon`, previewed as an open stroke.
    Freeform,
}

impl Tool {
    pub fn is_drawing_tool(self) -> bool {
        !matches!(self, Tool::Select)
    }
}

/// Geometry collected so far for the gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Rectangle and circle: only the anchor and the latest pointer position.
    Span { start: Point, current: Point },
    /// Polygon and freeform: every pointer position, flattened.
    Trace { points: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawingState {
    #[default]
    Idle,
    Drawing(Gesture),
}

/// Live outline of the gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub shape: Shape,
    pub closed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DrawingMachine {
    tool: Tool,
    state: DrawingState,
}

impl DrawingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing(_))
    }

    /// Switches tools. A gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.is_drawing() {
            debug!("Tool changed to {tool:?} mid-gesture, dropping gesture");
        }
        self.tool = tool;
        self.state = DrawingState::Idle;
    }

    /// Starts a gesture. Returns false when the select tool is active or a
    /// gesture is already running.
    pub fn pointer_down(&mut self, pos: Point) -> bool {
        if !self.tool.is_drawing_tool() || self.is_drawing() {
            return false;
        }
        let gesture = match self.tool {
            Tool::Rectangle | Tool::Circle => Gesture::Span { start: pos, current: pos },
            _ => Gesture::Trace { points: vec![pos.x, pos.y] },
        };
        self.state = DrawingState::Drawing(gesture);
        true
    }

    pub fn pointer_move(&mut self, pos: Point) {
        let DrawingState::Drawing(gesture) = &mut self.state else {
            return;
        };
        match gesture {
            Gesture::Span { current, .. } => *current = pos,
            Gesture::Trace { points } => {
                // A move that lands on the last vertex adds nothing.
                if points[points.len() - 2..] != [pos.x, pos.y] {
                    points.extend([pos.x, pos.y]);
                }
            }
        }
    }

    /// Ends the gesture and returns the shape when it passes the size check.
    /// Success or not, the machine goes back to idle with the select tool.
    pub fn pointer_up(&mut self, min_size: f64) -> Option<Shape> {
        let DrawingState::Drawing(gesture) = std::mem::take(&mut self.state) else {
            return None;
        };
        let tool = std::mem::replace(&mut self.tool, Tool::Select);

        let shape = match (tool, gesture) {
            (Tool::Rectangle, Gesture::Span { start, current }) => {
                normalize_rectangle(start, current).into_shape()
            }
            (Tool::Circle, Gesture::Span { start, current }) => Shape::Circle {
                x: start.x,
                y: start.y,
                radius: distance(start, current),
            },
            (_, Gesture::Trace { points }) => Shape::Polygon { points },
            (tool, gesture) => {
                debug!("Gesture {gesture:?} does not match tool {tool:?}, discarding");
                return None;
            }
        };

        if shape.meets_minimum_size(min_size) {
            Some(shape)
        } else {
            debug!("Discarding {} below minimum size {min_size}", shape.kind());
            None
        }
    }

    /// Ends the gesture with the pointer released at `pos`. The release only
    /// moves the far corner of a span; it never adds a trace vertex.
    pub fn pointer_up_at(&mut self, pos: Point, min_size: f64) -> Option<Shape> {
        if let DrawingState::Drawing(Gesture::Span { current, .. }) = &mut self.state {
            *current = pos;
        }
        self.pointer_up(min_size)
    }

    /// Abandons the gesture without emitting a shape (Escape).
    /// Returns whether a gesture was running.
    pub fn cancel(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        self.state = DrawingState::Idle;
        self.tool = Tool::Select;
        was_drawing
    }

    pub fn preview(&self) -> Option<Preview> {
        let DrawingState::Drawing(gesture) = &self.state else {
            return None;
        };
        let preview = match gesture {
            Gesture::Span { start, current } if self.tool == Tool::Circle => Preview {
                shape: Shape::Circle { x: start.x, y: start.y, radius: distance(*start, *current) },
                closed: true,
            },
            Gesture::Span { start, current } => Preview {
                shape: normalize_rectangle(*start, *current).into_shape(),
                closed: true,
            },
            Gesture::Trace { points } => Preview {
                shape: Shape::Polygon { points: points.clone() },
                closed: self.tool == Tool::Polygon,
            },
        };
        Some(preview)
    }
}
