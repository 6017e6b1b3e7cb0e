//! Interaction layer of the planning canvas: screen/canvas transform, event
//! routing, and the description of what to draw.

pub mod controller;
pub mod frame;
pub mod viewport;

pub use controller::{CanvasController, Notification, NotificationKind, Selection};
pub use frame::Frame;
pub use viewport::{Viewport, ZoomLimits};
