use crate::logic::geometry::Bounds;
use crate::models::Point;

/// Allowed scale range and the increment of one zoom step.
///
/// Always `0 < min <= max` with a positive step; build custom limits with
/// [`ZoomLimits::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
    step: f64,
}

impl ZoomLimits {
    /// Drawing canvas: 0.5x to 3.0x.
    pub const CANVAS: Self = Self { min: 0.5, max: 3.0, step: 0.1 };
    /// Planner screen: 50% to 200% in 10% steps.
    pub const PLANNER: Self = Self { min: 0.5, max: 2.0, step: 0.1 };

    /// `None` unless every value is finite, `min` is positive, `min <= max`
    /// and `step` is positive.
    pub fn new(min: f64, max: f64, step: f64) -> Option<Self> {
        let finite = min.is_finite() && max.is_finite() && step.is_finite();
        (finite && min > 0.0 && min <= max && step > 0.0).then_some(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self::CANVAS
    }
}

/// Pan/zoom transform between screen pixels and canvas space:
/// `screen = canvas * scale + pan`.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f64,
    pan: Point,
    width: f64,
    height: f64,
    limits: ZoomLimits,
}

impl Viewport {
    pub fn new(width: f64, height: f64, limits: ZoomLimits) -> Self {
        Self {
            scale: limits.clamp(1.0),
            pan: Point::default(),
            width: width.max(0.0),
            height: height.max(0.0),
            limits,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new((screen.x - self.pan.x) / self.scale, (screen.y - self.pan.y) / self.scale)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(canvas.x * self.scale + self.pan.x, canvas.y * self.scale + self.pan.y)
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_scale(self.scale + self.limits.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_scale(self.scale - self.limits.step)
    }

    /// Sets the scale, rounded to hundredths and clamped to the limits.
    /// Non-finite values are ignored. Returns the resulting scale.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        if scale.is_finite() {
            self.scale = self.limits.clamp((scale * 100.0).round() / 100.0);
        }
        self.scale
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan.offset(dx, dy);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// The part of canvas space currently on screen.
    pub fn visible_region(&self) -> Bounds {
        let origin = self.screen_to_canvas(Point::default());
        Bounds {
            x: origin.x,
            y: origin.y,
            width: self.width / self.scale,
            height: self.height / self.scale,
        }
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}
