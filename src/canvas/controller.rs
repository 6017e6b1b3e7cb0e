//! Routes pointer, library and toolbar events to the drawing machine and the
//! layout store, and reports save/load outcomes.
//!
//! Positions handed to the controller are screen pixels; they are converted
//! to canvas space with the current viewport before anything else sees them.

use log::{debug, info, warn};

use crate::canvas::frame::{
    self, BedSprite, DropPreview, Frame, LineSprite, PlantSprite, PreviewSprite, ShapeOutline,
    BED_STROKE_WIDTH, DASH, DROP_PREVIEW_OPACITY, SELECTED_BED_STROKE, SELECTED_STROKE_WIDTH,
};
use crate::canvas::viewport::Viewport;
use crate::config::CanvasConfig;
use crate::error::{BackendError, StoreError};
use crate::logic::{
    companion::{compatibility_chart, plant_indicators, proximity_lines},
    drawing::{DrawingMachine, Tool},
    geometry::distance,
    layout_store::LayoutStore,
};
use crate::models::{
    bed::{BedDetails, GardenBed},
    companion::{CompanionLine, CompatibilityMatrix},
    layout::{GardenLayout, LayoutPayload},
    plant::{PlacedPlant, Plant},
    Point,
};

const FALLBACK_PLANT_COLOR: &str = "#4CAF50";
const FALLBACK_PLANT_ICON: &str = "circle";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Bed(String),
    Plant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// One-shot message for the user, e.g. the outcome of a save.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind, title: title.into(), message: message.into() }
    }
}

/// Colours given to newly drawn beds.
#[derive(Debug, Clone, PartialEq)]
pub struct BedStyle {
    pub fill: String,
    pub stroke: String,
}

/// Select-tool gesture in progress. Drags are only committed to the store
/// on pointer-up.
#[derive(Debug, Clone, PartialEq)]
enum Interaction {
    Idle,
    DragBed { id: String, start: Point, current: Point },
    /// `grab` is the plant position minus the pointer position at pointer-down.
    DragPlant { id: String, grab: Point, current: Point },
    Pan { last: Point },
}

pub struct CanvasController {
    config: CanvasConfig,
    viewport: Viewport,
    drawing: DrawingMachine,
    store: LayoutStore,
    catalog: Vec<Plant>,
    style: BedStyle,
    selection: Option<Selection>,
    interaction: Interaction,
    drop_preview: Option<(u32, Point)>,
    lines: Vec<CompanionLine>,
    notifications: Vec<Notification>,
    layout_id: Option<u64>,
    pending_save: Option<String>,
}

impl CanvasController {
    pub fn new(config: CanvasConfig, catalog: Vec<Plant>, width: f64, height: f64) -> Self {
        let style = BedStyle { fill: config.default_fill.clone(), stroke: config.default_stroke.clone() };
        Self {
            viewport: Viewport::new(width, height, config.zoom),
            config,
            drawing: DrawingMachine::new(),
            store: LayoutStore::new(),
            catalog,
            style,
            selection: None,
            interaction: Interaction::Idle,
            drop_preview: None,
            lines: vec![],
            notifications: vec![],
            layout_id: None,
            pending_save: None,
        }
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tool(&self) -> Tool {
        self.drawing.tool()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn lines(&self) -> &[CompanionLine] {
        &self.lines
    }

    pub fn catalog(&self) -> &[Plant] {
        &self.catalog
    }

    /// Info-panel chart over the distinct catalog plants on the canvas, in
    /// placement order.
    pub fn compatibility_chart(&self) -> CompatibilityMatrix {
        let placed: Vec<Plant> = self
            .store
            .placed_plants()
            .iter()
            .filter_map(|p| self.catalog_entry(p.plant_id).cloned())
            .collect();
        compatibility_chart(&placed)
    }

    /// Id of the layout last saved or loaded.
    pub fn layout_id(&self) -> Option<u64> {
        self.layout_id
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    // ----- tools and style -----

    pub fn set_tool(&mut self, tool: Tool) {
        self.interaction = Interaction::Idle;
        self.drawing.set_tool(tool);
    }

    pub fn set_bed_style(&mut self, fill: impl Into<String>, stroke: impl Into<String>) {
        self.style = BedStyle { fill: fill.into(), stroke: stroke.into() };
    }

    pub fn bed_style(&self) -> &BedStyle {
        &self.style
    }

    /// Escape: abandons a drawing gesture or an uncommitted drag.
    /// Returns whether anything was cancelled.
    pub fn cancel_gesture(&mut self) -> bool {
        let was_dragging = !matches!(self.interaction, Interaction::Idle);
        self.interaction = Interaction::Idle;
        self.drawing.cancel() || was_dragging
    }

    // ----- pointer events -----

    pub fn pointer_down(&mut self, screen: Point) {
        let pos = self.viewport.screen_to_canvas(screen);
        if self.drawing.tool().is_drawing_tool() {
            self.drawing.pointer_down(pos);
            return;
        }

        if let Some(plant) = self.plant_at(pos) {
            let grab = Point::new(plant.x - pos.x, plant.y - pos.y);
            let id = plant.id.clone();
            self.selection = Some(Selection::Plant(id.clone()));
            self.interaction = Interaction::DragPlant { id, grab, current: pos };
        } else if let Some(bed_id) = self.store.find_bed_at_point(pos).map(str::to_string) {
            self.selection = Some(Selection::Bed(bed_id.clone()));
            self.interaction = Interaction::DragBed { id: bed_id, start: pos, current: pos };
        } else {
            self.selection = None;
            self.interaction = Interaction::Pan { last: screen };
        }
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let pos = self.viewport.screen_to_canvas(screen);
        if self.drawing.is_drawing() {
            self.drawing.pointer_move(pos);
            return;
        }
        match &mut self.interaction {
            Interaction::Idle => {}
            Interaction::DragBed { current, .. } | Interaction::DragPlant { current, .. } => *current = pos,
            Interaction::Pan { last } => {
                let (dx, dy) = (screen.x - last.x, screen.y - last.y);
                *last = screen;
                self.viewport.pan_by(dx, dy);
            }
        }
    }

    /// Finishes the current gesture at `screen`. Returns the id of the bed a
    /// drawing gesture created, if any.
    pub fn pointer_up(&mut self, screen: Point) -> Option<String> {
        if self.drawing.is_drawing() {
            let pos = self.viewport.screen_to_canvas(screen);
            let min_size = self.config.min_bed_size_px / self.viewport.scale();
            let shape = self.drawing.pointer_up_at(pos, min_size)?;
            let bed = GardenBed::new(shape, self.style.fill.clone(), self.style.stroke.clone());
            return Some(self.store.add_bed(bed).id.clone());
        }

        self.pointer_move(screen);

        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::DragBed { id, start, current } => {
                let (dx, dy) = (current.x - start.x, current.y - start.y);
                if dx != 0.0 || dy != 0.0 {
                    self.commit(|store| store.move_bed(&id, dx, dy).map(|_| ()));
                }
            }
            Interaction::DragPlant { id, grab, current } => {
                let to = current.offset(grab.x, grab.y);
                self.commit(|store| store.move_placed_plant(&id, to).map(|_| ()));
            }
            Interaction::Idle | Interaction::Pan { .. } => {}
        }
        None
    }

    // ----- plant library drag and drop -----

    pub fn drag_over(&mut self, plant_id: u32, screen: Point) {
        self.drop_preview = Some((plant_id, self.viewport.screen_to_canvas(screen)));
    }

    pub fn cancel_library_drag(&mut self) {
        self.drop_preview = None;
    }

    /// Places a catalog plant at `screen`, inside the topmost bed under it
    /// if there is one. Returns the placed plant's id.
    pub fn drop_plant(&mut self, plant_id: u32, screen: Point) -> Result<String, StoreError> {
        self.drop_preview = None;
        if !self.catalog.iter().any(|p| p.id == plant_id) {
            warn!("Dropped unknown plant {plant_id}");
            return Err(StoreError::CatalogPlantNotFound(plant_id));
        }
        let pos = self.viewport.screen_to_canvas(screen);
        let mut plant = PlacedPlant::new(plant_id, pos);
        plant.bed_id = self.store.find_bed_at_point(pos).map(str::to_string);
        let id = self.store.add_placed_plant(plant).id.clone();
        self.refresh_lines();
        Ok(id)
    }

    // ----- edits -----

    /// Deletes whatever is selected. Returns false when nothing was.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection.clone() {
            Some(Selection::Bed(id)) => self.delete_bed(&id).is_ok(),
            Some(Selection::Plant(id)) => self.delete_plant(&id).is_ok(),
            None => false,
        }
    }

    /// Removes a bed; its plants stay on the canvas without a bed.
    pub fn delete_bed(&mut self, id: &str) -> Result<GardenBed, StoreError> {
        let bed = self.store.delete_bed(id)?;
        if self.selection == Some(Selection::Bed(id.to_string())) {
            self.selection = None;
        }
        self.refresh_lines();
        Ok(bed)
    }

    pub fn delete_plant(&mut self, id: &str) -> Result<PlacedPlant, StoreError> {
        let plant = self.store.delete_placed_plant(id)?;
        if self.selection == Some(Selection::Plant(id.to_string())) {
            self.selection = None;
        }
        self.refresh_lines();
        Ok(plant)
    }

    pub fn update_bed_details(&mut self, id: &str, details: &BedDetails) -> Result<(), StoreError> {
        self.store.update_bed_details(id, details).map(|_| ())
    }

    /// Removes every bed and plant.
    pub fn clear(&mut self) {
        self.store.clear();
        self.selection = None;
        self.interaction = Interaction::Idle;
        self.refresh_lines();
    }

    // ----- viewport -----

    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    // ----- save / load -----

    /// Snapshot of the canvas for `POST /api/garden-layouts`. Editing may
    /// continue while the request is in flight.
    pub fn begin_save(&mut self, name: &str) -> LayoutPayload {
        let (beds, plants) = self.store.to_parts();
        self.pending_save = Some(name.to_string());
        debug!("Saving '{name}' with {} beds and {} plants", beds.len(), plants.len());
        LayoutPayload { name: name.to_string(), beds, plants }
    }

    pub fn complete_save(&mut self, result: Result<GardenLayout, BackendError>) {
        let name = self.pending_save.take().unwrap_or_default();
        match result {
            Ok(layout) => {
                info!("Saved garden layout {} '{}'", layout.id, layout.name);
                self.layout_id = Some(layout.id);
                self.notify(NotificationKind::Success, "Garden saved", format!("'{}' was saved.", layout.name));
            }
            Err(e) => {
                warn!("Saving '{name}' failed: {e}");
                self.notify(NotificationKind::Error, "Error saving garden", e.to_string());
            }
        }
    }

    /// Applies the response of `GET /api/garden-layouts`: the most recent
    /// layout replaces the canvas. On failure the canvas is left as is.
    pub fn complete_load(&mut self, result: Result<Vec<GardenLayout>, BackendError>) {
        match result {
            Ok(layouts) => match layouts.into_iter().max_by_key(|l| l.id) {
                Some(layout) => self.load_layout(layout),
                None => self.notify(NotificationKind::Info, "No saved gardens", "There is no saved garden to load."),
            },
            Err(e) => {
                warn!("Loading gardens failed: {e}");
                self.notify(NotificationKind::Error, "Error loading garden", e.to_string());
            }
        }
    }

    /// Replaces the whole canvas with `layout`.
    pub fn load_layout(&mut self, layout: GardenLayout) {
        self.store = LayoutStore::from_parts(layout.beds, layout.plants);
        self.selection = None;
        self.interaction = Interaction::Idle;
        self.drawing.cancel();
        self.layout_id = Some(layout.id);
        self.refresh_lines();
        info!("Loaded garden layout {} '{}'", layout.id, layout.name);
        self.notify(NotificationKind::Success, "Garden loaded", format!("'{}' was loaded.", layout.name));
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ----- rendering -----

    pub fn render(&self) -> Frame {
        let indicators = plant_indicators(&self.lines);

        let beds = self
            .store
            .beds()
            .iter()
            .map(|bed| {
                let selected = self.selection == Some(Selection::Bed(bed.id.clone()));
                let shape = match &self.interaction {
                    Interaction::DragBed { id, start, current } if *id == bed.id => {
                        bed.shape.translated(current.x - start.x, current.y - start.y)
                    }
                    _ => bed.shape.clone(),
                };
                BedSprite {
                    bed_id: bed.id.clone(),
                    outline: frame::outline(&shape),
                    fill: bed.fill.clone(),
                    stroke: if selected { SELECTED_BED_STROKE.to_string() } else { bed.stroke.clone() },
                    stroke_width: if selected { SELECTED_STROKE_WIDTH } else { BED_STROKE_WIDTH },
                    selected,
                    label: bed.name.clone(),
                }
            })
            .collect();

        let lines = self
            .lines
            .iter()
            .filter_map(|line| {
                let a = self.store.placed_plant(&line.plant_a_id)?;
                let b = self.store.placed_plant(&line.plant_b_id)?;
                Some(LineSprite {
                    plant_a_id: line.plant_a_id.clone(),
                    plant_b_id: line.plant_b_id.clone(),
                    from: self.displayed_position(a),
                    to: self.displayed_position(b),
                    class: line.class,
                    color: line.class.color(),
                    label: line.class.label(),
                    dash: DASH,
                })
            })
            .collect();

        let plants = self
            .store
            .placed_plants()
            .iter()
            .map(|placed| {
                let entry = self.catalog_entry(placed.plant_id);
                let indicator = indicators.get(&placed.id).copied();
                PlantSprite {
                    id: placed.id.clone(),
                    plant_id: placed.plant_id,
                    center: self.displayed_position(placed),
                    radius: self.config.plant_radius,
                    color: entry.map_or(FALLBACK_PLANT_COLOR, |p| p.color.as_str()).to_string(),
                    icon: entry.map_or(FALLBACK_PLANT_ICON, |p| p.icon.as_str()).to_string(),
                    indicator,
                    ring_color: indicator.map(|c| c.color()),
                    selected: self.selection == Some(Selection::Plant(placed.id.clone())),
                }
            })
            .collect();

        let preview = self.drawing.preview().map(|preview| {
            let outline = match frame::outline(&preview.shape) {
                ShapeOutline::Polyline { points, .. } => ShapeOutline::Polyline { points, closed: preview.closed },
                other => other,
            };
            PreviewSprite { outline, stroke: self.style.stroke.clone(), dash: DASH }
        });

        let drop_preview = self.drop_preview.map(|(plant_id, center)| DropPreview {
            plant_id,
            center,
            radius: self.config.plant_radius,
            color: self
                .catalog_entry(plant_id)
                .map_or(FALLBACK_PLANT_COLOR, |p| p.color.as_str())
                .to_string(),
            opacity: DROP_PREVIEW_OPACITY,
        });

        Frame {
            scale: self.viewport.scale(),
            pan: self.viewport.pan(),
            grid: frame::grid_lines(self.viewport.visible_region(), self.config.grid_size),
            beds,
            lines,
            plants,
            preview,
            drop_preview,
        }
    }

    // ----- internals -----

    fn notify(&mut self, kind: NotificationKind, title: &str, message: impl Into<String>) {
        self.notifications.push(Notification::new(kind, title, message));
    }

    fn refresh_lines(&mut self) {
        self.lines = proximity_lines(self.store.placed_plants(), self.config.proximity);
    }

    /// Applies a store mutation triggered by a drag. A stale id only means
    /// the item went away mid-drag, so it is logged and dropped.
    fn commit(&mut self, apply: impl FnOnce(&mut LayoutStore) -> Result<(), StoreError>) {
        if let Err(e) = apply(&mut self.store) {
            debug!("Drag ignored: {e}");
        }
        self.refresh_lines();
    }

    fn catalog_entry(&self, plant_id: u32) -> Option<&Plant> {
        self.catalog.iter().find(|p| p.id == plant_id)
    }

    /// Topmost plant whose marker covers `pos`.
    fn plant_at(&self, pos: Point) -> Option<&PlacedPlant> {
        self.store
            .placed_plants()
            .iter()
            .rev()
            .find(|p| distance(p.position(), pos) <= self.config.plant_radius)
    }

    fn displayed_position(&self, plant: &PlacedPlant) -> Point {
        match &self.interaction {
            Interaction::DragPlant { id, grab, current } if *id == plant.id => current.offset(grab.x, grab.y),
            _ => plant.position(),
        }
    }
}
