use std::collections::HashMap;

use crate::logic::geometry::distance;
use crate::models::{
    companion::{
        CompanionLine, CompanionRelationship, Compatibility, CompatibilityMatrix, LineClass,
    },
    plant::{PlacedPlant, Plant},
};

/// Plants closer than this are good neighbours.
pub const GOOD_DISTANCE_PX: f64 = 70.0;
/// Plants up to this far apart are a warning; beyond it, bad.
pub const WARNING_DISTANCE_PX: f64 = 150.0;
/// The info-panel chart shows at most this many plants.
pub const CHART_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityThresholds {
    pub good: f64,
    pub warning: f64,
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        Self { good: GOOD_DISTANCE_PX, warning: WARNING_DISTANCE_PX }
    }
}

/// `< good` is good, `good..=warning` is a warning, anything farther is bad.
pub fn classify_distance(distance: f64, thresholds: ProximityThresholds) -> LineClass {
    if distance < thresholds.good {
        LineClass::Good
    } else if distance <= thresholds.warning {
        LineClass::Warning
    } else {
        LineClass::Bad
    }
}

/// One line per unordered pair of plants sharing a bed, in placement order.
///
/// Recomputed from scratch on every change. This is quadratic in the number
/// of plants, which is fine for gardens of a few dozen plants.
pub fn proximity_lines(plants: &[PlacedPlant], thresholds: ProximityThresholds) -> Vec<CompanionLine> {
    let mut lines = Vec::new();
    for (i, a) in plants.iter().enumerate() {
        let Some(bed) = a.bed_id.as_deref().filter(|b| !b.is_empty()) else {
            continue;
        };
        for b in &plants[i + 1..] {
            if b.bed_id.as_deref() != Some(bed) {
                continue;
            }
            lines.push(CompanionLine {
                plant_a_id: a.id.clone(),
                plant_b_id: b.id.clone(),
                class: classify_distance(distance(a.position(), b.position()), thresholds),
            });
        }
    }
    lines
}

/// Worst class among the lines touching each plant (`bad > warning > good`).
/// Plants without lines are absent from the map.
pub fn plant_indicators(lines: &[CompanionLine]) -> HashMap<String, LineClass> {
    let mut worst: HashMap<String, LineClass> = HashMap::new();
    for line in lines {
        for id in [&line.plant_a_id, &line.plant_b_id] {
            worst
                .entry(id.clone())
                .and_modify(|c| *c = (*c).max(line.class))
                .or_insert(line.class);
        }
    }
    worst
}

/// Chart classification of two catalog plants. Good wins over poor when a
/// pair is listed both ways.
pub fn catalog_compatibility(a: &Plant, b: &Plant) -> Compatibility {
    if a.name == b.name {
        return Compatibility::Fair;
    }
    let lists = |p: &Plant, other: &str| {
        (
            p.good_companions.iter().any(|c| c == other),
            p.bad_companions.iter().any(|c| c == other),
        )
    };
    let (a_good, a_bad) = lists(a, &b.name);
    let (b_good, b_bad) = lists(b, &a.name);
    if a_good || b_good {
        Compatibility::Good
    } else if a_bad || b_bad {
        Compatibility::Poor
    } else {
        Compatibility::Fair
    }
}

/// Looks both plants up by name; unknown names are fair.
pub fn compatibility_by_name(catalog: &[Plant], a: &str, b: &str) -> Compatibility {
    match (
        catalog.iter().find(|p| p.name == a),
        catalog.iter().find(|p| p.name == b),
    ) {
        (Some(pa), Some(pb)) => catalog_compatibility(pa, pb),
        _ => Compatibility::Fair,
    }
}

/// The curated edge between two plants, in either direction.
pub fn relationship_between(
    relationships: &[CompanionRelationship],
    a: u32,
    b: u32,
) -> Option<&CompanionRelationship> {
    relationships.iter().find(|r| {
        (r.plant_id == a && r.companion_id == b) || (r.plant_id == b && r.companion_id == a)
    })
}

/// Full chart over `plants`, deduplicated by name in first-seen order.
pub fn compatibility_matrix(plants: &[Plant]) -> CompatibilityMatrix {
    let mut unique: Vec<&Plant> = Vec::new();
    for plant in plants {
        if !unique.iter().any(|p| p.name == plant.name) {
            unique.push(plant);
        }
    }
    CompatibilityMatrix {
        plants: unique.iter().map(|p| p.name.clone()).collect(),
        rows: unique
            .iter()
            .map(|row| unique.iter().map(|col| catalog_compatibility(row, col)).collect())
            .collect(),
    }
}

/// The info-panel chart: like [`compatibility_matrix`] but capped at
/// [`CHART_LIMIT`] distinct plants.
pub fn compatibility_chart(plants: &[Plant]) -> CompatibilityMatrix {
    let mut matrix = compatibility_matrix(plants);
    matrix.plants.truncate(CHART_LIMIT);
    matrix.rows.truncate(CHART_LIMIT);
    for row in &mut matrix.rows {
        row.truncate(CHART_LIMIT);
    }
    matrix
}

impl LineClass {
    pub fn color(self) -> &'static str {
        match self {
            LineClass::Good => "#43A047",
            LineClass::Warning => "#FFC107",
            LineClass::Bad => "#E53935",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineClass::Good => "Good Companions",
            LineClass::Warning => "Neutral Companions",
            LineClass::Bad => "Bad Companions",
        }
    }
}
