//! Seed plant catalog and curated companion table.

use crate::models::{
    companion::{CompanionRelationship, Relationship},
    plant::{Category, Plant},
};

struct Seed {
    name: &'static str,
    category: Category,
    icon: &'static str,
    color: &'static str,
    growing_info: &'static str,
    sun: &'static str,
    water: &'static str,
    spacing_cm: u32,
    harvest_time: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        name: "Tomato",
        category: Category::Vegetable,
        icon: "circle",
        color: "#E53E3E",
        growing_info: "Full sun, water regularly, space 45-60 cm apart. Grows 1.2-1.8 m tall.",
        sun: "Full sun",
        water: "Regular",
        spacing_cm: 50,
        harvest_time: "70-85 days from transplant",
    },
    Seed {
        name: "Carrot",
        category: Category::Vegetable,
        icon: "line",
        color: "#ED8936",
        growing_info: "Full sun to partial shade, water consistently, space 5-8 cm apart.",
        sun: "Full sun to partial shade",
        water: "Consistent",
        spacing_cm: 6,
        harvest_time: "60-80 days from seed",
    },
    Seed {
        name: "Lettuce",
        category: Category::Vegetable,
        icon: "leaf",
        color: "#8BC34A",
        growing_info: "Partial shade, water regularly, space 15-20 cm apart.",
        sun: "Partial shade",
        water: "Regular",
        spacing_cm: 18,
        harvest_time: "45-60 days from seed",
    },
    Seed {
        name: "Cucumber",
        category: Category::Vegetable,
        icon: "rectangle",
        color: "#276749",
        growing_info: "Full sun, water deeply, space 90-150 cm apart for vining varieties.",
        sun: "Full sun",
        water: "Deep",
        spacing_cm: 100,
        harvest_time: "50-70 days from seed",
    },
    Seed {
        name: "Onion",
        category: Category::Vegetable,
        icon: "circle",
        color: "#B794F4",
        growing_info: "Full sun, regular water, space 10-12 cm apart.",
        sun: "Full sun",
        water: "Regular",
        spacing_cm: 11,
        harvest_time: "90-110 days from transplant",
    },
    Seed {
        name: "Bell Pepper",
        category: Category::Vegetable,
        icon: "square",
        color: "#C53030",
        growing_info: "Full sun, consistent moisture, space 45-60 cm apart.",
        sun: "Full sun",
        water: "Consistent",
        spacing_cm: 50,
        harvest_time: "60-90 days from transplant",
    },
    Seed {
        name: "Basil",
        category: Category::Herb,
        icon: "triangle",
        color: "#2F855A",
        growing_info: "Full sun, moderate water, space 30-45 cm apart.",
        sun: "Full sun",
        water: "Moderate",
        spacing_cm: 35,
        harvest_time: "30-60 days from seed for usable leaves",
    },
    Seed {
        name: "Mint",
        category: Category::Herb,
        icon: "triangle",
        color: "#38A169",
        growing_info: "Partial shade, regular water, grows aggressively - consider containers.",
        sun: "Partial shade",
        water: "Regular",
        spacing_cm: 45,
        harvest_time: "30 days from planting for usable leaves",
    },
    Seed {
        name: "Rosemary",
        category: Category::Herb,
        icon: "triangle",
        color: "#285E61",
        growing_info: "Full sun, well-drained soil, drought tolerant once established.",
        sun: "Full sun",
        water: "Low",
        spacing_cm: 60,
        harvest_time: "70-80 days from transplant for usable leaves",
    },
    Seed {
        name: "Thyme",
        category: Category::Herb,
        icon: "triangle",
        color: "#319795",
        growing_info: "Full sun, well-drained soil, drought tolerant.",
        sun: "Full sun",
        water: "Low",
        spacing_cm: 25,
        harvest_time: "40-60 days from planting for usable leaves",
    },
];

/// (plant, companion, relationship, notes) by catalog name.
const EDGES: &[(&str, &str, Relationship, &str)] = &[
    ("Tomato", "Basil", Relationship::Good, "Basil repels certain insects and can enhance tomato flavor."),
    ("Tomato", "Onion", Relationship::Good, "Onions help deter pests that affect tomatoes."),
    ("Tomato", "Thyme", Relationship::Good, "Thyme serves as a general pest deterrent."),
    ("Tomato", "Cucumber", Relationship::Bad, "Both are susceptible to similar diseases."),
    ("Tomato", "Bell Pepper", Relationship::Bad, "Both are vulnerable to the same pests and diseases."),
    ("Tomato", "Carrot", Relationship::Neutral, "No significant positive or negative effects."),
    ("Carrot", "Onion", Relationship::Bad, "Onions can inhibit carrot growth."),
    ("Carrot", "Rosemary", Relationship::Good, "Rosemary helps repel carrot flies."),
    ("Carrot", "Lettuce", Relationship::Good, "Good use of garden space with different root depths."),
    ("Cucumber", "Lettuce", Relationship::Good, "Lettuce provides ground cover for cucumber roots."),
    ("Cucumber", "Onion", Relationship::Bad, "Onions can inhibit cucumber growth."),
    ("Basil", "Bell Pepper", Relationship::Good, "Basil can enhance pepper growth and flavor."),
];

/// Catalog plants (ids from 1, in seed order) and the companion table.
/// Each plant's good/bad name lists mirror the table in both directions.
pub fn default_catalog() -> (Vec<Plant>, Vec<CompanionRelationship>) {
    let mut plants: Vec<Plant> = SEEDS
        .iter()
        .zip(1u32..)
        .map(|(seed, id)| Plant {
            id,
            name: seed.name.into(),
            category: seed.category,
            icon: seed.icon.into(),
            color: seed.color.into(),
            growing_info: seed.growing_info.into(),
            sun_requirement: seed.sun.into(),
            water_needs: seed.water.into(),
            spacing_cm: seed.spacing_cm,
            harvest_time: seed.harvest_time.into(),
            good_companions: vec![],
            bad_companions: vec![],
        })
        .collect();

    let id_of = |plants: &[Plant], name: &str| plants.iter().position(|p| p.name == name);

    let mut relationships = Vec::with_capacity(EDGES.len());
    for ((a, b, relationship, notes), id) in EDGES.iter().zip(1u32..) {
        let (Some(ai), Some(bi)) = (id_of(&plants, a), id_of(&plants, b)) else {
            continue;
        };
        match relationship {
            Relationship::Good => {
                plants[ai].good_companions.push(b.to_string());
                plants[bi].good_companions.push(a.to_string());
            }
            Relationship::Bad => {
                plants[ai].bad_companions.push(b.to_string());
                plants[bi].bad_companions.push(a.to_string());
            }
            Relationship::Neutral => {}
        }
        relationships.push(CompanionRelationship {
            id,
            plant_id: plants[ai].id,
            companion_id: plants[bi].id,
            compatibility: *relationship,
            notes: Some(notes.to_string()),
        });
    }

    (plants, relationships)
}

pub fn default_plants() -> Vec<Plant> {
    default_catalog().0
}

pub fn get_plant_by_name(name: &str) -> Option<Plant> {
    default_plants().into_iter().find(|p| p.name == name)
}
