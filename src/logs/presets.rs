use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FoodPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub kcal_per_100g: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActivityPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub kcal_per_kg_per_hour: f64,
}

pub const FOOD_PRESETS: &[FoodPreset] = &[
    FoodPreset { id: "kibble_standard", label: "Kibble (standard)", kcal_per_100g: 360.0 },
    FoodPreset { id: "kibble_light", label: "Kibble (light)", kcal_per_100g: 310.0 },
    FoodPreset { id: "wet_standard", label: "Wet food (standard)", kcal_per_100g: 110.0 },
    FoodPreset { id: "treats", label: "Treats / biscuits", kcal_per_100g: 420.0 },
    FoodPreset { id: "chicken", label: "Chicken (cooked)", kcal_per_100g: 165.0 },
    FoodPreset { id: "rice", label: "Rice (cooked)", kcal_per_100g: 130.0 },
];

pub const ACTIVITY_PRESETS: &[ActivityPreset] = &[
    ActivityPreset { id: "walk_normal", label: "Walk (normal)", kcal_per_kg_per_hour: 2.0 },
    ActivityPreset { id: "walk_fast", label: "Walk (brisk)", kcal_per_kg_per_hour: 2.6 },
    ActivityPreset { id: "play_active", label: "Play (active)", kcal_per_kg_per_hour: 3.6 },
    ActivityPreset { id: "run_easy", label: "Run (easy)", kcal_per_kg_per_hour: 4.2 },
    ActivityPreset { id: "fetch", label: "Fetch / ball", kcal_per_kg_per_hour: 3.8 },
];

pub fn food_preset(id: &str) -> Option<&'static FoodPreset> {
    FOOD_PRESETS.iter().find(|p| p.id == id)
}

pub fn activity_preset(id: &str) -> Option<&'static ActivityPreset> {
    ACTIVITY_PRESETS.iter().find(|p| p.id == id)
}
