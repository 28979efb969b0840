use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use super::errors::InvalidDish;

pub const NO_DESCRIPTION: &str = "No description available";

/// Threshold a mean flavor must strictly exceed to name the foodie type.
pub const FOODIE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Spicy,
    Sweet,
    Creamy,
}

impl Flavor {
    pub const ALL: [Flavor; 3] = [Flavor::Spicy, Flavor::Sweet, Flavor::Creamy];

    pub fn label(self) -> &'static str {
        match self {
            Flavor::Spicy => "Spicy",
            Flavor::Sweet => "Sweet",
            Flavor::Creamy => "Creamy",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlavorProfile {
    #[serde(default)]
    pub spicy: f64,
    #[serde(default)]
    pub sweet: f64,
    #[serde(default)]
    pub creamy: f64,
}

impl FlavorProfile {
    pub fn get(&self, flavor: Flavor) -> f64 {
        match flavor {
            Flavor::Spicy => self.spicy,
            Flavor::Sweet => self.sweet,
            Flavor::Creamy => self.creamy,
        }
    }

    /// Mean of every profile, `None` when there is nothing to average.
    pub fn mean<'a>(profiles: impl IntoIterator<Item = &'a FlavorProfile>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = FlavorProfile::default();

        for profile in profiles {
            sum.spicy += profile.spicy;
            sum.sweet += profile.sweet;
            sum.creamy += profile.creamy;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(FlavorProfile { spicy: sum.spicy / n, sweet: sum.sweet / n, creamy: sum.creamy / n })
    }

    pub fn rounded(&self) -> Self {
        let round2 = |value: f64| (value * 100.0).round() / 100.0;
        FlavorProfile {
            spicy: round2(self.spicy),
            sweet: round2(self.sweet),
            creamy: round2(self.creamy),
        }
    }
}

/// Whole-number percentage of a flavor intensity, clamped to `0..=100`.
pub fn percent(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    (value * 100.0).round().clamp(0.0, 100.0) as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    pub name: String,
    pub description: String,
    pub cuisine: Option<String>,
    pub tags: Vec<String>,
    pub flavor: FlavorProfile,
}

impl Dish {
    /// Builds a dish from a loosely typed server record.
    ///
    /// Only the name is mandatory. Anything else that is missing or has the
    /// wrong shape falls back to its default.
    pub fn from_value(value: &Value) -> Result<Self, InvalidDish> {
        let record = value.as_object().ok_or(InvalidDish::NotAnObject)?;

        let name = record
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .ok_or(InvalidDish::MissingName)?;

        let description = record
            .get("description")
            .and_then(Value::as_str)
            .filter(|description| !description.is_empty())
            .unwrap_or(NO_DESCRIPTION);

        let cuisine = record
            .get("cuisine")
            .and_then(Value::as_str)
            .filter(|cuisine| !cuisine.is_empty())
            .map(str::to_string);

        let tags = record
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();

        let number = |key: &str| record.get(key).and_then(Value::as_f64).unwrap_or(0.0);

        Ok(Dish {
            name: name.to_string(),
            description: description.to_string(),
            cuisine,
            tags,
            flavor: FlavorProfile {
                spicy: number("spicy"),
                sweet: number("sweet"),
                creamy: number("creamy"),
            },
        })
    }

    /// Parses a list of records, dropping the invalid ones.
    pub fn from_values(values: &[Value]) -> Vec<Self> {
        values.iter().filter_map(|value| Dish::from_value(value).ok()).collect()
    }

    pub fn has_valid_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodieType {
    SpiceLover,
    SweetTooth,
    CreamyConnoisseur,
    Balanced,
}

impl FoodieType {
    /// First flavor (spicy, sweet, creamy) strictly above the threshold wins.
    pub fn determine(metrics: &FlavorProfile) -> Self {
        if metrics.spicy > FOODIE_THRESHOLD {
            FoodieType::SpiceLover
        } else if metrics.sweet > FOODIE_THRESHOLD {
            FoodieType::SweetTooth
        } else if metrics.creamy > FOODIE_THRESHOLD {
            FoodieType::CreamyConnoisseur
        } else {
            FoodieType::Balanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FoodieType::SpiceLover => "Spice Lover",
            FoodieType::SweetTooth => "Sweet Tooth",
            FoodieType::CreamyConnoisseur => "Creamy Connoisseur",
            FoodieType::Balanced => "Balanced Foodie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TasteAnalysis {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub metrics: FlavorProfile,
    #[serde(default)]
    pub foodie_type: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
}

impl TasteAnalysis {
    /// Local analysis computed from the liked dishes alone.
    pub fn derive(liked: &[Dish]) -> Option<Self> {
        let mean = FlavorProfile::mean(liked.iter().map(|dish| &dish.flavor))?;
        let foodie_type = FoodieType::determine(&mean);

        let analysis = format!(
            "Based on your preferences, you seem to enjoy {} dishes. You tend to prefer dishes with {}% spiciness, {}% sweetness, and {}% creaminess.",
            foodie_type.label().to_lowercase(),
            percent(mean.spicy),
            percent(mean.sweet),
            percent(mean.creamy),
        );

        let mut cuisines: Vec<String> = Vec::new();
        for cuisine in liked.iter().filter_map(|dish| dish.cuisine.as_ref()) {
            if !cuisines.contains(cuisine) {
                cuisines.push(cuisine.clone());
            }
        }

        Some(TasteAnalysis {
            analysis,
            metrics: mean.rounded(),
            foodie_type: Some(foodie_type.label().to_string()),
            cuisines,
        })
    }

    pub fn foodie_label(&self) -> String {
        match &self.foodie_type {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => FoodieType::determine(&self.metrics).label().to_string(),
        }
    }
}

/// The user's verdict on the dish on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// Horizontal direction the card leaves in: right for accept.
    pub fn direction(self) -> f32 {
        match self {
            Decision::Accept => 1.0,
            Decision::Reject => -1.0,
        }
    }
}

/// Outcome of one request to the random dish endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum DishFetch {
    Dish(Dish),
    Exhausted,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    pub accepted: bool,
    pub message: Option<String>,
    pub recommendations: Option<Vec<Dish>>,
    pub analysis: Option<TasteAnalysis>,
}

impl Feedback {
    pub fn has_insights(&self) -> bool {
        self.accepted && (self.recommendations.is_some() || self.analysis.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub liked_dishes: Vec<Dish>,
    pub recommendations: Vec<Dish>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Confirmed,
    Declined(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_dish_defaults() {
        let dish = Dish::from_value(&json!({ "name": "Dal Makhani" })).unwrap();

        assert_eq!(dish.name, "Dal Makhani");
        assert_eq!(dish.description, NO_DESCRIPTION);
        assert!(dish.tags.is_empty());
        assert!(dish.cuisine.is_none());
        assert_eq!(dish.flavor, FlavorProfile::default());
    }

    #[test]
    fn test_dish_tolerates_wrong_shapes() {
        let dish = Dish::from_value(&json!({
            "name": "Mochi",
            "description": "",
            "tags": ["dessert", 4, null, "rice"],
            "spicy": "very",
            "sweet": 0.9,
            "creamy": null,
            "cuisine": "Japanese"
        }))
        .unwrap();

        assert_eq!(dish.description, NO_DESCRIPTION);
        assert_eq!(dish.tags, vec!["dessert".to_string(), "rice".to_string()]);
        assert_eq!(dish.flavor.spicy, 0.0);
        assert_eq!(dish.flavor.sweet, 0.9);
        assert_eq!(dish.flavor.creamy, 0.0);
        assert_eq!(dish.cuisine.as_deref(), Some("Japanese"));

        let tags_not_array = Dish::from_value(&json!({ "name": "Pho", "tags": "soup" })).unwrap();
        assert!(tags_not_array.tags.is_empty());
    }

    #[test]
    fn test_dish_requires_name() {
        assert_eq!(Dish::from_value(&json!({ "description": "x" })), Err(InvalidDish::MissingName));
        assert_eq!(Dish::from_value(&json!({ "name": "   " })), Err(InvalidDish::MissingName));
        assert_eq!(Dish::from_value(&json!({ "name": 12 })), Err(InvalidDish::MissingName));
        assert_eq!(Dish::from_value(&json!("Ramen")), Err(InvalidDish::NotAnObject));

        let parsed = Dish::from_values(&[json!({ "name": "A" }), json!({}), json!({ "name": "B" })]);
        let names: Vec<&str> = parsed.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(0.666), 67);
        assert_eq!(percent(1.4), 100);
        assert_eq!(percent(-0.2), 0);
        assert_eq!(percent(f64::NAN), 0);
    }

    #[test]
    fn test_foodie_type_thresholds() {
        let profile = |spicy, sweet, creamy| FlavorProfile { spicy, sweet, creamy };

        assert_eq!(FoodieType::determine(&profile(0.8, 0.9, 0.9)), FoodieType::SpiceLover);
        assert_eq!(FoodieType::determine(&profile(0.7, 0.71, 0.9)), FoodieType::SweetTooth);
        assert_eq!(FoodieType::determine(&profile(0.1, 0.7, 0.75)), FoodieType::CreamyConnoisseur);
        // Exactly at the threshold is not enough.
        assert_eq!(FoodieType::determine(&profile(0.7, 0.7, 0.7)), FoodieType::Balanced);
    }

    #[test]
    fn test_derive_analysis() {
        let liked = vec![
            Dish::from_value(&json!({ "name": "Vindaloo", "spicy": 0.9, "sweet": 0.1, "creamy": 0.2, "cuisine": "Indian" })).unwrap(),
            Dish::from_value(&json!({ "name": "Phaal", "spicy": 1.0, "sweet": 0.0, "creamy": 0.1, "cuisine": "Indian" })).unwrap(),
            Dish::from_value(&json!({ "name": "Mapo Tofu", "spicy": 0.8, "sweet": 0.2, "creamy": 0.3, "cuisine": "Chinese" })).unwrap(),
        ];

        let analysis = TasteAnalysis::derive(&liked).unwrap();

        assert_eq!(analysis.foodie_label(), "Spice Lover");
        assert_eq!(analysis.metrics.spicy, 0.9);
        assert_eq!(analysis.metrics.sweet, 0.1);
        assert_eq!(analysis.metrics.creamy, 0.2);
        assert_eq!(analysis.cuisines, vec!["Indian".to_string(), "Chinese".to_string()]);
        assert_eq!(
            analysis.analysis,
            "Based on your preferences, you seem to enjoy spice lover dishes. You tend to prefer dishes with 90% spiciness, 10% sweetness, and 20% creaminess."
        );

        assert!(TasteAnalysis::derive(&[]).is_none());
    }

    #[test]
    fn test_foodie_label_falls_back_to_metrics() {
        let analysis = TasteAnalysis {
            analysis: String::new(),
            metrics: FlavorProfile { spicy: 0.2, sweet: 0.85, creamy: 0.1 },
            foodie_type: None,
            cuisines: Vec::new(),
        };
        assert_eq!(analysis.foodie_label(), "Sweet Tooth");
    }
}
