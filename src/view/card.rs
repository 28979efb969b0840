use crate::core::models::{
    percent,
    Decision,
    Dish,
    Flavor,
};

pub const INVALID_DISH_MESSAGE: &str = "Invalid dish data. Please try again.";

/// Horizontal distance, in card widths, a card travels while leaving.
const EXIT_TRAVEL: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlavorBar {
    pub flavor: Flavor,
    pub percent: u32,
}

impl FlavorBar {
    pub fn new(flavor: Flavor, value: f64) -> Self {
        Self { flavor, percent: percent(value) }
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }

    pub fn width_fraction(&self) -> f32 {
        self.percent as f32 / 100.0
    }

    pub fn chip(&self) -> String {
        format!("{}: {}%", self.flavor.label(), self.percent)
    }
}

pub fn flavor_bars(dish: &Dish) -> [FlavorBar; 3] {
    Flavor::ALL.map(|flavor| FlavorBar::new(flavor, dish.flavor.get(flavor)))
}

/// Pose of the card on screen. `offset` is in card widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMotion {
    pub offset: f32,
    pub opacity: f32,
}

impl CardMotion {
    pub const REST: CardMotion = CardMotion { offset: 0.0, opacity: 1.0 };

    pub fn exiting(decision: Decision, progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        CardMotion {
            offset: decision.direction() * EXIT_TRAVEL * progress,
            opacity: 1.0 - progress,
        }
    }
}

impl Default for CardMotion {
    fn default() -> Self {
        Self::REST
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Bumped on every render so the GUI can drop per-card drag state.
    pub generation: u64,
    pub name: String,
    pub description: String,
    pub cuisine: Option<String>,
    pub tags: Vec<String>,
    pub flavors: [FlavorBar; 3],
    pub motion: CardMotion,
}

/// What the card area shows. Being one value, it can never hold two cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CardArea {
    #[default]
    Empty,
    Loading,
    Error(String),
    Card(CardView),
}

#[derive(Debug, Default)]
pub struct CardStack {
    area: CardArea,
    generation: u64,
}

impl CardStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the card area with a fresh card for `dish`.
    ///
    /// A nameless dish clears the area and shows the invalid-data error
    /// instead; returns whether a card was mounted.
    pub fn render(&mut self, dish: &Dish) -> bool {
        if !dish.has_valid_name() {
            self.show_error(INVALID_DISH_MESSAGE);
            return false;
        }

        self.generation += 1;
        self.area = CardArea::Card(CardView {
            generation: self.generation,
            name: dish.name.clone(),
            description: dish.description.clone(),
            cuisine: dish.cuisine.clone(),
            tags: dish.tags.clone(),
            flavors: flavor_bars(dish),
            motion: CardMotion::REST,
        });
        true
    }

    pub fn show_loading(&mut self) {
        self.area = CardArea::Loading;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.area = CardArea::Error(message.into());
    }

    pub fn clear(&mut self) {
        self.area = CardArea::Empty;
    }

    pub fn area(&self) -> &CardArea {
        &self.area
    }

    pub fn card(&self) -> Option<&CardView> {
        match &self.area {
            CardArea::Card(card) => Some(card),
            _ => None,
        }
    }

    /// No-op unless a card is mounted.
    pub fn set_motion(&mut self, motion: CardMotion) {
        if let CardArea::Card(card) = &mut self.area {
            card.motion = motion;
        }
    }
}
