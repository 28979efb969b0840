use tracing::warn;

use super::card::{
    flavor_bars,
    FlavorBar,
};
use crate::core::{
    errors::FetchError,
    models::{
        percent,
        Dish,
        Feedback,
        Flavor,
        FlavorProfile,
        Profile,
        TasteAnalysis,
    },
};

pub const NO_ANALYSIS_MESSAGE: &str =
    "No analysis available yet. Like more dishes to get your taste profile!";
pub const ANALYSIS_ERROR_MESSAGE: &str = "Error loading analysis. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub summary: String,
    pub foodie_type: String,
    pub foodie_tag: String,
    pub cuisines: Vec<String>,
    pub metrics: [FlavorBar; 3],
}

impl ProfileView {
    pub fn from_analysis(analysis: &TasteAnalysis) -> Self {
        Self {
            summary: analysis.analysis.clone(),
            foodie_type: analysis.foodie_label(),
            foodie_tag: foodie_tag(&analysis.metrics),
            cuisines: analysis.cuisines.clone(),
            metrics: Flavor::ALL.map(|flavor| FlavorBar::new(flavor, analysis.metrics.get(flavor))),
        }
    }
}

pub fn foodie_tag(metrics: &FlavorProfile) -> String {
    format!(
        "{}% Indian Spice Lover, {}% Sweet Tooth, {}% Creamy Connoisseur",
        percent(metrics.spicy),
        percent(metrics.sweet),
        percent(metrics.creamy)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationView {
    pub name: String,
    pub description: String,
    pub chips: [FlavorBar; 3],
}

impl RecommendationView {
    pub fn from_dish(dish: &Dish) -> Self {
        Self {
            name: dish.name.clone(),
            description: dish.description.clone(),
            chips: flavor_bars(dish),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisPanel {
    #[default]
    Hidden,
    Loading,
    NotEnoughData,
    Failed,
    Ready {
        profile: Option<ProfileView>,
        recommendations: Vec<RecommendationView>,
    },
}

/// Turns taste data into the analysis panel, either straight from a like
/// response or from a profile request.
#[derive(Debug, Default)]
pub struct AnalysisPresenter {
    panel: AnalysisPanel,
    open: bool,
    in_flight: bool,
}

impl AnalysisPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> &AnalysisPanel {
        &self.panel
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Shows insights that came back with a like. A response carrying only
    /// recommendations keeps the profile already on display.
    pub fn present_inline(&mut self, feedback: &Feedback) {
        if !feedback.has_insights() {
            return;
        }

        let previous = match &self.panel {
            AnalysisPanel::Ready { profile, .. } => profile.clone(),
            _ => None,
        };

        let profile = feedback.analysis.as_ref().map(ProfileView::from_analysis).or(previous);
        let recommendations = feedback
            .recommendations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(RecommendationView::from_dish)
            .collect();

        self.panel = AnalysisPanel::Ready { profile, recommendations };
        self.open = true;
    }

    /// Opens the panel in its loading state. Returns `false` when a profile
    /// request is already running and no new one should be made.
    pub fn begin_profile_load(&mut self) -> bool {
        self.open = true;
        if self.in_flight {
            return false;
        }

        self.in_flight = true;
        self.panel = AnalysisPanel::Loading;
        true
    }

    pub fn apply_profile(&mut self, result: Result<Profile, FetchError>) {
        self.in_flight = false;

        let profile = match result {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Error loading analysis: {e}");
                self.panel = AnalysisPanel::Failed;
                return;
            }
        };

        self.panel = match TasteAnalysis::derive(&profile.liked_dishes) {
            Some(analysis) => AnalysisPanel::Ready {
                profile: Some(ProfileView::from_analysis(&analysis)),
                recommendations: profile
                    .recommendations
                    .iter()
                    .map(RecommendationView::from_dish)
                    .collect(),
            },
            None => AnalysisPanel::NotEnoughData,
        };
    }

    /// The profile request died without an answer.
    pub fn fail(&mut self) {
        self.in_flight = false;
        self.panel = AnalysisPanel::Failed;
    }

    pub fn dismiss(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::flavored;

    fn profile_of(liked: Vec<Dish>, recommendations: Vec<Dish>) -> Profile {
        Profile { liked_dishes: liked, recommendations }
    }

    #[test]
    fn test_profile_analysis() {
        let mut presenter = AnalysisPresenter::new();
        assert!(presenter.begin_profile_load());
        assert_eq!(presenter.panel(), &AnalysisPanel::Loading);

        presenter.apply_profile(Ok(profile_of(
            vec![flavored("Gulab Jamun", 0.0, 0.9, 0.5), flavored("Kheer", 0.1, 0.8, 0.8)],
            vec![flavored("Jalebi", 0.0, 1.0, 0.2)],
        )));

        match presenter.panel() {
            AnalysisPanel::Ready { profile: Some(profile), recommendations } => {
                assert_eq!(profile.foodie_type, "Sweet Tooth");
                assert_eq!(
                    profile.foodie_tag,
                    "5% Indian Spice Lover, 85% Sweet Tooth, 65% Creamy Connoisseur"
                );
                assert_eq!(profile.metrics[1].label(), "85%");
                assert_eq!(recommendations.len(), 1);
                assert_eq!(recommendations[0].name, "Jalebi");
                assert_eq!(recommendations[0].chips[1].chip(), "Sweet: 100%");
            }
            other => panic!("Expected analysis, got {:?}", other),
        }
        assert!(presenter.is_open());
        assert!(!presenter.is_loading());
    }

    #[test]
    fn test_empty_profile_is_not_an_error() {
        let mut presenter = AnalysisPresenter::new();
        presenter.begin_profile_load();
        presenter.apply_profile(Ok(Profile::default()));

        assert_eq!(presenter.panel(), &AnalysisPanel::NotEnoughData);
    }

    #[test]
    fn test_failed_profile() {
        let mut presenter = AnalysisPresenter::new();
        presenter.begin_profile_load();
        presenter.apply_profile(Err(FetchError::Service("boom".to_string())));

        assert_eq!(presenter.panel(), &AnalysisPanel::Failed);
    }

    #[test]
    fn test_single_profile_request_in_flight() {
        let mut presenter = AnalysisPresenter::new();
        assert!(presenter.begin_profile_load());
        presenter.dismiss();
        assert!(!presenter.begin_profile_load());
        assert!(presenter.is_open());

        presenter.fail();
        assert!(presenter.begin_profile_load());
    }

    #[test]
    fn test_inline_insights() {
        let mut presenter = AnalysisPresenter::new();

        presenter.present_inline(&Feedback { accepted: true, ..Feedback::default() });
        assert_eq!(presenter.panel(), &AnalysisPanel::Hidden);
        assert!(!presenter.is_open());

        let analysis = TasteAnalysis::derive(&[flavored("Vindaloo", 0.9, 0.1, 0.1)]).unwrap();
        presenter.present_inline(&Feedback {
            accepted: true,
            analysis: Some(analysis),
            ..Feedback::default()
        });

        presenter.present_inline(&Feedback {
            accepted: true,
            recommendations: Some(vec![flavored("Phaal", 1.0, 0.0, 0.0)]),
            ..Feedback::default()
        });

        match presenter.panel() {
            AnalysisPanel::Ready { profile: Some(profile), recommendations } => {
                assert_eq!(profile.foodie_type, "Spice Lover");
                assert_eq!(recommendations[0].name, "Phaal");
            }
            other => panic!("Expected inline insights, got {:?}", other),
        }
        assert!(presenter.is_open());
    }
}
