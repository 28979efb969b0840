use serde::Deserialize;
use serde_json::Value;
use tracing::{
    debug,
    warn,
};

use crate::core::{
    errors::FetchError,
    models::{
        Dish,
        DishFetch,
        Feedback,
        Profile,
        ResetOutcome,
        TasteAnalysis,
    },
};

const STATUS_SUCCESS: &str = "success";
const STATUS_EMPTY: &str = "empty";
const STATUS_ERROR: &str = "error";

#[derive(Debug, Deserialize)]
pub struct DishEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub dish: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DishEnvelope {
    pub fn into_fetch(self) -> Result<DishFetch, FetchError> {
        match self.status.as_str() {
            STATUS_SUCCESS => {
                let value = self
                    .dish
                    .ok_or_else(|| FetchError::Malformed("Invalid dish data received".to_string()))?;

                Dish::from_value(&value).map(DishFetch::Dish).map_err(|reason| {
                    FetchError::Malformed(format!("Invalid dish data received ({reason})"))
                })
            }
            STATUS_EMPTY => Ok(DishFetch::Exhausted),
            STATUS_ERROR => Err(FetchError::Service(
                self.error.unwrap_or_else(|| "Failed to load dishes".to_string()),
            )),
            other => Err(FetchError::Malformed(format!("Unexpected status '{other}'"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub recommendations: Option<Vec<Value>>,
    #[serde(default)]
    pub analysis: Option<Value>,
}

impl FeedbackEnvelope {
    pub fn into_feedback(self) -> Feedback {
        let analysis = self.analysis.and_then(|value| {
            serde_json::from_value::<TasteAnalysis>(value)
                .map_err(|e| warn!("Ignoring malformed analysis in like response: {e}"))
                .ok()
        });

        Feedback {
            accepted: self.status == STATUS_SUCCESS,
            message: self.message,
            recommendations: self.recommendations.map(|values| Dish::from_values(&values)),
            analysis,
        }
    }
}

/// `/profile` answers `{ "error": ... }` when nothing was liked yet, which
/// reads as an empty profile.
#[derive(Debug, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub liked_dishes: Option<Vec<Value>>,
    #[serde(default)]
    pub recommendations: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProfileEnvelope {
    pub fn into_profile(self) -> Profile {
        if let Some(message) = &self.error {
            debug!("Profile service says: {message}");
        }

        Profile {
            liked_dishes: Dish::from_values(&self.liked_dishes.unwrap_or_default()),
            recommendations: Dish::from_values(&self.recommendations.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResetEnvelope {
    #[serde(default)]
    pub status: String,
}

impl ResetEnvelope {
    pub fn into_outcome(self) -> ResetOutcome {
        if self.status == STATUS_SUCCESS {
            ResetOutcome::Confirmed
        } else {
            ResetOutcome::Declined(self.status)
        }
    }
}
