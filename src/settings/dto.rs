use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Daily targets. Unset goals are simply not tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub calories_kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub steps: Option<u32>,
    pub target_weight_kg: Option<f64>,
}

impl Goals {
    /// Every set goal must be a positive, finite number.
    pub fn validate(&self) -> Result<(), String> {
        let amounts = [
            ("calories_kcal", self.calories_kcal),
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
            ("target_weight_kg", self.target_weight_kg),
        ];
        for (name, value) in amounts {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(format!("{name} must be a positive number"));
                }
            }
        }
        if self.steps == Some(0) {
            return Err("steps must be a positive number".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub onboarding_seen: bool,
    pub goals: Goals,
}

/// Partial update. A present `goals` object replaces the stored goals whole.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub onboarding_seen: Option<bool>,
    pub goals: Option<Goals>,
}

impl SettingsPatch {
    pub fn apply_to(self, settings: &mut Settings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(seen) = self.onboarding_seen {
            settings.onboarding_seen = seen;
        }
        if let Some(goals) = self.goals {
            settings.goals = goals;
        }
    }
}

/// Sent to subscribers after a change has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsChanged {
    pub user_id: Uuid,
    pub settings: Settings,
}
