//! Lifecycle of the per-member time-together view.
//!
//! ```text
//!  Unset --configure--> Enabled <--enable/disable--> Disabled
//!                        |   ^                          |
//!                        +---+ configure  <-------------+ configure
//! ```
//!
//! Nothing leads back to `Unset`: disabling keeps the stored mode so that
//! enabling again restores it.

use crate::error::FeatureError;
use crate::models::{VisualizationMode, VisualizationSettings};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureState {
    /// Never configured; shown as an opt-in prompt.
    Unset,
    /// Configured but hidden.
    Disabled,
    /// Configured and displayed.
    Enabled,
}

impl FeatureState {
    pub fn of(settings: Option<&VisualizationSettings>) -> Self {
        match settings {
            None => FeatureState::Unset,
            Some(s) if s.enabled => FeatureState::Enabled,
            Some(_) => FeatureState::Disabled,
        }
    }
}

impl fmt::Display for FeatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeatureState::Unset => "unset",
            FeatureState::Disabled => "disabled",
            FeatureState::Enabled => "enabled",
        })
    }
}

/// Save new parameters. Valid from every state and always ends `Enabled`.
pub fn configure(settings: &mut Option<VisualizationSettings>, mode: VisualizationMode) {
    *settings = Some(VisualizationSettings {
        enabled: true,
        has_confirmed_feature: true,
        mode,
    });
}

/// Show a configured view again with its stored parameters.
pub fn enable(settings: &mut Option<VisualizationSettings>) -> Result<FeatureState, FeatureError> {
    let s = settings.as_mut().ok_or(FeatureError::NotConfigured)?;
    s.enabled = true;
    Ok(FeatureState::Enabled)
}

/// Hide the view, keeping its parameters.
pub fn disable(settings: &mut Option<VisualizationSettings>) -> Result<FeatureState, FeatureError> {
    let s = settings.as_mut().ok_or(FeatureError::NotConfigured)?;
    s.enabled = false;
    Ok(FeatureState::Disabled)
}
