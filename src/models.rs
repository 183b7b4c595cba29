use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A family member as far as shared-time projections care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    /// Start of the relationship ("together since").
    pub together_since: NaiveDate,
}

/// Lookup axis of the life-expectancy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn glyph(self) -> char {
        match self {
            Gender::Male => '♂',
            Gender::Female => '♀',
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

/// How the end of the shared-time window is chosen.
///
/// One payload per mode; a milestone date next to a custom year count is
/// not representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum VisualizationMode {
    /// Birth date plus the country/gender life expectancy.
    LifeExpectancy { country: String, gender: Gender },
    /// A fixed target date. A missing date means "today".
    Milestone {
        #[serde(default)]
        label: String,
        #[serde(default)]
        target_date: Option<NaiveDate>,
    },
    /// `years` from `start_date` (today when absent).
    Custom {
        #[serde(default)]
        start_date: Option<NaiveDate>,
        #[serde(default)]
        years: Option<u32>,
    },
}

impl VisualizationMode {
    pub fn name(&self) -> &'static str {
        match self {
            VisualizationMode::LifeExpectancy { .. } => "life-expectancy",
            VisualizationMode::Milestone { .. } => "milestone",
            VisualizationMode::Custom { .. } => "custom",
        }
    }
}

/// Stored per family member. `enabled = false` hides the feature but keeps
/// `mode` so re-enabling restores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSettings {
    pub enabled: bool,
    #[serde(default)]
    pub has_confirmed_feature: bool,
    #[serde(flatten)]
    pub mode: VisualizationMode,
}

/// Where a life-expectancy figure came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FigureSource {
    WorldBank,
    Fallback,
}

impl fmt::Display for FigureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FigureSource::WorldBank => "World Bank",
            FigureSource::Fallback => "fallback",
        })
    }
}

/// Life expectancy at birth, in years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeExpectancyFigure {
    pub male_years: f64,
    pub female_years: f64,
    pub source: FigureSource,
}

impl LifeExpectancyFigure {
    pub fn years_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male_years,
            Gender::Female => self.female_years,
        }
    }
}

/// End of the shared-time window and how to describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub end_date: NaiveDate,
    pub label: String,
}

/// Display-ready projection. Recomputed on every render, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationResult {
    pub end_date: NaiveDate,
    pub label: String,
    pub days_remaining: u32,
    pub years_remaining: u32,
    /// Always within `0.0..=100.0`.
    pub progress_percent: f64,
    pub is_past: bool,
}

/// Metadata section returned by the World Bank API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("negative value for u32"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

/// Raw observation from the API (position 1 array). Only the year and the
/// value are read; the indicator and country echoes are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub value: Option<f64>,
}
