//! Chooses where a shared-time window ends.
//!
//! Each [`VisualizationMode`] maps to an end date and a label:
//!
//! | mode | end date | label |
//! |---|---|---|
//! | life expectancy | birth + round(years) | `Estimated shared time (♀ 88 yrs)` |
//! | milestone | target date, or today | milestone label, or `Until milestone` |
//! | custom | (start or today) + years | `Intentional time: 5 years` |

use crate::dates::add_years;
use crate::fallback::FallbackTable;
use crate::models::{LifeExpectancyFigure, Person, Target, VisualizationMode};
use chrono::NaiveDate;

pub const DEFAULT_MILESTONE_LABEL: &str = "Until milestone";
pub const DEFAULT_CUSTOM_YEARS: u32 = 5;

/// Resolve the end date and label for `mode`.
///
/// `figure` is the provider answer for the life-expectancy country, if one
/// has arrived; otherwise the country's row in `table` is used.
pub fn select_target(
    mode: &VisualizationMode,
    person: &Person,
    figure: Option<&LifeExpectancyFigure>,
    table: &FallbackTable,
    today: NaiveDate,
) -> Target {
    match mode {
        VisualizationMode::LifeExpectancy { country, gender } => {
            let years = match figure {
                Some(f) => f.years_for(*gender),
                None => table.years(country, *gender),
            };
            let rounded = years.round() as i32;
            Target {
                end_date: add_years(person.birth_date, rounded),
                label: format!("Estimated shared time ({} {} yrs)", gender.glyph(), rounded),
            }
        }
        VisualizationMode::Milestone { label, target_date } => Target {
            end_date: target_date.unwrap_or(today),
            label: if label.trim().is_empty() {
                DEFAULT_MILESTONE_LABEL.to_string()
            } else {
                label.clone()
            },
        },
        VisualizationMode::Custom { start_date, years } => {
            let years = custom_years(*years);
            // Out-of-range counts saturate at the latest representable date.
            let shift = i32::try_from(years).unwrap_or(i32::MAX);
            Target {
                end_date: add_years(start_date.unwrap_or(today), shift),
                label: format!("Intentional time: {years} years"),
            }
        }
    }
}

/// Year count for custom mode; unset or zero means the default of 5.
pub fn custom_years(years: Option<u32>) -> u32 {
    years.filter(|&y| y > 0).unwrap_or(DEFAULT_CUSTOM_YEARS)
}

/// Age-based milestone shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestonePreset {
    pub label: &'static str,
    pub target_age: i32,
}

pub const MILESTONE_PRESETS: &[MilestonePreset] = &[
    MilestonePreset {
        label: "Until they turn 18",
        target_age: 18,
    },
    MilestonePreset {
        label: "Until graduation (22)",
        target_age: 22,
    },
    MilestonePreset {
        label: "Until retirement (65)",
        target_age: 65,
    },
];

impl MilestonePreset {
    pub fn target_date(&self, birth_date: NaiveDate) -> NaiveDate {
        add_years(birth_date, self.target_age)
    }

    /// Milestone mode for this preset applied to `person`.
    pub fn mode_for(&self, person: &Person) -> VisualizationMode {
        VisualizationMode::Milestone {
            label: self.label.to_string(),
            target_date: Some(self.target_date(person.birth_date)),
        }
    }
}

/// Preset whose label matches `label` (case-insensitive).
pub fn find_preset(label: &str) -> Option<&'static MilestonePreset> {
    MILESTONE_PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FigureSource, Gender};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person() -> Person {
        Person {
            id: "mia".into(),
            name: "Mia".into(),
            birth_date: ymd(2010, 5, 20),
            together_since: ymd(2010, 5, 20),
        }
    }

    #[test]
    fn provider_figure_is_rounded() {
        let mode = VisualizationMode::LifeExpectancy {
            country: "Germany".into(),
            gender: Gender::Male,
        };
        let figure = LifeExpectancyFigure {
            male_years: 78.6,
            female_years: 83.3,
            source: FigureSource::WorldBank,
        };
        let t = select_target(
            &mode,
            &person(),
            Some(&figure),
            &FallbackTable::default(),
            ymd(2024, 1, 1),
        );
        assert_eq!(t.end_date, ymd(2089, 5, 20));
        assert_eq!(t.label, "Estimated shared time (♂ 79 yrs)");
    }

    #[test]
    fn zero_custom_years_uses_default() {
        assert_eq!(custom_years(Some(0)), 5);
        assert_eq!(custom_years(None), 5);
        assert_eq!(custom_years(Some(12)), 12);
    }

    #[test]
    fn huge_custom_years_stay_in_the_future() {
        let today = ymd(2023, 1, 1);
        let mode = VisualizationMode::Custom {
            start_date: None,
            years: Some(3_000_000_000),
        };
        let t = select_target(&mode, &person(), None, &FallbackTable::default(), today);
        assert!(t.end_date > today);
        assert_eq!(t.end_date, NaiveDate::MAX);
        assert_eq!(t.label, "Intentional time: 3000000000 years");
    }

    #[test]
    fn presets_resolve_from_birth_date() {
        let p = person();
        let preset = find_preset("until they turn 18").unwrap();
        assert_eq!(preset.target_date(p.birth_date), ymd(2028, 5, 20));
        assert_eq!(
            preset.mode_for(&p),
            VisualizationMode::Milestone {
                label: "Until they turn 18".into(),
                target_date: Some(ymd(2028, 5, 20)),
            }
        );
        assert!(find_preset("Until the moon").is_none());
    }
}
