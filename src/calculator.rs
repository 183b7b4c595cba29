//! The whole shared-time pipeline: resolve the target, then project today onto it.

use crate::clock::{Clock, SystemClock};
use crate::fallback::FallbackTable;
use crate::feature::FeatureState;
use crate::lookup::{LifeExpectancyProvider, resolve_figure};
use crate::models::{
    LifeExpectancyFigure, Person, VisualizationMode, VisualizationResult, VisualizationSettings,
};
use crate::projection::project;
use crate::strategy::select_target;
use chrono::NaiveDate;

/// Computes [`VisualizationResult`]s against an injected clock and fallback table.
///
/// ```
/// use chrono::NaiveDate;
/// use shared_time::{FixedClock, Person, SharedTimeCalculator, VisualizationMode};
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let calc = SharedTimeCalculator::new(FixedClock(d(2023, 1, 1)), Default::default());
/// let person = Person {
///     id: "grandma".into(),
///     name: "Grandma".into(),
///     birth_date: d(1950, 3, 2),
///     together_since: d(2020, 1, 1),
/// };
/// let mode = VisualizationMode::Custom { start_date: None, years: Some(5) };
/// let result = calc.compute(&person, &mode, None);
/// assert_eq!(result.end_date, d(2028, 1, 1));
/// assert!(!result.is_past);
/// ```
#[derive(Debug, Clone)]
pub struct SharedTimeCalculator<C = SystemClock> {
    clock: C,
    table: FallbackTable,
}

impl Default for SharedTimeCalculator<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock, FallbackTable::default())
    }
}

impl<C: Clock> SharedTimeCalculator<C> {
    pub fn new(clock: C, table: FallbackTable) -> Self {
        Self { clock, table }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn table(&self) -> &FallbackTable {
        &self.table
    }

    /// Ask `provider` for the figure `mode` needs. `None` for modes that
    /// don't use life expectancy; provider failures yield the fallback row.
    pub fn figure_for<P>(
        &self,
        mode: &VisualizationMode,
        provider: &P,
    ) -> Option<LifeExpectancyFigure>
    where
        P: LifeExpectancyProvider + ?Sized,
    {
        match mode {
            VisualizationMode::LifeExpectancy { country, .. } => {
                Some(resolve_figure(provider, &self.table, country))
            }
            _ => None,
        }
    }

    /// Projection for `mode`. Without a `figure`, life-expectancy mode uses
    /// the fallback table.
    pub fn compute(
        &self,
        person: &Person,
        mode: &VisualizationMode,
        figure: Option<&LifeExpectancyFigure>,
    ) -> VisualizationResult {
        let today = self.clock.today();
        let target = select_target(mode, person, figure, &self.table, today);
        log::debug!(
            "{} mode for {}: ends {} ({})",
            mode.name(),
            person.id,
            target.end_date,
            target.label
        );
        project(person.together_since, &target, today)
    }

    /// Projection for stored settings; `None` unless the feature is enabled.
    pub fn visualize(
        &self,
        person: &Person,
        settings: Option<&VisualizationSettings>,
        figure: Option<&LifeExpectancyFigure>,
    ) -> Option<VisualizationResult> {
        match (FeatureState::of(settings), settings) {
            (FeatureState::Enabled, Some(s)) => Some(self.compute(person, &s.mode, figure)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::LookupError;
    use crate::models::{FigureSource, Gender};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Unreachable;

    impl LifeExpectancyProvider for Unreachable {
        fn life_expectancy(&self, _: &str) -> Result<LifeExpectancyFigure, LookupError> {
            Err(LookupError::Decode("connection reset".into()))
        }
    }

    fn person() -> Person {
        Person {
            id: "dad".into(),
            name: "Dad".into(),
            birth_date: ymd(1960, 8, 1),
            together_since: ymd(1990, 1, 1),
        }
    }

    #[test]
    fn disabled_settings_produce_nothing() {
        let calc = SharedTimeCalculator::new(FixedClock(ymd(2024, 1, 1)), FallbackTable::default());
        let settings = VisualizationSettings {
            enabled: false,
            has_confirmed_feature: true,
            mode: VisualizationMode::Custom {
                start_date: None,
                years: Some(3),
            },
        };
        assert!(calc.visualize(&person(), Some(&settings), None).is_none());
        assert!(calc.visualize(&person(), None, None).is_none());
    }

    #[test]
    fn unreachable_provider_uses_fallback_figure() {
        let calc = SharedTimeCalculator::new(FixedClock(ymd(2024, 1, 1)), FallbackTable::default());
        let mode = VisualizationMode::LifeExpectancy {
            country: "Atlantis".into(),
            gender: Gender::Female,
        };
        let figure = calc.figure_for(&mode, &Unreachable).unwrap();
        assert_eq!(figure.source, FigureSource::Fallback);
        assert_eq!(figure.female_years, 78.0);

        let r = calc.compute(&person(), &mode, Some(&figure));
        assert_eq!(r.end_date, ymd(2038, 8, 1));
        assert!(r.progress_percent > 0.0 && r.progress_percent < 100.0);
        assert!(!r.is_past);
    }

    #[test]
    fn non_life_expectancy_modes_skip_provider() {
        let calc = SharedTimeCalculator::new(FixedClock(ymd(2024, 1, 1)), FallbackTable::default());
        let mode = VisualizationMode::Milestone {
            label: String::new(),
            target_date: None,
        };
        assert!(calc.figure_for(&mode, &Unreachable).is_none());
    }
}
