use crate::models::{FigureSource, Gender, LifeExpectancyFigure};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the catch-all row.
pub const DEFAULT_KEY: &str = "Default";

/// One row of the static table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearsPair {
    pub male: f64,
    pub female: f64,
}

/// Static life-expectancy table used whenever the provider cannot answer.
///
/// Keyed by country display name. The `Default` row (73/78) answers for
/// anything unrecognized. Built-in values can be overridden or extended
/// from configuration, and tests can build their own table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackTable {
    rows: BTreeMap<String, YearsPair>,
    default: YearsPair,
}

const BUILTIN: &[(&str, f64, f64)] = &[
    ("United States", 75.0, 80.0),
    ("Japan", 82.0, 88.0),
    ("United Kingdom", 79.0, 83.0),
    ("Germany", 79.0, 83.0),
    ("France", 80.0, 86.0),
    ("Canada", 80.0, 84.0),
    ("Australia", 81.0, 85.0),
    ("Spain", 80.0, 86.0),
    ("Italy", 81.0, 85.0),
    ("South Korea", 81.0, 87.0),
    ("Brazil", 72.0, 79.0),
    ("Mexico", 72.0, 78.0),
    ("India", 68.0, 71.0),
    ("China", 75.0, 81.0),
];

impl Default for FallbackTable {
    fn default() -> Self {
        let rows = BUILTIN
            .iter()
            .map(|&(name, male, female)| (name.to_string(), YearsPair { male, female }))
            .collect();
        Self {
            rows,
            default: YearsPair {
                male: 73.0,
                female: 78.0,
            },
        }
    }
}

impl FallbackTable {
    /// A table with no named rows, only the catch-all.
    pub fn with_default(default: YearsPair) -> Self {
        Self {
            rows: BTreeMap::new(),
            default,
        }
    }

    /// Insert or replace a row. Naming it `Default` replaces the catch-all.
    pub fn insert(&mut self, country: impl Into<String>, years: YearsPair) {
        let country = country.into();
        if country == DEFAULT_KEY {
            self.default = years;
        } else {
            self.rows.insert(country, years);
        }
    }

    /// Apply `overrides` on top of this table.
    pub fn merged(mut self, overrides: &BTreeMap<String, YearsPair>) -> Self {
        for (country, years) in overrides {
            self.insert(country.clone(), *years);
        }
        self
    }

    /// Row for `country`, without falling back.
    pub fn get(&self, country: &str) -> Option<YearsPair> {
        self.rows.get(country.trim()).copied()
    }

    pub fn default_row(&self) -> YearsPair {
        self.default
    }

    /// Figure for `country`, or the `Default` row when unknown.
    pub fn figure(&self, country: &str) -> LifeExpectancyFigure {
        let row = self.get(country).unwrap_or(self.default);
        LifeExpectancyFigure {
            male_years: row.male,
            female_years: row.female,
            source: FigureSource::Fallback,
        }
    }

    pub fn years(&self, country: &str, gender: Gender) -> f64 {
        self.figure(country).years_for(gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_country_uses_default_row() {
        let t = FallbackTable::default();
        let f = t.figure("Atlantis");
        assert_eq!(f.male_years, 73.0);
        assert_eq!(f.female_years, 78.0);
        assert_eq!(f.source, FigureSource::Fallback);
        assert_eq!(t.figure(DEFAULT_KEY).male_years, 73.0);
    }

    #[test]
    fn overrides_replace_rows_and_default() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "Japan".to_string(),
            YearsPair {
                male: 81.5,
                female: 87.5,
            },
        );
        overrides.insert(
            DEFAULT_KEY.to_string(),
            YearsPair {
                male: 70.0,
                female: 75.0,
            },
        );
        let t = FallbackTable::default().merged(&overrides);
        assert_eq!(t.years("Japan", Gender::Female), 87.5);
        assert_eq!(t.years("Nowhere", Gender::Male), 70.0);
        assert_eq!(t.years("Germany", Gender::Male), 79.0);
    }
}
