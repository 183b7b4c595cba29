//! shared_time
//!
//! A small Rust library for projecting the time left together with a family
//! member. Pairs with the `shared-time` CLI.
//!
//! ### Features
//! - Timezone-free calendar arithmetic (days, birthday-aware years)
//! - Three ways to pick the end of the window: life expectancy by country and
//!   gender, a fixed milestone, or a custom number of years
//! - Life expectancy from the World Bank, with a static fallback table that
//!   answers whenever the API can't
//! - Progress, remaining days/years and a past flag, bounded for display
//! - Per-member settings with an enable/disable lifecycle, stored as JSON
//!
//! ### Example
//! ```no_run
//! use shared_time::{Client, Person, SharedTimeCalculator, VisualizationMode, Gender};
//! use shared_time::dates::parse_ymd;
//!
//! let calc = SharedTimeCalculator::default();
//! let person = Person {
//!     id: "oma".into(),
//!     name: "Oma".into(),
//!     birth_date: parse_ymd("1948-11-30")?,
//!     together_since: parse_ymd("1990-04-12")?,
//! };
//! let mode = VisualizationMode::LifeExpectancy {
//!     country: "Germany".into(),
//!     gender: Gender::Female,
//! };
//! let figure = calc.figure_for(&mode, &Client::default());
//! let result = calc.compute(&person, &mode, figure.as_ref());
//! println!(
//!     "{}: {} days left ({:.1}%)",
//!     result.label, result.days_remaining, result.progress_percent
//! );
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod countries;
pub mod dates;
pub mod error;
pub mod fallback;
pub mod feature;
pub mod lookup;
pub mod models;
pub mod projection;
pub mod storage;
pub mod strategy;

pub use api::Client;
pub use calculator::SharedTimeCalculator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use fallback::FallbackTable;
pub use feature::FeatureState;
pub use lookup::{LatestFigure, LifeExpectancyProvider};
pub use models::{
    Gender, LifeExpectancyFigure, Person, Target, VisualizationMode, VisualizationResult,
    VisualizationSettings,
};
