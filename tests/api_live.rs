//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use shared_time::Client;
use shared_time::models::FigureSource;

#[test]
fn fetch_japan() {
    let client = Client::default();
    let f = client.life_expectancy("Japan").unwrap();
    assert_eq!(f.source, FigureSource::WorldBank);
    assert!(f.male_years > 60.0 && f.male_years < 100.0);
    assert!(f.female_years > f.male_years);
}

#[test]
fn fetch_by_indicator() {
    let client = Client::default();
    let v = client
        .latest_value("DEU", shared_time::api::MALE_INDICATOR)
        .unwrap();
    assert!(v > 60.0);
}
