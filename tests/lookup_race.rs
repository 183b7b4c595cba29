use shared_time::error::LookupError;
use shared_time::models::FigureSource;
use shared_time::{FallbackTable, LatestFigure, LifeExpectancyFigure, LifeExpectancyProvider};
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};

/// Provider whose answers are released by the test, one country at a time.
struct Gated {
    gates: Mutex<HashMap<String, Receiver<()>>>,
}

impl Gated {
    fn new(countries: &[&str]) -> (Arc<Self>, HashMap<String, Sender<()>>) {
        let mut gates = HashMap::new();
        let mut keys = HashMap::new();
        for c in countries {
            let (tx, rx) = channel();
            gates.insert(c.to_string(), rx);
            keys.insert(c.to_string(), tx);
        }
        (
            Arc::new(Self {
                gates: Mutex::new(gates),
            }),
            keys,
        )
    }
}

impl LifeExpectancyProvider for Gated {
    fn life_expectancy(&self, country: &str) -> Result<LifeExpectancyFigure, LookupError> {
        let rx = self.gates.lock().unwrap().remove(country).unwrap();
        rx.recv().unwrap();
        let years = if country == "India" { 67.0 } else { 84.0 };
        Ok(LifeExpectancyFigure {
            male_years: years,
            female_years: years + 3.0,
            source: FigureSource::WorldBank,
        })
    }
}

#[test]
fn slow_answer_for_old_selection_does_not_win() {
    let (provider, keys) = Gated::new(&["India", "Japan"]);
    let latest = Arc::new(LatestFigure::new());
    let table = FallbackTable::default();

    let first = latest.spawn(Arc::clone(&provider), table.clone(), "India");
    let second = latest.spawn(Arc::clone(&provider), table, "Japan");

    // Newest request answers first, then the stale one.
    keys["Japan"].send(()).unwrap();
    assert!(second.join().unwrap());
    keys["India"].send(()).unwrap();
    assert!(!first.join().unwrap());

    let got = latest.get().unwrap();
    assert_eq!(got.country, "Japan");
    assert_eq!(got.figure.male_years, 84.0);
}

#[test]
fn in_order_answers_keep_the_latest() {
    let (provider, keys) = Gated::new(&["India", "Japan"]);
    let latest = Arc::new(LatestFigure::new());
    let table = FallbackTable::default();

    let first = latest.spawn(Arc::clone(&provider), table.clone(), "India");
    let second = latest.spawn(Arc::clone(&provider), table, "Japan");

    keys["India"].send(()).unwrap();
    assert!(!first.join().unwrap());
    keys["Japan"].send(()).unwrap();
    assert!(second.join().unwrap());

    assert_eq!(latest.get().unwrap().country, "Japan");
}
