//! Life-expectancy lookups that never fail.
//!
//! [`resolve_figure`] asks a provider and substitutes the fallback table on
//! any error. [`LatestFigure`] keeps only the answer to the most recent
//! request, so a slow response for a previously selected country cannot
//! overwrite the current one.

use crate::error::LookupError;
use crate::fallback::FallbackTable;
use crate::models::LifeExpectancyFigure;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// Source of life-expectancy figures, keyed by country display name.
pub trait LifeExpectancyProvider {
    fn life_expectancy(&self, country: &str) -> Result<LifeExpectancyFigure, LookupError>;
}

impl<P: LifeExpectancyProvider + ?Sized> LifeExpectancyProvider for &P {
    fn life_expectancy(&self, country: &str) -> Result<LifeExpectancyFigure, LookupError> {
        (**self).life_expectancy(country)
    }
}

impl<P: LifeExpectancyProvider + ?Sized> LifeExpectancyProvider for Arc<P> {
    fn life_expectancy(&self, country: &str) -> Result<LifeExpectancyFigure, LookupError> {
        (**self).life_expectancy(country)
    }
}

/// Provider figure for `country`, or the fallback row when the provider
/// errors for any reason.
pub fn resolve_figure<P>(
    provider: &P,
    table: &FallbackTable,
    country: &str,
) -> LifeExpectancyFigure
where
    P: LifeExpectancyProvider + ?Sized,
{
    match provider.life_expectancy(country) {
        Ok(figure) => figure,
        Err(LookupError::Disabled) => table.figure(country),
        Err(e) => {
            log::warn!("life expectancy lookup for {country:?} failed, using fallback: {e}");
            table.figure(country)
        }
    }
}

/// Identifies one lookup request. Later tokens supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookupToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub country: String,
    pub figure: LifeExpectancyFigure,
}

/// Holds the figure belonging to the latest requested country.
///
/// Every [`begin`](Self::begin) issues a new token; [`complete`](Self::complete)
/// only stores figures whose token is still the newest one issued.
#[derive(Debug, Default)]
pub struct LatestFigure {
    issued: AtomicU64,
    current: Mutex<Option<(LookupToken, Resolved)>>,
}

impl LatestFigure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, invalidating every earlier token.
    pub fn begin(&self) -> LookupToken {
        LookupToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: LookupToken) -> bool {
        self.issued.load(Ordering::SeqCst) == token.0
    }

    /// Store the answer for `token`. Returns `false` and drops the figure
    /// when a newer request has been started in the meantime.
    pub fn complete(
        &self,
        token: LookupToken,
        country: &str,
        figure: LifeExpectancyFigure,
    ) -> bool {
        let mut slot = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Check under the lock so two completions cannot interleave.
        if !self.is_current(token) {
            log::debug!("discarding stale life expectancy for {country:?}");
            return false;
        }
        *slot = Some((
            token,
            Resolved {
                country: country.to_string(),
                figure,
            },
        ));
        true
    }

    /// The stored figure, if the newest request has completed.
    pub fn get(&self) -> Option<Resolved> {
        let slot = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.as_ref()
            .filter(|(token, _)| self.is_current(*token))
            .map(|(_, resolved)| resolved.clone())
    }

    /// Run a lookup on a background thread and apply it through the token
    /// guard. The handle yields whether the result was kept.
    pub fn spawn<P>(
        self: &Arc<Self>,
        provider: Arc<P>,
        table: FallbackTable,
        country: impl Into<String>,
    ) -> JoinHandle<bool>
    where
        P: LifeExpectancyProvider + Send + Sync + ?Sized + 'static,
    {
        let token = self.begin();
        let country = country.into();
        let latest = Arc::clone(self);
        std::thread::spawn(move || {
            let figure = resolve_figure(&*provider, &table, &country);
            latest.complete(token, &country, figure)
        })
    }
}
