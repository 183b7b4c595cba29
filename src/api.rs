//! Synchronous life-expectancy client for the **World Bank Indicators API (v2)**.
//!
//! Two indicators are queried per country, each restricted to its most recent
//! non-empty observation (`mrnev=1`):
//! - `SP.DYN.LE00.MA.IN`: life expectancy at birth, male (years)
//! - `SP.DYN.LE00.FE.IN`: life expectancy at birth, female (years)
//!
//! Countries are given by display name and mapped to ISO3 codes through
//! [`crate::countries`].
//!
//! ### Notes
//! - The API sometimes serializes `per_page` as a **string**; we accept both string/number.
//! - An error is reported as a `message` object in position 0 of the response array.
//! - Network timeouts default to 30s total / 10s connect and come from [`ProviderConfig`].
//!
//! Typical usage:
//! ```no_run
//! # use shared_time::api::Client;
//! let client = Client::default();
//! let figure = client.life_expectancy("Japan")?;
//! println!("{} / {}", figure.male_years, figure.female_years);
//! # Ok::<(), shared_time::error::LookupError>(())
//! ```
use crate::config::ProviderConfig;
use crate::countries;
use crate::error::LookupError;
use crate::lookup::LifeExpectancyProvider;
use crate::models::{Entry, FigureSource, LifeExpectancyFigure, Meta};
use anyhow::Context;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

pub const MALE_INDICATOR: &str = "SP.DYN.LE00.MA.IN";
pub const FEMALE_INDICATOR: &str = "SP.DYN.LE00.FE.IN";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    enabled: bool,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::from_config(&ProviderConfig::default()).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

impl Client {
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs)) // total request timeout
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("shared-time/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            enabled: config.enabled,
            http,
        })
    }

    /// Fetch male and female life expectancy for a country display name.
    ///
    /// ### Errors
    /// - [`LookupError::Disabled`] when the provider is switched off
    /// - [`LookupError::UnknownCountry`] for names outside the catalogue
    /// - Network/HTTP, decoding or API-level errors
    /// - [`LookupError::NoData`] when either indicator has no observation
    pub fn life_expectancy(&self, country: &str) -> Result<LifeExpectancyFigure, LookupError> {
        if !self.enabled {
            return Err(LookupError::Disabled);
        }
        let iso3 =
            countries::iso3(country).ok_or_else(|| LookupError::UnknownCountry(country.into()))?;

        let male_years = self.latest_value(iso3, MALE_INDICATOR)?;
        let female_years = self.latest_value(iso3, FEMALE_INDICATOR)?;
        Ok(LifeExpectancyFigure {
            male_years,
            female_years,
            source: FigureSource::WorldBank,
        })
    }

    /// Most recent non-empty observation of `indicator` for an ISO3 code.
    pub fn latest_value(&self, iso3: &str, indicator: &str) -> Result<f64, LookupError> {
        let url = format!(
            "{}/country/{}/indicator/{}?format=json&mrnev=1",
            self.base_url,
            enc(iso3),
            enc(indicator)
        );
        let v = self.get_json(&url)?;
        parse_latest_value(&v)?.ok_or_else(|| LookupError::NoData {
            country: iso3.to_string(),
            indicator: indicator.to_string(),
        })
    }

    /// Small retry for transient failures (5xx / network errors).
    fn get_json(&self, url: &str) -> Result<Value, LookupError> {
        let mut last_err: Option<LookupError> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => return Ok(r.json()?),
                Ok(r) if r.status().is_server_error() => {
                    last_err = Some(LookupError::Status(r.status().as_u16()));
                }
                Ok(r) => return Err(LookupError::Status(r.status().as_u16())),
                Err(e) => last_err = Some(e.into()),
            }
            log::debug!("GET {url} failed, retrying in {backoff_ms}ms");
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        Err(last_err.unwrap_or_else(|| LookupError::Decode("no response".into())))
    }
}

impl LifeExpectancyProvider for Client {
    fn life_expectancy(&self, country: &str) -> Result<LifeExpectancyFigure, LookupError> {
        Client::life_expectancy(self, country)
    }
}

/// Extract the newest non-null value from an indicator response.
///
/// The API returns `[Meta, [Entry, ...]]`, or `[{"message": ...}]` on error.
/// `Ok(None)` means the request succeeded but carried no observation.
pub fn parse_latest_value(v: &Value) -> Result<Option<f64>, LookupError> {
    let arr = v
        .as_array()
        .ok_or_else(|| LookupError::Decode("not a top-level array".into()))?;
    let Some(head) = arr.first() else {
        return Err(LookupError::Decode("empty array".into()));
    };
    if let Some(message) = head.get("message") {
        return Err(LookupError::Api(message.to_string()));
    }

    let meta: Meta = serde_json::from_value(head.clone())?;
    if meta.total == 0 {
        return Ok(None);
    }
    let entries: Vec<Entry> = match arr.get(1) {
        Some(Value::Null) | None => vec![],
        Some(list) => serde_json::from_value(list.clone())?,
    };

    // Entries come newest first, but don't rely on it.
    Ok(entries
        .into_iter()
        .filter_map(|e| Some((e.date.parse::<i32>().unwrap_or(0), e.value?)))
        .max_by_key(|(year, _)| *year)
        .map(|(_, value)| value))
}
