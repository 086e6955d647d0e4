// In crates/api-client/src/lib.rs

use app_config::MarketDataSettings;
use chrono::{NaiveDate, NaiveTime};
use core_types::{PricePoint, Symbol};
use std::time::Duration;

pub mod chart;
pub mod error;
pub mod store;
pub mod types;

// Re-export public types
pub use chart::parse_chart_response;
pub use error::{Error, Result};
pub use store::{load_prices, save_prices};

/// Client for the Yahoo Finance chart API, used to fetch daily closes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Constructs a new ApiClient from MarketDataSettings.
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(ApiClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the daily adjusted-close series for `symbol` in `[start, end)`.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    pub async fn get_daily_prices(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        if end <= start {
            return Err(core_types::Error::invalid_input(format!(
                "end date {end} must be after start date {start}"
            ))
            .into());
        }

        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=div%2Csplit&includeAdjustedClose=true",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            unix_midnight(start),
            unix_midnight(end),
        );

        tracing::debug!(%url, "Requesting daily chart.");
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(chart::status_error(status.as_u16(), &body));
        }

        let prices = chart::within_range(parse_chart_response(&body)?, start, end);

        if prices.is_empty() {
            return Err(Error::NoData(format!(
                "{symbol} has no daily closes between {start} and {end}"
            )));
        }

        tracing::info!(
            symbol = %symbol,
            count = prices.len(),
            from = %prices[0].date,
            to = %prices[prices.len() - 1].date,
            "Fetched daily prices."
        );
        Ok(prices)
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

// Free function to allow api_client::new usage
pub fn new(settings: &MarketDataSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}
