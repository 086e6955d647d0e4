// In crates/api-client/src/chart.rs

use crate::error::{Error, Result};
use crate::types::ChartResponse;
use chrono::{DateTime, NaiveDate};
use core_types::PricePoint;

/// Turns a Yahoo chart response body into an ascending daily price series.
///
/// Uses the adjusted close and falls back to the raw close when the response
/// carries no adjusted column. Rows with a missing price are skipped, and a
/// row whose date does not advance past the previous kept row is dropped, so
/// the result always has strictly ascending dates.
pub fn parse_chart_response(body: &str) -> Result<Vec<PricePoint>> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(Error::ApiError {
            code: error.code,
            msg: error.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| Error::NoData("no chart result in response".into()))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| Error::NoData("no timestamps in chart result".into()))?;
    let offset = result.meta.and_then(|m| m.gmtoffset).unwrap_or(0);

    let adjusted = result
        .indicators
        .adjclose
        .and_then(|blocks| blocks.into_iter().next())
        .map(|block| block.adjclose)
        .filter(|column| !column.is_empty());
    let closes = match adjusted {
        Some(column) => column,
        None => result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|block| block.close)
            .ok_or_else(|| Error::NoData("no close prices in chart result".into()))?,
    };

    let mut points: Vec<PricePoint> = Vec::with_capacity(timestamps.len());
    for (ts, price) in timestamps.iter().zip(closes) {
        let Some(price) = price.filter(|p| p.is_finite()) else {
            continue;
        };
        let Some(date) = exchange_date(*ts, offset) else {
            tracing::warn!(timestamp = ts, "Skipping row with an out-of-range timestamp.");
            continue;
        };
        if points.last().is_some_and(|last| date <= last.date) {
            tracing::debug!(%date, "Dropping row that does not advance the date.");
            continue;
        }
        points.push(PricePoint::new(date, price));
    }

    Ok(points)
}

/// Keeps the points dated in `[start, end)`.
///
/// Yahoo pads the requested period on both sides, so the parsed response can
/// carry rows outside the range that was asked for.
pub fn within_range(points: Vec<PricePoint>, start: NaiveDate, end: NaiveDate) -> Vec<PricePoint> {
    points
        .into_iter()
        .filter(|p| p.date >= start && p.date < end)
        .collect()
}

/// Maps a non-2xx chart response to an `ApiError`.
///
/// Yahoo usually explains failures in a chart error object; anything else
/// (rate-limit pages, gateway errors) is reported with the HTTP status code
/// and the start of the body.
pub fn status_error(status: u16, body: &str) -> Error {
    match parse_chart_response(body) {
        Err(api_error @ Error::ApiError { .. }) => api_error,
        _ => Error::ApiError {
            code: status.to_string(),
            msg: body.chars().take(200).collect(),
        },
    }
}

/// The trading date of a UNIX timestamp in the exchange's local time.
fn exchange_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}
