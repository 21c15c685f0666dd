//! SOL/USD price feed and the USD quote source built on it.

use crate::async_job::AsyncJob;
use crate::quote::QuoteSource;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// CoinGecko identifier for the native token.
pub const NATIVE_COIN_ID: &str = "solana";

/// Where the native token's USD price comes from.
#[derive(Debug, Clone)]
pub enum PriceFeed {
    /// CoinGecko-compatible `simple/price` endpoint.
    Http(HttpPriceFeed),
    /// Constant price, for offline use.
    Fixed(f64),
}

impl PriceFeed {
    pub async fn usd_price(&self) -> Result<f64> {
        match self {
            PriceFeed::Http(feed) => feed.fetch_usd_price().await,
            PriceFeed::Fixed(price) => Ok(*price),
        }
    }

    /// Start a background fetch of the current USD price.
    pub fn spawn_price_job(&self) -> AsyncJob<f64> {
        let feed = self.clone();
        AsyncJob::spawn(move || async move { feed.usd_price().await })
    }
}

#[derive(Debug, Clone)]
pub struct HttpPriceFeed {
    endpoint: Url,
    coin_id: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct CoinPrice {
    usd: f64,
}

impl HttpPriceFeed {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self {
            endpoint,
            coin_id: NATIVE_COIN_ID.to_string(),
            timeout,
        }
    }

    /// Full request URL including the `ids` and `vs_currencies` query.
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ids", &self.coin_id)
            .append_pair("vs_currencies", "usd");
        url
    }

    pub async fn fetch_usd_price(&self) -> Result<f64> {
        // Built per request: each job runs on its own runtime
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let url = self.request_url();
        tracing::debug!("Fetching USD price from {}", url);

        let response = client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| anyhow!("Price request failed: {}", e))?;
        if !response.status().is_success() {
            return Err(anyhow!("Price API returned HTTP {}", response.status()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read price response: {}", e))?;

        parse_price_response(&body, &self.coin_id)
    }
}

/// Extract the USD price for `coin_id` from a `{"<id>": {"usd": <price>}}` body.
pub fn parse_price_response(body: &str, coin_id: &str) -> Result<f64> {
    let prices: HashMap<String, CoinPrice> =
        serde_json::from_str(body).map_err(|e| anyhow!("Price API parse failed: {}", e))?;
    prices
        .get(coin_id)
        .map(|p| p.usd)
        .ok_or_else(|| anyhow!("No USD price for {} in response", coin_id))
}

/// Value of `amount` native tokens in USD.
pub async fn usd_conversion(feed: &PriceFeed, amount: f64) -> Result<f64> {
    let price = feed.usd_price().await?;
    Ok(amount * price)
}

/// Quote source that prices swap amounts in USD (1 USDC = 1 USD).
#[derive(Debug, Clone)]
pub struct UsdQuoteSource {
    feed: PriceFeed,
}

impl UsdQuoteSource {
    pub fn new(feed: PriceFeed) -> Self {
        Self { feed }
    }
}

impl QuoteSource for UsdQuoteSource {
    fn request_quote(&self, amount: f64) -> AsyncJob<f64> {
        let feed = self.feed.clone();
        AsyncJob::spawn(move || async move { usd_conversion(&feed, amount).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    // ==================== parse_price_response tests ====================

    #[test]
    fn test_parse_price_response_ok() {
        let body = r#"{"solana":{"usd":145.5}}"#;
        assert_eq!(parse_price_response(body, "solana").unwrap(), 145.5);
    }

    #[test]
    fn test_parse_price_response_missing_coin() {
        let body = r#"{"bitcoin":{"usd":64000.0}}"#;
        let err = parse_price_response(body, "solana").unwrap_err();
        assert!(err.to_string().contains("No USD price"));
    }

    #[test]
    fn test_parse_price_response_malformed() {
        assert!(parse_price_response("<html>", "solana").is_err());
    }

    // ==================== request_url tests ====================

    #[test]
    fn test_request_url_query() {
        let feed = HttpPriceFeed::new(
            Url::parse("https://api.coingecko.com/api/v3/simple/price").unwrap(),
            Duration::from_secs(5),
        );
        assert_eq!(
            feed.request_url().as_str(),
            "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=usd"
        );
    }

    // ==================== conversion tests ====================

    #[test]
    fn test_usd_conversion_fixed_price() {
        let feed = PriceFeed::Fixed(150.0);
        let quote = tokio_test::block_on(usd_conversion(&feed, 2.0)).unwrap();
        assert_eq!(quote, 300.0);
    }

    #[test]
    fn test_usd_conversion_nan_amount() {
        let feed = PriceFeed::Fixed(150.0);
        let quote = tokio_test::block_on(usd_conversion(&feed, f64::NAN)).unwrap();
        assert!(quote.is_nan());
    }

    #[test]
    fn test_quote_source_resolves_on_worker() {
        let source = UsdQuoteSource::new(PriceFeed::Fixed(10.0));
        let mut job = source.request_quote(0.5);
        let deadline = Instant::now() + Duration::from_secs(5);
        let result = loop {
            if let Some(res) = job.poll() {
                break res;
            }
            assert!(Instant::now() < deadline);
            thread::sleep(Duration::from_millis(5));
        };
        assert_eq!(result.unwrap(), 5.0);
    }
}
