use anyhow::{Context, Result};
use reqwest::Client;

const API_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=eur";

pub struct RateClient {
    client: Client,
}

impl RateClient {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .user_agent("Mozilla/5.0 (compatible; desktop-app)")
                .build()
                .unwrap(),
        }
    }

    /// Fetches the current EUR price of one BTC. Any HTTP error, malformed
    /// payload, or non-positive value is reported as a failure so the caller
    /// keeps whatever rate it already holds.
    pub async fn fetch_eur_rate(&self) -> Result<f64> {
        let resp = self
            .client
            .get(API_URL)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to reach CoinGecko API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "CoinGecko API error {}: {}",
                status,
                &body[..body.len().min(300)]
            );
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .context("Failed to parse rate response")?;

        let rate = data["bitcoin"]["eur"]
            .as_f64()
            .context("Missing bitcoin.eur in response")?;

        if !rate.is_finite() || rate <= 0.0 {
            anyhow::bail!("Invalid rate received: {}", rate);
        }

        Ok(rate)
    }
}

impl Default for RateClient {
    fn default() -> Self {
        Self::new()
    }
}
