use crate::price_feed::{HttpPriceFeed, PriceFeed};
use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Native token symbol shown next to balances and swap amounts.
pub const NATIVE_TOKEN: &str = "SOL";

/// Token received from a swap.
pub const QUOTE_TOKEN: &str = "USDC";

/// USDC mint on mainnet-beta, used for holdings created by swaps.
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Default CoinGecko-compatible price endpoint.
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

const SOLANA_EXPLORER: &str = "https://explorer.solana.com";

/// A Solana cluster with its public RPC endpoint.
#[derive(Clone, Debug)]
pub struct SolanaCluster {
    pub id: &'static str,
    pub label: &'static str,
    pub default_rpc: &'static str,
    pub is_mainnet: bool,
}

impl SolanaCluster {
    pub const fn new(
        id: &'static str,
        label: &'static str,
        default_rpc: &'static str,
        is_mainnet: bool,
    ) -> Self {
        Self {
            id,
            label,
            default_rpc,
            is_mainnet,
        }
    }
}

pub const CLUSTERS: &[SolanaCluster] = &[
    SolanaCluster::new("mainnet-beta", "Mainnet Beta", "https://api.mainnet-beta.solana.com", true),
    SolanaCluster::new("devnet", "Devnet", "https://api.devnet.solana.com", false),
    SolanaCluster::new("testnet", "Testnet", "https://api.testnet.solana.com", false),
];

pub const DEFAULT_CLUSTER: &str = "devnet";

/// Find a cluster by its id ("mainnet-beta", "devnet", "testnet")
pub fn find_cluster(id: &str) -> Option<&'static SolanaCluster> {
    CLUSTERS.iter().find(|c| c.id == id)
}

/// Explorer page for an address on the given cluster.
/// Mainnet links carry no cluster parameter.
pub fn get_address_explorer_url(cluster_id: &str, address: &str) -> String {
    match find_cluster(cluster_id) {
        Some(cluster) if cluster.is_mainnet => format!("{}/address/{}", SOLANA_EXPLORER, address),
        _ => format!(
            "{}/address/{}?cluster={}",
            SOLANA_EXPLORER, address, cluster_id
        ),
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub cluster: String,
    /// Shown in the cluster selector tooltip; the in-memory wallet never dials it
    pub rpc_url: String,
    pub price_api_url: String,
    pub http_timeout_secs: u64,
    /// Use a constant USD price instead of the price API
    pub fixed_usd_price: Option<f64>,
}

impl Config {
    /// Build a config for `cluster`, reading overrides from the process environment.
    pub fn new(cluster: &str) -> Self {
        Self::from_lookup(cluster, |key| env::var(key).ok())
    }

    /// Build a config for the cluster named by `SOLCARD_CLUSTER` (default devnet).
    pub fn from_env() -> Self {
        let cluster = env::var("SOLCARD_CLUSTER").unwrap_or_else(|_| DEFAULT_CLUSTER.to_string());
        Self::new(&cluster)
    }

    /// Build a config for `cluster` with overrides supplied by `lookup`.
    pub fn from_lookup(cluster: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let cluster = match find_cluster(cluster) {
            Some(c) => c,
            None => {
                tracing::warn!("Unknown cluster '{}', falling back to {}", cluster, DEFAULT_CLUSTER);
                find_cluster(DEFAULT_CLUSTER).unwrap_or(&CLUSTERS[0])
            }
        };

        let rpc_url = lookup("SOLCARD_RPC_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| cluster.default_rpc.to_string());
        let price_api_url = lookup("SOLCARD_PRICE_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRICE_API_URL.to_string());
        let http_timeout_secs = lookup("SOLCARD_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
        let fixed_usd_price = lookup("SOLCARD_FIXED_USD_PRICE")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p > 0.0);

        Self {
            cluster: cluster.id.to_string(),
            rpc_url,
            price_api_url,
            http_timeout_secs,
            fixed_usd_price,
        }
    }

    pub fn cluster_label(&self) -> &str {
        find_cluster(&self.cluster)
            .map(|c| c.label)
            .unwrap_or("Unknown")
    }

    /// The price feed described by this config. Fails on a malformed price URL.
    pub fn price_feed(&self) -> Result<PriceFeed> {
        if let Some(price) = self.fixed_usd_price {
            return Ok(PriceFeed::Fixed(price));
        }
        let url = Url::parse(&self.price_api_url)
            .map_err(|e| anyhow!("Invalid price API URL '{}': {}", self.price_api_url, e))?;
        Ok(PriceFeed::Http(HttpPriceFeed::new(
            url,
            Duration::from_secs(self.http_timeout_secs),
        )))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(DEFAULT_CLUSTER, |_| None)
    }
}
