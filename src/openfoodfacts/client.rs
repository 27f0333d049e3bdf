use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use super::{decode_product, LookupError, Product};
use crate::config::OffConfig;

#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_product(&self, barcode: &str) -> Result<Product, LookupError>;
}

#[derive(Clone)]
pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(cfg: &OffConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build product lookup http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, barcode: &str) -> String {
        format!("{}/api/v2/product/{}.json", self.base_url, barcode)
    }
}

#[async_trait]
impl ProductSource for OpenFoodFactsClient {
    async fn fetch_product(&self, barcode: &str) -> Result<Product, LookupError> {
        let url = self.product_url(barcode);
        debug!(%barcode, %url, "product lookup");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            warn!(%barcode, %status, "product lookup rejected");
            return Err(LookupError::Upstream(status.as_u16()));
        }

        let doc: Value = resp
            .json()
            .await
            .map_err(|e| LookupError::Unparseable(e.to_string()))?;
        decode_product(doc)
    }
}
