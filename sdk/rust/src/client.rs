use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;

/// Request body for POST /api/custom-report.
#[derive(Debug, Serialize)]
pub struct CustomReportRequest {
    pub indicators: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

/// Client for the Economic Data API.
pub struct EconomicDataClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl EconomicDataClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token sent with every authenticated call.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// GET /api/health (no auth).
    pub async fn health(&self) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        Ok(resp.json().await?)
    }

    pub async fn economic_indicators(&self) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        self.get_json("/api/economic-indicators").await
    }

    pub async fn interest_rates(&self) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        self.get_json("/api/interest-rates").await
    }

    pub async fn market_indicators(&self) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        self.get_json("/api/market-indicators").await
    }

    pub async fn available_indicators(&self) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        self.get_json("/api/custom-report/available-indicators").await
    }

    /// POST /api/custom-report.
    pub async fn custom_report(
        &self,
        req: &CustomReportRequest,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self
            .authorized(self.client.post(format!("{}/api/custom-report", self.base_url)))
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(format!("API returned error status {}: {}", status, text).into());
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Perform a raw GET, returning the response for status inspection.
    pub async fn raw_get(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.authorized(self.client.get(format!("{}{}", self.base_url, path)))
            .send()
            .await
    }

    async fn get_json(&self, path: &str) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self.raw_get(path).await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(format!("API returned error status {}: {}", status, text).into());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}
