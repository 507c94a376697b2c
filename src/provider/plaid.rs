//! Plaid HTTP client.
//!
//! All Plaid endpoints are JSON POSTs carrying the client credentials in the
//! request body. The environment (sandbox/development/production) selects
//! the base URL.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::provider::{LinkedAccount, ProviderTransaction};

/// Link token for the client-side provider Link flow. Passed through to the
/// frontend verbatim, so field names stay as the provider sends them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkTokenResponse {
    pub link_token: String,
    pub expiration: String,
}

/// Result of exchanging a public token. Contains the access token; internal
/// use only.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeTokenResponse {
    pub access_token: String,
    pub item_id: String,
}

#[derive(Debug, Deserialize)]
struct AccountsGetResponse {
    accounts: Vec<LinkedAccount>,
}

#[derive(Debug, Deserialize)]
struct TransactionsGetResponse {
    transactions: Vec<ProviderTransaction>,
}

/// Error body the provider returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct PlaidErrorBody {
    error_code: Option<String>,
    error_message: Option<String>,
}

/// Thin typed client over the Plaid REST API.
#[derive(Debug, Clone)]
pub struct PlaidClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    secret: String,
}

impl PlaidClient {
    pub fn new(config: &AppConfig) -> Self {
        let base_url = match config.plaid_env.as_str() {
            "production" => "https://production.plaid.com".to_string(),
            "development" => "https://development.plaid.com".to_string(),
            _ => "https://sandbox.plaid.com".to_string(),
        };
        Self {
            http: reqwest::Client::new(),
            base_url,
            client_id: config.plaid_client_id.clone(),
            secret: config.plaid_secret.clone(),
        }
    }

    /// Override the base URL; used to point at a stub server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a link token for the frontend Link integration.
    pub async fn create_link_token(&self, user_id: Uuid) -> Result<LinkTokenResponse, AppError> {
        self.post(
            "/link/token/create",
            serde_json::json!({
                "client_id": self.client_id,
                "secret": self.secret,
                "client_name": "BudgeTrack",
                "products": ["transactions", "auth"],
                "country_codes": ["US"],
                "language": "en",
                "user": { "client_user_id": user_id.to_string() },
            }),
        )
        .await
    }

    /// Exchange a public token from the Link flow for an access token.
    pub async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<ExchangeTokenResponse, AppError> {
        self.post(
            "/item/public_token/exchange",
            serde_json::json!({
                "client_id": self.client_id,
                "secret": self.secret,
                "public_token": public_token,
            }),
        )
        .await
    }

    /// Fetch all accounts reachable with an access token.
    pub async fn get_accounts(&self, access_token: &str) -> Result<Vec<LinkedAccount>, AppError> {
        let response: AccountsGetResponse = self
            .post(
                "/accounts/get",
                serde_json::json!({
                    "client_id": self.client_id,
                    "secret": self.secret,
                    "access_token": access_token,
                }),
            )
            .await?;
        Ok(response.accounts)
    }

    /// Fetch transactions in an inclusive date range.
    pub async fn get_transactions(
        &self,
        access_token: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ProviderTransaction>, AppError> {
        let response: TransactionsGetResponse = self
            .post(
                "/transactions/get",
                serde_json::json!({
                    "client_id": self.client_id,
                    "secret": self.secret,
                    "access_token": access_token,
                    "start_date": start_date.to_string(),
                    "end_date": end_date.to_string(),
                }),
            )
            .await?;
        Ok(response.transactions)
    }

    async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<R, AppError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error: PlaidErrorBody = response
                .json()
                .await
                .unwrap_or(PlaidErrorBody {
                    error_code: None,
                    error_message: None,
                });
            return Err(AppError::Provider(format!(
                "{path} returned {status}: {} ({})",
                error.error_message.as_deref().unwrap_or("no message"),
                error.error_code.as_deref().unwrap_or("UNKNOWN"),
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("invalid response from {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/test".to_string(),
            database_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            plaid_client_id: "client".to_string(),
            plaid_secret: "secret".to_string(),
            plaid_env: "sandbox".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
        }
    }

    #[test]
    fn environment_selects_base_url() {
        let mut config = test_config();
        assert!(PlaidClient::new(&config)
            .base_url
            .starts_with("https://sandbox"));

        config.plaid_env = "production".to_string();
        assert!(PlaidClient::new(&config)
            .base_url
            .starts_with("https://production"));
    }

    #[test]
    fn base_url_override_for_tests() {
        let client = PlaidClient::new(&test_config()).with_base_url("http://127.0.0.1:9999");
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }
}
