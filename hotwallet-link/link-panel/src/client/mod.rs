pub mod api;

use async_trait::async_trait;
use reqwest::{IntoUrl, Method, RequestBuilder};

use crate::{error::Error, http::ResponseExt, model::WalletRecord};

use self::api::{WalletCommand, COMMAND_ENDPOINT, LINKED_WALLETS_ENDPOINT};

/// Operator backend as seen by the panel.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// `Ok(None)` when the payload carries no wallet list.
    async fn fetch_wallets(&self) -> Result<Option<Vec<WalletRecord>>, Error>;
    async fn dispatch(&self, command: WalletCommand) -> Result<(), Error>;

    async fn generate_wallet(&self) -> Result<(), Error> {
        self.dispatch(WalletCommand::GenerateWallet {}).await
    }

    async fn import_wallet(&self, private_key: String, name: Option<String>) -> Result<(), Error> {
        self.dispatch(WalletCommand::import(private_key, name)).await
    }
}

fn request<U: IntoUrl>(http: &reqwest::Client, method: Method, url: U) -> RequestBuilder {
    let req = http
        .request(method, url)
        .header("Content-Type", "application/json");
    tracing::debug!("Sending http request: {:?}", req);
    req
}

/// HTTP client for the operator backend.
#[derive(Debug, Clone)]
pub struct WalletClient {
    http: reqwest::Client,
    base_url: String,
}

impl WalletClient {
    /// `server_url` is the origin (`http://127.0.0.1:8080`), `api_base` the
    /// path prefix of the endpoints (`/api`).
    pub fn new(server_url: &str, api_base: &str) -> Self {
        let base_url = format!(
            "{}/{}",
            server_url.trim_end_matches('/'),
            api_base.trim_matches('/')
        );
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl WalletBackend for WalletClient {
    async fn fetch_wallets(&self) -> Result<Option<Vec<WalletRecord>>, Error> {
        let response = request(&self.http, Method::GET, self.url(LINKED_WALLETS_ENDPOINT))
            .send()
            .await?
            .accepted()
            .await?;
        let payload: serde_json::Value = response.json().await?;
        let wallets = api::parse_linked_wallets(payload)?;
        match &wallets {
            Some(list) => tracing::debug!("Fetched {} wallets", list.len()),
            None => tracing::warn!("Wallet directory response carries no wallet list"),
        }
        Ok(wallets)
    }

    async fn dispatch(&self, command: WalletCommand) -> Result<(), Error> {
        let kind = command.kind();
        let response = request(&self.http, Method::POST, self.url(COMMAND_ENDPOINT))
            .json(&command)
            .send()
            .await?;
        match response.accepted().await {
            Ok(_) => {
                tracing::info!("{} command accepted", kind);
                Ok(())
            }
            Err(rejection) => {
                let message = rejection.reason();
                tracing::error!("{} command rejected: {}", kind, message);
                Err(Error::Action(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const A: &str = "0x00000000000000000000000000000000000000aa";

    #[test]
    fn base_url_joins_cleanly() {
        let client = WalletClient::new("http://localhost:8080/", "/operator:hypergrid:ware.hypr/api/");
        assert_eq!(
            client.base_url(),
            "http://localhost:8080/operator:hypergrid:ware.hypr/api"
        );
        assert_eq!(
            client.url(LINKED_WALLETS_ENDPOINT),
            "http://localhost:8080/operator:hypergrid:ware.hypr/api/linked-wallets"
        );
    }

    #[tokio::test]
    async fn fetch_wallets_decodes_directory() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/linked-wallets");
                then.status(200).json_body(json!({
                    "linked_wallets": [{
                        "address": A,
                        "name": null,
                        "is_managed": true,
                        "is_linked_on_chain": true,
                        "is_active": true,
                        "is_encrypted": false,
                        "is_selected": true,
                        "is_unlocked": true
                    }]
                }));
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        let wallets = client.fetch_wallets().await.unwrap().unwrap();
        mock.assert_async().await;
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].address.to_string(), A);
        assert!(wallets[0].is_linked_on_chain);
    }

    #[tokio::test]
    async fn fetch_wallets_without_list_is_no_update() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/linked-wallets");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        assert_eq!(client.fetch_wallets().await.unwrap(), None);
    }

    #[tokio::test]
    async fn fetch_wallets_http_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/linked-wallets");
                then.status(503).body("unavailable");
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        assert_eq!(
            client.fetch_wallets().await.unwrap_err(),
            Error::Network {
                status: Some(503),
                message: "unavailable".to_string()
            }
        );
    }

    #[tokio::test]
    async fn fetch_wallets_failure_prefers_backend_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/linked-wallets");
                then.status(500)
                    .json_body(json!({"error": "Operator not configured"}));
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        assert_eq!(
            client.fetch_wallets().await.unwrap_err(),
            Error::Network {
                status: Some(500),
                message: "Operator not configured".to_string()
            }
        );
    }

    #[tokio::test]
    async fn fetch_wallets_invalid_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/linked-wallets");
                then.status(200).body("<html>");
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        assert!(matches!(
            client.fetch_wallets().await,
            Err(Error::Network { .. })
        ));
    }

    #[tokio::test]
    async fn generate_wallet_posts_tagged_command() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/mcp")
                    .json_body(json!({"GenerateWallet": {}}));
                then.status(200).json_body(json!({"address": A}));
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        client.generate_wallet().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn import_wallet_reports_backend_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/mcp").json_body(json!({
                    "ImportWallet": {"private_key": "0xbeef", "password": null, "name": "ops"}
                }));
                then.status(400)
                    .json_body(json!({"error": "Invalid private key"}));
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        let err = client
            .import_wallet("0xbeef".to_string(), Some("ops".to_string()))
            .await
            .unwrap_err();
        mock.assert_async().await;
        assert_eq!(err, Error::Action("Invalid private key".to_string()));
    }

    #[tokio::test]
    async fn rejected_command_without_message_reports_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/mcp");
                then.status(500).body("boom");
            })
            .await;

        let client = WalletClient::new(&server.base_url(), "/api");
        assert_eq!(
            client.generate_wallet().await.unwrap_err(),
            Error::Action("HTTP error 500".to_string())
        );
    }
}
