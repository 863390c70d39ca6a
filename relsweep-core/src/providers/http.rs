//! HTTP implementation of the unit source and collector contracts.
//!
//! Talks to the quota-limited assessment API configured under `[collector]`.
//! Session establishment is out of scope; the bearer token is read from the
//! configured environment variable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use relsweep_model::{OutputRef, Tags, Unit, UnitId};

use crate::config::CollectorConfig;
use crate::error::{CollectError, EnumerationError};

use super::{CollectContext, UnitCollector, UnitSource};

#[derive(Debug, Deserialize)]
struct UnitDto {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    tags: Tags,
}

#[derive(Debug, Deserialize)]
struct CollectResponseDto {
    output: String,
}

/// Reqwest-backed provider for both enumeration and per-unit collection.
#[derive(Debug)]
pub struct HttpProvider {
    client: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpProvider {
    pub fn new(config: &CollectorConfig) -> anyhow::Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;
        let token = std::env::var(&config.token_env).ok();
        Ok(HttpProvider {
            client,
            base,
            token,
        })
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.post(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn collect_error_for(status: StatusCode, body: String) -> CollectError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => CollectError::RateLimited,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CollectError::Auth(body)
            }
            StatusCode::NOT_FOUND => CollectError::NotFound(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                CollectError::InvalidRequest(body)
            }
            status if status.is_server_error() => {
                CollectError::Unavailable(format!("{status}: {body}"))
            }
            status => CollectError::Api(format!("{status}: {body}")),
        }
    }
}

#[async_trait]
impl UnitSource for HttpProvider {
    async fn list_units(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<Unit>, EnumerationError> {
        let url = self
            .base
            .join(&format!("tenants/{tenant_id}/units"))
            .map_err(|err| EnumerationError::Network(err.to_string()))?;

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|err| EnumerationError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
        {
            let body = response.text().await.unwrap_or_default();
            return Err(EnumerationError::Auth(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnumerationError::Network(format!("{status}: {body}")));
        }

        let dtos: Vec<UnitDto> = response
            .json()
            .await
            .map_err(|err| EnumerationError::Network(err.to_string()))?;

        debug!(tenant = tenant_id, units = dtos.len(), "units enumerated");
        Ok(dtos
            .into_iter()
            .map(|dto| {
                let name =
                    dto.display_name.unwrap_or_else(|| dto.id.clone());
                Unit {
                    id: UnitId::new(dto.id),
                    name,
                    tags: dto.tags,
                }
            })
            .collect())
    }
}

#[async_trait]
impl UnitCollector for HttpProvider {
    async fn collect(
        &self,
        unit: &Unit,
        ctx: &CollectContext,
    ) -> Result<OutputRef, CollectError> {
        let url = self
            .base
            .join(&format!("units/{}/collect", unit.id))
            .map_err(|err| CollectError::InvalidRequest(err.to_string()))?;

        let response = self.post(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::collect_error_for(status, body));
        }

        let body: CollectResponseDto = response
            .json()
            .await
            .map_err(|err| CollectError::Api(err.to_string()))?;

        // Keep a copy of the raw handle in the scratch workspace so the
        // collector can be audited while the job is still live.
        let receipt = ctx.scratch_path().join("collect.json");
        tokio::fs::write(&receipt, body.output.as_bytes()).await?;

        Ok(OutputRef::new(body.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert!(matches!(
            HttpProvider::collect_error_for(
                StatusCode::TOO_MANY_REQUESTS,
                String::new()
            ),
            CollectError::RateLimited
        ));
        assert!(matches!(
            HttpProvider::collect_error_for(
                StatusCode::SERVICE_UNAVAILABLE,
                "down".into()
            ),
            CollectError::Unavailable(_)
        ));
        assert!(matches!(
            HttpProvider::collect_error_for(
                StatusCode::FORBIDDEN,
                String::new()
            ),
            CollectError::Auth(_)
        ));
        assert!(matches!(
            HttpProvider::collect_error_for(
                StatusCode::NOT_FOUND,
                String::new()
            ),
            CollectError::NotFound(_)
        ));
        assert!(matches!(
            HttpProvider::collect_error_for(
                StatusCode::BAD_REQUEST,
                String::new()
            ),
            CollectError::InvalidRequest(_)
        ));
    }
}
