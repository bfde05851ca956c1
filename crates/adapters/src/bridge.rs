//! Browser bridge HTTP adapter
//!
//! Talks JSON to a local bridge endpoint (a debugging companion or extension
//! host) that exposes the current window's tabs and groups:
//!
//! - `GET  /window/tabs` - enumerate tabs in visual order
//! - `POST /window/tabs/{id}/move` - reposition one tab
//! - `POST /window/groups` - collect tabs into a new group
//! - `PATCH /window/groups/{id}` - set a group's title and color
//!
//! An optional bearer token authenticates every request.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use tabtidy_domain::{
    GroupColor, GroupId, GroupSink, GroupSinkError, TabHandle, TabId, TabSource, TabSourceError,
    TabState,
};

/// Shared HTTP client for the bridge endpoint
#[derive(Clone)]
pub struct BridgeClient {
    http: Client,
    base_url: String,
    auth_token: Option<SecretString>,
}

impl BridgeClient {
    pub fn new(base_url: String, auth_token: Option<SecretString>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.auth_token {
            request = request.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }
        request
    }
}

#[derive(Deserialize)]
struct TabsResponse {
    tabs: Vec<TabDto>,
}

#[derive(Deserialize)]
struct TabDto {
    id: i64,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<TabDto> for TabHandle {
    fn from(dto: TabDto) -> Self {
        // A bridge that does not report status is treated as fully loaded.
        let state = match dto.status.as_deref() {
            Some("loading") => TabState::Loading,
            _ => TabState::Complete,
        };
        TabHandle {
            id: TabId(dto.id),
            url: dto.url,
            state,
        }
    }
}

#[derive(Serialize)]
struct MoveRequest {
    index: usize,
}

#[derive(Serialize)]
struct CreateGroupRequest<'a> {
    tab_ids: &'a [TabId],
}

#[derive(Deserialize)]
struct CreateGroupResponse {
    group_id: i64,
}

#[derive(Serialize)]
struct StyleGroupRequest<'a> {
    title: &'a str,
    color: GroupColor,
}

async fn check_tab_response(
    response: Response,
    moved: Option<TabId>,
) -> Result<Response, TabSourceError> {
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(TabSourceError::Auth("invalid bridge token".to_string()));
    }
    if response.status() == StatusCode::NOT_FOUND {
        if let Some(id) = moved {
            return Err(TabSourceError::NotFound(id));
        }
    }
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(TabSourceError::Api(format!(
            "bridge returned {}: {}",
            status, body
        )));
    }
    Ok(response)
}

async fn check_group_response(response: Response) -> Result<Response, GroupSinkError> {
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(GroupSinkError::Auth("invalid bridge token".to_string()));
    }
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(GroupSinkError::Api(format!(
            "bridge returned {}: {}",
            status, body
        )));
    }
    Ok(response)
}

/// Tab enumeration and repositioning over the bridge
pub struct BridgeTabSource {
    client: BridgeClient,
}

impl BridgeTabSource {
    pub fn new(client: BridgeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TabSource for BridgeTabSource {
    async fn list_tabs(&self) -> Result<Vec<TabHandle>, TabSourceError> {
        let response = self
            .client
            .request(Method::GET, "/window/tabs")
            .send()
            .await
            .map_err(|e| TabSourceError::Network(e.to_string()))?;

        let response = check_tab_response(response, None).await?;

        let body: TabsResponse = response
            .json()
            .await
            .map_err(|e| TabSourceError::Api(e.to_string()))?;

        tracing::debug!(tabs = body.tabs.len(), "listed tabs");

        Ok(body.tabs.into_iter().map(TabHandle::from).collect())
    }

    async fn move_tab(&self, id: TabId, index: usize) -> Result<(), TabSourceError> {
        tracing::debug!(%id, index, "moving tab");

        let response = self
            .client
            .request(Method::POST, &format!("/window/tabs/{}/move", id))
            .json(&MoveRequest { index })
            .send()
            .await
            .map_err(|e| TabSourceError::Network(e.to_string()))?;

        check_tab_response(response, Some(id)).await?;
        Ok(())
    }
}

/// Group creation and styling over the bridge
pub struct BridgeGroupSink {
    client: BridgeClient,
}

impl BridgeGroupSink {
    pub fn new(client: BridgeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GroupSink for BridgeGroupSink {
    async fn create_group(&self, tab_ids: &[TabId]) -> Result<GroupId, GroupSinkError> {
        let response = self
            .client
            .request(Method::POST, "/window/groups")
            .json(&CreateGroupRequest { tab_ids })
            .send()
            .await
            .map_err(|e| GroupSinkError::Network(e.to_string()))?;

        let response = check_group_response(response).await?;

        let body: CreateGroupResponse = response
            .json()
            .await
            .map_err(|e| GroupSinkError::Api(e.to_string()))?;

        tracing::debug!(group = body.group_id, tabs = tab_ids.len(), "created group");

        Ok(GroupId(body.group_id))
    }

    async fn style_group(
        &self,
        group: GroupId,
        title: &str,
        color: GroupColor,
    ) -> Result<(), GroupSinkError> {
        let response = self
            .client
            .request(Method::PATCH, &format!("/window/groups/{}", group))
            .json(&StyleGroupRequest { title, color })
            .send()
            .await
            .map_err(|e| GroupSinkError::Network(e.to_string()))?;

        check_group_response(response).await?;

        tracing::debug!(%group, title, %color, "styled group");
        Ok(())
    }
}
