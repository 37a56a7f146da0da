//! Blocking HTTP implementation of [`TrackerApi`].

use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::TrackerApi;
use crate::error::{Result, TrackerError};
use crate::model::{
    Machine, NewMachine, NewRepair, PriceUpdate, RecordId, Repair, RepairType, Session,
    TokenResponse, UserDetails, UserProfile,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://agronomy-dept-llgc.teemah.com.ng/api/";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest slice of an error body kept in [`TrackerError::Api`].
const MAX_ERROR_BODY: usize = 200;

/// Connection settings for [`HttpApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// REST client for the maintenance tracker backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut root = config.base_url.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let base = Url::parse(&root).map_err(|e| {
            TrackerError::InvalidInput(format!("invalid API URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("mtrack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base
            .join(path)
            .map_err(|e| TrackerError::InvalidInput(format!("invalid path '{}': {}", path, e)))?;
        tracing::debug!(method = method.as_str(), url = url.as_str(), "api request");
        Ok(self.client.request(method, url))
    }

    fn authed(&self, method: Method, path: &str, session: &Session) -> Result<RequestBuilder> {
        Ok(self.request(method, path)?.bearer_auth(&session.access))
    }

    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = check(request.send()?)?;
        Ok(response.json()?)
    }

    fn execute(&self, request: RequestBuilder) -> Result<()> {
        check(request.send()?)?;
        Ok(())
    }
}

/// Map a non-success status to the matching error.
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), url = response.url().as_str(), "api response");
    if status.is_success() {
        return Ok(response);
    }

    let path = response.url().path().to_string();
    let body: String = response
        .text()
        .unwrap_or_default()
        .chars()
        .take(MAX_ERROR_BODY)
        .collect();

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TrackerError::Unauthorized(detail(&body).unwrap_or_else(|| status.to_string()))
        }
        StatusCode::NOT_FOUND => TrackerError::NotFound(path),
        _ => TrackerError::Api {
            status: status.as_u16(),
            body,
        },
    })
}

/// The `detail` message of a JSON error body, if there is one.
fn detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

impl TrackerApi for HttpApi {
    fn login(&self, username: &str, password: &str) -> Result<Session> {
        let request = self
            .request(Method::POST, "token/")?
            .json(&json!({ "username": username, "password": password }));
        let token: TokenResponse = self.fetch(request)?;

        let access = token
            .access
            .filter(|a| !a.is_empty())
            .ok_or_else(|| TrackerError::Unauthorized("no access token returned".to_string()))?;
        let session = Session::new(username, access);
        Ok(match token.refresh {
            Some(refresh) => session.with_refresh(refresh),
            None => session,
        })
    }

    fn register(&self, username: &str, password: &str) -> Result<()> {
        let request = self
            .request(Method::POST, "register/")?
            .json(&json!({ "username": username, "password": password }));
        self.execute(request)
    }

    fn user_profile(&self, session: &Session) -> Result<UserProfile> {
        self.fetch(self.authed(Method::GET, "user-profile/", session)?)
    }

    fn user_details(&self, session: &Session) -> Result<UserDetails> {
        self.fetch(self.authed(Method::GET, "user/details", session)?)
    }

    fn list_machines(&self, session: &Session) -> Result<Vec<Machine>> {
        self.fetch(self.authed(Method::GET, "machines/", session)?)
    }

    fn create_machine(&self, session: &Session, machine: &NewMachine) -> Result<Machine> {
        let mut form = multipart::Form::new()
            .text("name", machine.name.clone())
            .text("description", machine.description.clone());
        if let Some(path) = &machine.image_path {
            form = form.file("image", path).map_err(|e| {
                TrackerError::InvalidInput(format!("cannot read image {}: {}", path.display(), e))
            })?;
        }
        let request = self.authed(Method::POST, "machines/", session)?.multipart(form);
        self.fetch(request)
    }

    fn list_repairs(&self, session: &Session) -> Result<Vec<Repair>> {
        self.fetch(self.authed(Method::GET, "repairs/", session)?)
    }

    fn list_repairs_for_machine(
        &self,
        session: &Session,
        machine: &RecordId,
    ) -> Result<Vec<Repair>> {
        let request = self
            .authed(Method::GET, "repairs/", session)?
            .query(&[("machine_id", machine.as_str())]);
        self.fetch(request)
    }

    fn get_repair(&self, session: &Session, id: &RecordId) -> Result<Repair> {
        self.fetch(self.authed(Method::GET, &repair_path(id), session)?)
    }

    fn create_repair(&self, session: &Session, repair: &NewRepair) -> Result<Repair> {
        let request = self.authed(Method::POST, "repairs/", session)?.json(repair);
        self.fetch(request)
    }

    fn update_repair_price(
        &self,
        session: &Session,
        id: &RecordId,
        update: &PriceUpdate,
    ) -> Result<Repair> {
        let request = self
            .authed(Method::PUT, &repair_path(id), session)?
            .json(update);
        self.fetch(request)
    }

    fn delete_repair(&self, session: &Session, id: &RecordId) -> Result<()> {
        self.execute(self.authed(Method::DELETE, &repair_path(id), session)?)
    }

    fn list_repair_types(&self, session: &Session) -> Result<Vec<RepairType>> {
        self.fetch(self.authed(Method::GET, "repair-types/", session)?)
    }
}

fn repair_path(id: &RecordId) -> String {
    format!("repairs/{}/", id)
}
