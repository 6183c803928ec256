//! HTTP client for the external auth backend
//!
//! `POST {base}/auth/login` with `{email, password}`; a 2xx reply carries
//! `{user: {email, name, role?}}`. 401/403 mean the credentials were rejected.

use crate::domain::backend::{BackendUser, CredentialBackend};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct HttpCredentialBackend {
    client: reqwest::Client,
    login_url: String,
}

impl HttpCredentialBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build auth backend HTTP client")?;

        Ok(Self {
            client,
            login_url: format!("{}/auth/login", base_url.trim_end_matches('/')),
        })
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    user: RemoteUser,
}

#[derive(Deserialize)]
struct RemoteUser {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

#[async_trait]
impl CredentialBackend for HttpCredentialBackend {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<BackendUser>> {
        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .context("auth backend request failed")?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(anyhow!("auth backend returned {}", status));
        }

        let body: LoginResponse = response
            .json()
            .await
            .context("auth backend returned a malformed body")?;

        Ok(Some(BackendUser {
            email: body.user.email,
            name: body.user.name.unwrap_or_default(),
            role: body.user.role,
        }))
    }
}
