//! OAuth for the Drive API: client secrets, a JSON token cache, refresh and
//! the installed-app consent flow over a loopback redirect.

use chrono::{DateTime, Duration, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::error::{DriveError, Result};

pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

// Treat tokens this close to expiry as already expired.
const EXPIRY_SKEW_SECS: i64 = 60;

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// OAuth client from the Google Cloud console `credentials.json`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Deserialize)]
struct CredentialsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        let file: CredentialsFile =
            serde_json::from_slice(raw).map_err(|e| DriveError::json("credentials file", e))?;
        file.installed.or(file.web).ok_or(DriveError::MissingClient)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| DriveError::io(format!("reading {}", path.display()), e))?;
        Self::from_json(&raw)
    }
}

/// Cached token, persisted as JSON between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Token endpoint reply
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl StoredToken {
    /// A token without an expiry is trusted until the API rejects it.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at - Duration::seconds(EXPIRY_SKEW_SECS) > now,
            None => true,
        }
    }

    /// Refresh replies usually omit the refresh token; keep the previous one then.
    pub fn from_response(
        response: TokenResponse,
        previous_refresh_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh_token),
            expires_at: response.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

/// Missing file = nothing cached. An unreadable cache is ignored so the consent flow can replace it.
pub async fn load_token(path: &Path) -> Result<Option<StoredToken>> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(DriveError::io(format!("reading {}", path.display()), e)),
    };

    match serde_json::from_slice(&raw) {
        Ok(token) => Ok(Some(token)),
        Err(e) => {
            tracing::warn!("Ignoring unreadable token cache {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

pub async fn save_token(path: &Path, token: &StoredToken) -> Result<()> {
    let raw = serde_json::to_vec_pretty(token).map_err(|e| DriveError::json("token cache", e))?;
    tokio::fs::write(path, raw)
        .await
        .map_err(|e| DriveError::io(format!("writing {}", path.display()), e))
}

/// Hands out a usable access token, refreshing or re-consenting as needed
pub struct Authenticator {
    http: reqwest::Client,
    secrets: ClientSecrets,
    token_path: PathBuf,
}

impl Authenticator {
    pub fn new(http: reqwest::Client, secrets: ClientSecrets, token_path: PathBuf) -> Self {
        Self {
            http,
            secrets,
            token_path,
        }
    }

    pub async fn access_token(&self) -> Result<String> {
        let cached = load_token(&self.token_path).await?;

        let token = match cached {
            Some(token) if token.is_valid_at(Utc::now()) => {
                tracing::info!("🔑 Using cached Drive token from {}", self.token_path.display());
                return Ok(token.access_token);
            }
            Some(StoredToken {
                refresh_token: Some(refresh_token),
                ..
            }) => {
                tracing::info!("🔄 Cached Drive token expired, refreshing");
                self.refresh(&refresh_token).await?
            }
            _ => self.consent_flow().await?,
        };

        save_token(&self.token_path, &token).await?;
        Ok(token.access_token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<StoredToken> {
        let response = self
            .request_token(&[
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .await?;
        Ok(StoredToken::from_response(
            response,
            Some(refresh_token.to_string()),
            Utc::now(),
        ))
    }

    async fn consent_flow(&self) -> Result<StoredToken> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| DriveError::io("binding OAuth redirect listener", e))?;
        let port = listener
            .local_addr()
            .map_err(|e| DriveError::io("reading OAuth redirect port", e))?
            .port();
        let redirect_uri = format!("http://localhost:{}/", port);

        let consent_url = consent_url(&self.secrets, &redirect_uri)?;
        tracing::info!("🌐 Open this URL in a browser to authorize Drive access:\n{}", consent_url);

        let code = receive_auth_code(&listener).await?;
        let response = self
            .request_token(&[
                ("client_id", self.secrets.client_id.as_str()),
                ("client_secret", self.secrets.client_secret.as_str()),
                ("code", code.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .await?;
        Ok(StoredToken::from_response(response, None, Utc::now()))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .http
            .post(&self.secrets.token_uri)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

/// Consent page URL for the installed-app flow
pub fn consent_url(secrets: &ClientSecrets, redirect_uri: &str) -> Result<Url> {
    Url::parse_with_params(
        &secrets.auth_uri,
        &[
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", DRIVE_READONLY_SCOPE),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| DriveError::Authorization(format!("invalid auth_uri {}: {}", secrets.auth_uri, e)))
}

/// Pull `code` out of the redirect's request line, e.g. `GET /?code=4/abc&scope=... HTTP/1.1`.
/// `Ok(None)` means the request was something else (a favicon probe).
pub fn parse_redirect_request_line(line: &str) -> Result<Option<String>> {
    let target = line.split_whitespace().nth(1).unwrap_or("");
    let url = Url::parse(&format!("http://localhost{}", target))
        .map_err(|e| DriveError::Authorization(format!("unparseable redirect {:?}: {}", target, e)))?;

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => return Err(DriveError::Authorization(value.into_owned())),
            _ => {}
        }
    }
    Ok(code)
}

async fn receive_auth_code(listener: &TcpListener) -> Result<String> {
    loop {
        let (stream, _) = listener
            .accept()
            .await
            .map_err(|e| DriveError::io("accepting OAuth redirect", e))?;
        let (read_half, mut write_half) = stream.into_split();

        let mut request_line = String::new();
        BufReader::new(read_half)
            .read_line(&mut request_line)
            .await
            .map_err(|e| DriveError::io("reading OAuth redirect", e))?;

        let outcome = parse_redirect_request_line(&request_line);
        let reply: &[u8] = match &outcome {
            Ok(Some(_)) => b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\nAuthorization complete. You can close this tab.\r\n",
            Ok(None) => b"HTTP/1.1 404 Not Found\r\nConnection: close\r\n\r\n",
            Err(_) => b"HTTP/1.1 400 Bad Request\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\nAuthorization failed.\r\n",
        };
        if let Err(e) = write_half.write_all(reply).await {
            tracing::warn!("Could not answer OAuth redirect: {}", e);
        }

        if let Some(code) = outcome? {
            return Ok(code);
        }
    }
}
