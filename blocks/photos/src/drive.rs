use serde::Deserialize;
use std::future::Future;

use crate::error::{DriveError, Result};
use crate::manifest::PhotoSource;

pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

const LIST_FIELDS: &str = "nextPageToken, files(id, name)";
const PAGE_SIZE: &str = "1000";

/// One entry of a Drive `files.list` page
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

// Drive query string literals are single-quoted with backslash escapes.
fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Folder lookup by exact name, optionally restricted to one parent folder
pub fn folder_query(folder_name: &str, parent_id: Option<&str>) -> String {
    let mut query = format!(
        "name='{}' and mimeType='{}'",
        escape_query_literal(folder_name),
        FOLDER_MIME_TYPE
    );
    if let Some(parent_id) = parent_id {
        query.push_str(&format!(" and '{}' in parents", escape_query_literal(parent_id)));
    }
    query
}

/// Image files directly inside a folder
pub fn images_query(folder_id: &str) -> String {
    format!(
        "'{}' in parents and mimeType contains 'image/'",
        escape_query_literal(folder_id)
    )
}

/// Drive v3 client authenticated with a bearer token
pub struct DriveClient {
    http: reqwest::Client,
    access_token: String,
    files_url: String,
}

impl DriveClient {
    pub fn new(http: reqwest::Client, access_token: String) -> Self {
        Self::with_files_url(http, access_token, DRIVE_FILES_URL.to_string())
    }

    pub fn with_files_url(http: reqwest::Client, access_token: String, files_url: String) -> Self {
        Self {
            http,
            access_token,
            files_url,
        }
    }

    /// Every file matching `query`, following `nextPageToken` to the end
    pub async fn list_files(&self, query: &str) -> Result<Vec<DriveFile>> {
        collect_pages(|page_token| self.fetch_page(query, page_token)).await
    }

    async fn fetch_page(&self, query: &str, page_token: Option<String>) -> Result<FileList> {
        let mut request = self
            .http
            .get(&self.files_url)
            .bearer_auth(&self.access_token)
            .query(&[("q", query), ("fields", LIST_FIELDS), ("pageSize", PAGE_SIZE)]);
        if let Some(token) = &page_token {
            request = request.query(&[("pageToken", token.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let page: FileList = response.json().await?;
        tracing::debug!("📄 Drive page: {} files for {}", page.files.len(), query);
        Ok(page)
    }
}

/// Request pages until one comes back without a (non-empty) `nextPageToken`.
/// The first request carries no token; each later one carries the previous page's.
async fn collect_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<DriveFile>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<FileList>>,
{
    let mut files = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = fetch_page(page_token.take()).await?;
        files.extend(page.files);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    Ok(files)
}

impl PhotoSource for DriveClient {
    async fn find_folder(&self, folder_name: &str) -> Result<Option<String>> {
        let folders = self.list_files(&folder_query(folder_name, None)).await?;
        Ok(folders.into_iter().next().map(|folder| folder.id))
    }

    async fn list_images(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        self.list_files(&images_query(folder_id)).await
    }
}
