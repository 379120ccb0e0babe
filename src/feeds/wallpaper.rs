use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

const FALLBACK_IMAGES: &str = include_str!("../../assets/images.json");

pub const BING_ARCHIVE_URL: &str = "https://www.bing.com/HPImageArchive.aspx";

pub fn parse_image_list(body: &str) -> AppResult<Vec<String>> {
    let images: Vec<String> = serde_json::from_str(body)
        .map_err(|source| AppError::json(source, "wallpaper list"))?;
    Ok(images
        .into_iter()
        .filter(|path| !path.trim().is_empty())
        .collect())
}

/// The list bundled at build time.
pub fn fallback_images() -> Vec<String> {
    parse_image_list(FALLBACK_IMAGES).unwrap_or_default()
}

/// Fetches the published list, using the bundled one on any failure.
pub async fn load_images(client: &reqwest::Client, url: Option<&str>) -> Vec<String> {
    let Some(url) = url else {
        return fallback_images();
    };
    match fetch_image_list(client, url).await {
        Ok(images) if !images.is_empty() => images,
        Ok(_) => {
            tracing::debug!(%url, "wallpaper feed is empty, using bundled list");
            fallback_images()
        }
        Err(err) => {
            tracing::debug!(%url, error = %err, "wallpaper feed unavailable, using bundled list");
            fallback_images()
        }
    }
}

async fn fetch_image_list(client: &reqwest::Client, url: &str) -> AppResult<Vec<String>> {
    let body = super::get_text(client, url).await?;
    parse_image_list(&body)
}

#[derive(Debug, Deserialize)]
struct BingArchive {
    images: Vec<BingImage>,
}

#[derive(Debug, Deserialize)]
struct BingImage {
    url: String,
}

pub fn parse_bing_archive(body: &str) -> AppResult<Vec<String>> {
    let archive: BingArchive = serde_json::from_str(body)
        .map_err(|source| AppError::json(source, "bing image archive"))?;
    Ok(archive.images.into_iter().map(|image| image.url).collect())
}

pub async fn fetch_bing_archive(client: &reqwest::Client, count: usize) -> AppResult<Vec<String>> {
    let url = format!("{BING_ARCHIVE_URL}?format=js&idx=0&n={}", count.clamp(1, 8));
    let body = super::get_text(client, &url).await?;
    parse_bing_archive(&body)
}

/// Writes `images` as a pretty JSON array followed by a newline.
pub fn write_image_list(path: &Path, images: &[String]) -> AppResult<()> {
    let mut body = serde_json::to_string_pretty(images)
        .map_err(|source| AppError::json(source, "wallpaper list"))?;
    body.push('\n');
    fs::write(path, body).map_err(|source| {
        AppError::io_with_context(source, format!("failed to write {}", path.display()))
    })
}

/// Cycles through wallpaper paths, resolved against `host`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallpaperRotation {
    host: String,
    images: Vec<String>,
    index: usize,
}

impl WallpaperRotation {
    pub fn new(host: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            host: host.into(),
            images,
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_url(&self) -> Option<String> {
        let path = self.images.get(self.index)?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.clone());
        }
        Some(format!("{}{}", self.host.trim_end_matches('/'), path))
    }

    pub fn advance(&mut self) -> Option<String> {
        if self.images.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.images.len();
        self.current_url()
    }
}
