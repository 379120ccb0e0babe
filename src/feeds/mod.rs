pub mod quote;
pub mod wallpaper;

use std::time::Duration;

use crate::error::{AppError, AppResult};

pub use quote::{Quote, load_quote, parse_quote};
pub use wallpaper::{
    WallpaperRotation, fallback_images, fetch_bing_archive, load_images, parse_bing_archive,
    parse_image_list, write_image_list,
};

const FEED_TIMEOUT: Duration = Duration::from_secs(8);

pub fn feed_client() -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("mhome/", env!("CARGO_PKG_VERSION")))
        .timeout(FEED_TIMEOUT)
        .build()
        .map_err(|source| AppError::http(source, "failed to build feed client"))
}

async fn get_text(client: &reqwest::Client, url: &str) -> AppResult<String> {
    client
        .get(url)
        .send()
        .await
        .map_err(|source| AppError::http(source, format!("GET {url}")))?
        .error_for_status()
        .map_err(|source| AppError::http(source, format!("GET {url}")))?
        .text()
        .await
        .map_err(|source| AppError::http(source, format!("reading body of {url}")))
}
