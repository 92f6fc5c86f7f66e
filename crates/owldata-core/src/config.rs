//! Client configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OWLDATA_APP_ID` | (required) | Application id issued by Owl Data |
//! | `OWLDATA_APP_SECRET` | (required) | Application secret |
//! | `OWLDATA_TOKEN_URL` | [`DEFAULT_TOKEN_URL`] | Token exchange endpoint |
//! | `OWLDATA_DATA_URL` | [`DEFAULT_DATA_URL`] | Base URL of the JSON data API |
//! | `OWLDATA_CATALOG_ID` | [`DEFAULT_CATALOG_PRODUCT_ID`] | Product id of the function catalog |
//! | `OWLDATA_TIMEOUT_MS` | [`DEFAULT_TIMEOUT_MS`] | Per-request timeout |

use std::env;
use std::fmt::{Debug, Formatter};

use crate::ValidationError;

pub const DEFAULT_TOKEN_URL: &str = "https://owl.cmoney.com.tw/OwlApi/auth";
pub const DEFAULT_DATA_URL: &str = "https://owl.cmoney.com.tw/OwlApi/api/v2/json/";
pub const DEFAULT_CATALOG_PRODUCT_ID: &str = "PYCtrl-14882b";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Endpoints and transport settings for one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    token_url: String,
    data_url: String,
    catalog_product_id: String,
    timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_url: String::from(DEFAULT_TOKEN_URL),
            data_url: String::from(DEFAULT_DATA_URL),
            catalog_product_id: String::from(DEFAULT_CATALOG_PRODUCT_ID),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by any `OWLDATA_*` variables that are set.
    pub fn from_env() -> Result<Self, ValidationError> {
        let mut config = Self::default();
        if let Ok(url) = env::var("OWLDATA_TOKEN_URL") {
            config = config.with_token_url(url);
        }
        if let Ok(url) = env::var("OWLDATA_DATA_URL") {
            config = config.with_data_url(url);
        }
        if let Ok(product_id) = env::var("OWLDATA_CATALOG_ID") {
            config = config.with_catalog_product_id(product_id);
        }
        if let Ok(raw) = env::var("OWLDATA_TIMEOUT_MS") {
            let timeout_ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidConfig {
                    key: "OWLDATA_TIMEOUT_MS",
                    value: raw.clone(),
                })?;
            config = config.with_timeout_ms(timeout_ms);
        }
        Ok(config)
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Sets the data base URL; a trailing `/` is added when missing.
    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.data_url = url;
        self
    }

    pub fn with_catalog_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.catalog_product_id = product_id.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn catalog_product_id(&self) -> &str {
        &self.catalog_product_id
    }

    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// URL of a product addressed directly by id, without a date segment.
    pub fn product_url(&self, product_id: &str) -> String {
        format!("{}{}", self.data_url, product_id)
    }
}

/// Application id and secret exchanged for a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
    app_id: String,
    app_secret: String,
}

impl AppCredentials {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let app_id = app_id.into();
        let app_secret = app_secret.into();
        if app_id.trim().is_empty() || app_secret.trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(Self { app_id, app_secret })
    }

    pub fn from_env() -> Result<Self, ValidationError> {
        let app_id = env::var("OWLDATA_APP_ID").unwrap_or_default();
        let app_secret = env::var("OWLDATA_APP_SECRET").unwrap_or_default();
        Self::new(app_id, app_secret)
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// `appId=..&appSecret=..` form body for the token endpoint.
    pub fn form_body(&self) -> String {
        format!(
            "appId={}&appSecret={}",
            urlencoding::encode(&self.app_id),
            urlencoding::encode(&self.app_secret)
        )
    }
}

impl Debug for AppCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}
