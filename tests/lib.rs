//! Shared fixtures for owldata behavior tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use owldata_core::{
    ClientConfig, Credential, HttpClient, HttpError, HttpRequest, HttpResponse, OwlClient,
    ProductCatalog,
};

pub const BASE_URL: &str = "https://owl.test/json/";
pub const TOKEN_URL: &str = "https://owl.test/auth";
pub const CATALOG_ID: &str = "CTL-0";

/// Transport double answering by URL and recording every request.
///
/// URLs without a scripted response get a 404.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: HashMap<String, HttpResponse>,
    failing: HashMap<String, String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    /// Scripts a 200 response carrying a `{Title, Data}` table.
    pub fn table(self, url: impl Into<String>, columns: &[&str], rows: &[&[&str]]) -> Self {
        self.route(url, HttpResponse::ok_json(table_body(columns, rows)))
    }

    pub fn fail(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.failing.insert(url.into(), message.into());
        self
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn recorded_urls(&self) -> Vec<String> {
        self.recorded_requests()
            .into_iter()
            .map(|request| request.url)
            .collect()
    }

    pub fn count_requests_to(&self, url: &str) -> usize {
        self.recorded_urls().iter().filter(|seen| *seen == url).count()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = match self.failing.get(&request.url) {
            Some(message) => Err(HttpError::new(message.clone())),
            None => Ok(self
                .routes
                .get(&request.url)
                .cloned()
                .unwrap_or_else(|| HttpResponse::with_status(404, ""))),
        };
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { response })
    }
}

pub fn table_body(columns: &[&str], rows: &[&[&str]]) -> String {
    serde_json::json!({ "Title": columns, "Data": rows }).to_string()
}

pub fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

pub fn config() -> ClientConfig {
    ClientConfig::new()
        .with_token_url(TOKEN_URL)
        .with_data_url(BASE_URL)
        .with_catalog_product_id(CATALOG_ID)
}

/// Catalog rows as the backend returns them: function key, product id.
pub const CATALOG_ROWS: &[&[&str]] = &[
    &["date_d", "CAL-D"],
    &["date_m", "CAL-M"],
    &["date_q", "CAL-Q"],
    &["date_y", "CAL-Y"],
    &["ssp", "PD-SSP"],
    &["msp", "PD-MSP"],
    &["sby", "PD-SBY"],
    &["sbq", "PD-SBQ"],
    &["sbm", "PD-SBM"],
    &["mby", "PD-MBY"],
    &["mbq", "PD-MBQ"],
    &["mbm", "PD-MBM"],
    &["sch", "PD-SCH"],
    &["mch", "PD-MCH"],
    &["sth", "PD-STH"],
    &["mth", "PD-MTH"],
    &["mcm", "PD-MCM"],
    &["scm1", "PD-SCM1"],
    &["mcm1", "PD-MCM1"],
    &["scm2", "PD-SCM2"],
    &["mcm2", "PD-MCM2"],
    &["mnp", "PD-MNP"],
];

pub fn catalog() -> ProductCatalog {
    ProductCatalog::from_pairs(CATALOG_ROWS.iter().map(|row| (row[0], row[1])))
}

/// Day calendar `20190101..=20190105` plus the other granularities.
pub fn with_calendars(http: ScriptedHttpClient) -> ScriptedHttpClient {
    http.table(
        url("CAL-D"),
        &["日期"],
        &[&["20190101"], &["20190102"], &["20190103"], &["20190104"], &["20190105"]],
    )
    .table(
        url("CAL-M"),
        &["年月"],
        &[&["201811"], &["201812"], &["201901"], &["201902"]],
    )
    .table(
        url("CAL-Q"),
        &["年季"],
        &[&["201803"], &["201804"], &["201901"], &["201902"]],
    )
    .table(url("CAL-Y"), &["年度"], &[&["2016"], &["2017"], &["2018"]])
}

/// A client with an established session over `http`.
pub fn session(http: Arc<ScriptedHttpClient>) -> OwlClient {
    OwlClient::new(http, config(), Credential::new("session-token"), catalog())
}
