//! Session-holding query facade.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tracing::debug;

use crate::auth::{authenticate, Credential};
use crate::calendar::CalendarCache;
use crate::catalog::{load_catalog, ProductCatalog};
use crate::config::{AppCredentials, ClientConfig};
use crate::domain::period::validate_token;
use crate::fetch::fetch_table;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::normalize::{normalize, Normalized, Projection};
use crate::operation::{build_url, Operation, UrlParams, UrlShape};
use crate::resolver::{count_in_range, validate_range, PeriodRange};
use crate::{Granularity, OwlError, StockId, Table, ValidationError};

/// Arguments for one query; which fields are required depends on the call shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub sid: Option<StockId>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub date: Option<String>,
    pub projection: Projection,
}

impl QueryRequest {
    /// One stock over an inclusive `[start, end]` range.
    pub fn history(sid: StockId, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            sid: Some(sid),
            start: Some(start.into()),
            end: Some(end.into()),
            ..Self::default()
        }
    }

    /// Every stock on one period.
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn listing() -> Self {
        Self::default()
    }

    pub fn snapshot(sid: StockId) -> Self {
        Self {
            sid: Some(sid),
            ..Self::default()
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

/// An authenticated session: bearer credential, product catalog and calendar cache.
#[derive(Clone)]
pub struct OwlClient {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
    credential: Credential,
    catalog: ProductCatalog,
    calendars: CalendarCache,
}

impl Debug for OwlClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwlClient")
            .field("config", &self.config)
            .field("credential", &self.credential)
            .field("products", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl OwlClient {
    /// Builds a client from an already established session.
    pub fn new(
        http: Arc<dyn HttpClient>,
        config: ClientConfig,
        credential: Credential,
        catalog: ProductCatalog,
    ) -> Self {
        Self {
            http,
            config,
            credential,
            catalog,
            calendars: CalendarCache::new(),
        }
    }

    /// Authenticates, then loads the product catalog.
    pub async fn connect(
        http: Arc<dyn HttpClient>,
        config: ClientConfig,
        credentials: &AppCredentials,
    ) -> Result<Self, OwlError> {
        let credential = authenticate(http.as_ref(), &config, credentials).await?;
        let catalog = load_catalog(http.as_ref(), &config, &credential).await?;
        Ok(Self::new(http, config, credential, catalog))
    }

    /// Connects over reqwest using `OWLDATA_*` environment variables.
    pub async fn connect_from_env() -> Result<Self, OwlError> {
        let config = ClientConfig::from_env()?;
        let credentials = AppCredentials::from_env()?;
        Self::connect(Arc::new(ReqwestHttpClient::new()), config, &credentials).await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn calendars(&self) -> &CalendarCache {
        &self.calendars
    }

    pub fn product_id(&self, key: &str) -> Result<&str, OwlError> {
        Ok(self.catalog.product_id(key)?)
    }

    /// Fetches a raw table from an absolute URL with the session token.
    pub async fn fetch(&self, url: &str) -> Result<Table, OwlError> {
        Ok(fetch_table(
            self.http.as_ref(),
            url,
            &self.credential,
            self.config.timeout_ms(),
        )
        .await?)
    }

    /// Reference calendar for `granularity`, fetched on first use.
    pub async fn calendar(&self, granularity: Granularity) -> Result<Arc<Table>, OwlError> {
        self.calendars
            .get_or_load(granularity, move || async move {
                let product_id = self.product_id(granularity.calendar_key())?;
                self.fetch(&self.config.product_url(product_id)).await
            })
            .await
    }

    /// Number of calendar periods in the inclusive range `[start, end]`.
    ///
    /// Malformed tokens and reversed ranges fail before any request is made.
    pub async fn resolve_range(
        &self,
        start: &str,
        end: &str,
        granularity: Granularity,
    ) -> Result<usize, OwlError> {
        let range = validate_range(start, end, granularity)?;
        self.count_periods(&range).await
    }

    /// Number of calendar periods in an already validated range.
    pub async fn count_periods(&self, range: &PeriodRange) -> Result<usize, OwlError> {
        let calendar = self.calendar(range.granularity).await?;
        let count = count_in_range(&calendar, range);
        debug!(
            granularity = %range.granularity,
            start = %range.start,
            end = %range.end,
            count,
            "resolved range"
        );
        Ok(count)
    }

    /// Runs any call shape from the descriptor table.
    pub async fn execute(
        &self,
        operation: Operation,
        request: &QueryRequest,
    ) -> Result<Normalized, OwlError> {
        let spec = operation.spec();
        request.projection.validate()?;

        let missing = |field: &'static str| ValidationError::MissingArgument {
            operation: spec.name,
            field,
        };
        let sid = match (spec.shape.needs_stock_id(), &request.sid) {
            (true, None) => return Err(missing("a stock id").into()),
            (true, Some(sid)) => Some(sid.as_str()),
            (false, _) => None,
        };

        let product_id = self.product_id(spec.product_key)?;
        let url = match spec.shape {
            UrlShape::History { granularity, .. } => {
                let start = request.start.as_deref().ok_or_else(|| missing("a start period"))?;
                let end = request.end.as_deref().ok_or_else(|| missing("an end period"))?;
                let range = validate_range(start, end, granularity)?;
                let count = self.count_periods(&range).await?;
                let params = UrlParams {
                    date: Some(&range.end),
                    sid,
                    count: Some(count),
                };
                build_url(self.config.data_url(), spec.shape, product_id, &params)
            }
            UrlShape::CrossSection { granularity, .. } => {
                let date = request.date.as_deref().ok_or_else(|| missing("a date"))?.trim();
                validate_token(date, granularity)?;
                let params = UrlParams {
                    date: Some(date),
                    ..UrlParams::default()
                };
                build_url(self.config.data_url(), spec.shape, product_id, &params)
            }
            UrlShape::Listing | UrlShape::Snapshot => {
                let params = UrlParams {
                    sid,
                    ..UrlParams::default()
                };
                build_url(self.config.data_url(), spec.shape, product_id, &params)
            }
        };

        debug!(operation = spec.name, product_id, url = %url, "executing query");
        let table = self.fetch(&url).await?;
        Ok(normalize(
            table,
            spec.freq,
            spec.numeric,
            &request.projection,
            product_id,
        )?)
    }

    async fn history(
        &self,
        operation: Operation,
        sid: &str,
        start: &str,
        end: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        let request =
            QueryRequest::history(StockId::parse(sid)?, start, end).with_projection(projection);
        self.execute(operation, &request).await
    }

    async fn cross_section(
        &self,
        operation: Operation,
        date: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        let request = QueryRequest::on(date).with_projection(projection);
        self.execute(operation, &request).await
    }

    /// Daily prices for one stock between two `yyyymmdd` days.
    pub async fn ssp(
        &self,
        sid: &str,
        start: &str,
        end: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        self.history(Operation::Ssp, sid, start, end, projection).await
    }

    /// Prices for every stock on one `yyyymmdd` day.
    pub async fn msp(&self, date: &str, projection: Projection) -> Result<Normalized, OwlError> {
        self.cross_section(Operation::Msp, date, projection).await
    }

    /// Financial statements (year, quarter) or revenue (month) for one stock.
    pub async fn fis(
        &self,
        sid: &str,
        granularity: Granularity,
        start: &str,
        end: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        let operation = Operation::financials(granularity).ok_or_else(|| {
            ValidationError::InvalidGranularity {
                value: granularity.as_str().to_owned(),
            }
        })?;
        self.history(operation, sid, start, end, projection).await
    }

    /// Financial statements or revenue for every stock on one period.
    pub async fn fim(
        &self,
        granularity: Granularity,
        date: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        let operation = Operation::cross_section_financials(granularity).ok_or_else(|| {
            ValidationError::InvalidGranularity {
                value: granularity.as_str().to_owned(),
            }
        })?;
        self.cross_section(operation, date, projection).await
    }

    pub async fn chs(
        &self,
        sid: &str,
        start: &str,
        end: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        self.history(Operation::Chs, sid, start, end, projection).await
    }

    pub async fn chm(&self, date: &str, projection: Projection) -> Result<Normalized, OwlError> {
        self.cross_section(Operation::Chm, date, projection).await
    }

    pub async fn tis(
        &self,
        sid: &str,
        start: &str,
        end: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        self.history(Operation::Tis, sid, start, end, projection).await
    }

    pub async fn tim(&self, date: &str, projection: Projection) -> Result<Normalized, OwlError> {
        self.cross_section(Operation::Tim, date, projection).await
    }

    /// Company information for every listed stock.
    pub async fn cim(&self, projection: Projection) -> Result<Normalized, OwlError> {
        let request = QueryRequest::listing().with_projection(projection);
        self.execute(Operation::Cim, &request).await
    }

    /// Dividend policy for one stock between two `yyyy` years.
    pub async fn dps(
        &self,
        sid: &str,
        start: &str,
        end: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        self.history(Operation::Dps, sid, start, end, projection).await
    }

    pub async fn dpm(&self, year: &str, projection: Projection) -> Result<Normalized, OwlError> {
        self.cross_section(Operation::Dpm, year, projection).await
    }

    pub async fn edps(
        &self,
        sid: &str,
        start: &str,
        end: &str,
        projection: Projection,
    ) -> Result<Normalized, OwlError> {
        self.history(Operation::Edps, sid, start, end, projection).await
    }

    pub async fn edpm(&self, year: &str, projection: Projection) -> Result<Normalized, OwlError> {
        self.cross_section(Operation::Edpm, year, projection).await
    }

    /// Latest real-time quote for one stock.
    pub async fn tsp(&self, sid: &str, projection: Projection) -> Result<Normalized, OwlError> {
        let request = QueryRequest::snapshot(StockId::parse(sid)?).with_projection(projection);
        self.execute(Operation::Tsp, &request).await
    }
}
