//! Mapping from function keys to backend product ids.

use std::collections::HashMap;

use tracing::info;

use crate::auth::Credential;
use crate::config::ClientConfig;
use crate::fetch::fetch_table;
use crate::http_client::HttpClient;
use crate::{Cell, LookupError, OwlError, Table};

/// Function key to product id lookup, loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    products: HashMap<String, String>,
}

impl ProductCatalog {
    /// Reads the first column as the key and the second as the product id.
    ///
    /// Rows with a blank key or id are skipped.
    pub fn from_table(table: &Table) -> Self {
        let products = table
            .rows()
            .iter()
            .filter_map(|cells| {
                let key = cells.first().and_then(Cell::to_token)?;
                let product_id = cells.get(1).and_then(Cell::to_token)?;
                (!key.is_empty() && !product_id.is_empty()).then_some((key, product_id))
            })
            .collect();
        Self { products }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            products: pairs
                .into_iter()
                .map(|(key, product_id)| (key.into(), product_id.into()))
                .collect(),
        }
    }

    pub fn product_id(&self, key: &str) -> Result<&str, LookupError> {
        self.products
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| LookupError::UnknownProduct {
                key: key.to_owned(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.products.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Fetches the catalog table named by the configured catalog product id.
pub async fn load_catalog(
    http: &dyn HttpClient,
    config: &ClientConfig,
    credential: &Credential,
) -> Result<ProductCatalog, OwlError> {
    let url = config.product_url(config.catalog_product_id());
    let table = fetch_table(http, &url, credential, config.timeout_ms()).await?;
    let catalog = ProductCatalog::from_table(&table);
    info!(products = catalog.len(), "loaded product catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpResponse;
    use crate::test_support::{table_body, RecordingHttpClient};

    #[test]
    fn unknown_key_is_a_lookup_error() {
        let catalog = ProductCatalog::from_pairs([("ssp", "A00101")]);
        assert_eq!(catalog.product_id("ssp").expect("known key"), "A00101");
        let err = catalog.product_id("zzz").expect_err("must fail");
        assert_eq!(
            err,
            LookupError::UnknownProduct {
                key: String::from("zzz")
            }
        );
    }

    #[tokio::test]
    async fn loads_catalog_from_configured_product() {
        let config = ClientConfig::new()
            .with_data_url("https://example.test/json")
            .with_catalog_product_id("CTL-1");
        let http = RecordingHttpClient::default().route(
            "https://example.test/json/CTL-1",
            HttpResponse::ok_json(table_body(
                &["函數", "產品代號"],
                &[&["ssp", "A00101"], &["date_d", "D00001"], &["", "X"]],
            )),
        );

        let catalog = load_catalog(&http, &config, &Credential::new("t"))
            .await
            .expect("catalog loads");

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("date_d"));
    }
}
