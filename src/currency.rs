use std::collections::HashMap;

use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Currencies offered in the `price` dropdowns, with Portuguese display names.
pub const CURRENCIES: &[(&str, &str)] = &[
    ("USD", "Dólar Americano"),
    ("EUR", "Euro"),
    ("GBP", "Libra Esterlina"),
    ("JPY", "Iene Japonês"),
    ("AUD", "Dólar Australiano"),
    ("CAD", "Dólar Canadense"),
    ("BRL", "Real"),
];

pub fn currency_name(code: &str) -> Option<&'static str> {
    CURRENCIES
        .iter()
        .find(|(currency, _)| *currency == code)
        .map(|(_, name)| *name)
}

/// Client for the Frankfurter exchange-rate API.
pub struct CurrencyClient {
    http: reqwest::Client,
    base_url: String,
}

impl CurrencyClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Fetches the latest rate table for converting `from` into `to`.
    pub async fn latest(&self, from: &str, to: &str) -> anyhow::Result<RateTable> {
        let url = format!("{}/latest", self.base_url);
        let table = self
            .http
            .get(&url)
            .query(&[("from", from), ("to", to)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(table)
    }
}

#[derive(Deserialize, Debug)]
pub struct RateTable {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rate_table_lookup() {
        let table: RateTable = serde_json::from_value(json!({
            "amount": 1.0,
            "base": "USD",
            "date": "2025-01-24",
            "rates": { "BRL": 5.43 }
        }))
        .unwrap();
        assert_eq!(table.rate("BRL"), Some(5.43));
        assert_eq!(table.rate("EUR"), None);
    }

    #[test]
    fn test_currency_names() {
        assert_eq!(currency_name("USD"), Some("Dólar Americano"));
        assert_eq!(currency_name("BRL"), Some("Real"));
        assert_eq!(currency_name("SEK"), None);
    }
}
