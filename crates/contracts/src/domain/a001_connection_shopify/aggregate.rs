use serde::{Deserialize, Serialize};

/// Подключение к Shopify Admin API.
///
/// Explicit client handle: endpoint, token and API version travel together
/// instead of living in process-wide environment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyConnection {
    /// Домен магазина, например "my-shop.myshopify.com"
    pub shop_domain: String,

    /// Admin API access token (X-Shopify-Access-Token)
    pub api_token: String,

    /// Версия Admin API, например "2024-04"
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    "2024-04".to_string()
}

impl ShopifyConnection {
    /// GraphQL endpoint URL for this connection.
    pub fn graphql_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop_domain, self.api_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_url() {
        let conn = ShopifyConnection {
            shop_domain: "my-shop.myshopify.com".to_string(),
            api_token: "shpat_test".to_string(),
            api_version: "2024-04".to_string(),
        };
        assert_eq!(
            conn.graphql_url(),
            "https://my-shop.myshopify.com/admin/api/2024-04/graphql.json"
        );
    }

    #[test]
    fn test_api_version_defaults_when_missing() {
        let conn: ShopifyConnection = serde_json::from_str(
            r#"{"shop_domain":"s.myshopify.com","api_token":"t"}"#,
        )
        .unwrap();
        assert_eq!(conn.api_version, "2024-04");
    }
}
