use serde::{Deserialize, Serialize};

/// Товар каталога Shopify в том виде, в котором его возвращает GraphQL API.
///
/// Read-only snapshot for one sync run; nothing here is persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Opaque remote id (gid://shopify/Product/...)
    pub id: String,

    /// Теги товара (порядок не гарантируется)
    pub tags: Vec<String>,

    /// Метаполя из namespace "custom"
    pub metafields: Vec<Metafield>,

    /// Варианты в порядке, возвращённом сервером
    pub variants: Vec<ProductVariant>,

    /// Сервер сообщил, что у товара больше вариантов, чем уместилось
    /// в одну страницу (100) — обработана только первая страница.
    #[serde(default)]
    pub variants_truncated: bool,
}

impl CatalogProduct {
    /// Value of the metafield with the given key, if present.
    pub fn metafield_value(&self, key: &str) -> Option<&str> {
        self.metafields
            .iter()
            .find(|m| m.key == key)
            .map(|m| m.value.as_str())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Метаполе товара (key/value, значение всегда строка)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metafield {
    pub key: String,
    pub value: String,
}

/// Вариант товара. Title служит ключом в таблице надбавок.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Opaque remote id (gid://shopify/ProductVariant/...)
    pub id: String,

    /// Отображаемое название варианта, например "Small" или "45cm"
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> CatalogProduct {
        CatalogProduct {
            id: "gid://shopify/Product/1".to_string(),
            tags: vec!["bracelet".to_string(), "CHAINE_UPDATE".to_string()],
            metafields: vec![Metafield {
                key: "base_price".to_string(),
                value: "10.00".to_string(),
            }],
            variants: vec![],
            variants_truncated: false,
        }
    }

    #[test]
    fn test_metafield_lookup() {
        let p = product();
        assert_eq!(p.metafield_value("base_price"), Some("10.00"));
        assert_eq!(p.metafield_value("missing"), None);
    }

    #[test]
    fn test_has_tag_is_exact() {
        let p = product();
        assert!(p.has_tag("bracelet"));
        assert!(!p.has_tag("brace"));
    }
}
