use contracts::domain::a002_catalog_product::CatalogProduct;
use contracts::domain::a003_surcharge_table::{Category, SurchargeTable};

/// Ключ метаполя с базовой ценой (namespace "custom")
pub const BASE_PRICE_METAFIELD: &str = "base_price";

/// Почему товар исключён из пересчёта цен. Это не ошибка:
/// такой товар логируется и пропускается.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Нет ни тега "bracelet", ни "collier"
    NoCategory,

    /// Метаполе base_price отсутствует или не является числом
    NoBasePrice,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::NoCategory => "no bracelet/collier tag",
            SkipReason::NoBasePrice => "no base_price",
        }
    }
}

/// Целевая цена одного варианта.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantPrice {
    pub variant_id: String,
    pub variant_title: String,
    pub price: f64,
}

/// Базовая цена товара из метаполя base_price.
pub fn base_price(product: &CatalogProduct) -> Option<f64> {
    let raw = product.metafield_value(BASE_PRICE_METAFIELD)?;
    let parsed: f64 = raw.trim().parse().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

/// Округление до цента, half-up для неотрицательных значений.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Целевые цены всех вариантов товара, либо причина пропуска.
///
/// Pure function: no I/O, identical inputs always yield identical output.
/// Surcharges come only from the resolved category's sub-table; a variant
/// title missing there contributes a surcharge of 0.
pub fn compute_target_prices(
    product: &CatalogProduct,
    surcharges: &SurchargeTable,
) -> Result<Vec<VariantPrice>, SkipReason> {
    let category = Category::from_tags(&product.tags).ok_or(SkipReason::NoCategory)?;
    let base = base_price(product).ok_or(SkipReason::NoBasePrice)?;

    Ok(product
        .variants
        .iter()
        .map(|variant| VariantPrice {
            variant_id: variant.id.clone(),
            variant_title: variant.title.clone(),
            price: round_to_cents(base + surcharges.surcharge_for(category, &variant.title)),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_catalog_product::{Metafield, ProductVariant};

    fn product(tags: &[&str], base: Option<&str>, variants: &[(&str, &str)]) -> CatalogProduct {
        CatalogProduct {
            id: "gid://shopify/Product/1".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            metafields: base
                .map(|v| {
                    vec![Metafield {
                        key: BASE_PRICE_METAFIELD.to_string(),
                        value: v.to_string(),
                    }]
                })
                .unwrap_or_default(),
            variants: variants
                .iter()
                .map(|(id, title)| ProductVariant {
                    id: id.to_string(),
                    title: title.to_string(),
                })
                .collect(),
            variants_truncated: false,
        }
    }

    fn table() -> SurchargeTable {
        serde_json::from_str(r#"{"bracelet":{"Small":2.5},"collier":{"Small":99.0}}"#).unwrap()
    }

    #[test]
    fn test_bracelet_precedence_over_collier() {
        let p = product(&["collier", "bracelet"], Some("10.00"), &[("V1", "Small")]);
        let prices = compute_target_prices(&p, &table()).unwrap();
        // bracelet surcharge (2.5), never the collier one (99.0)
        assert_eq!(prices[0].price, 12.50);
    }

    #[test]
    fn test_no_category_skip() {
        let p = product(&["necklace"], Some("10.00"), &[("V1", "Small")]);
        assert_eq!(
            compute_target_prices(&p, &table()),
            Err(SkipReason::NoCategory)
        );
    }

    #[test]
    fn test_missing_base_price_skip() {
        let p = product(&["bracelet"], None, &[("V1", "Small")]);
        assert_eq!(
            compute_target_prices(&p, &table()),
            Err(SkipReason::NoBasePrice)
        );
    }

    #[test]
    fn test_unparsable_base_price_skip() {
        let p = product(&["bracelet"], Some("abc"), &[("V1", "Small")]);
        assert_eq!(
            compute_target_prices(&p, &table()),
            Err(SkipReason::NoBasePrice)
        );
    }

    #[test]
    fn test_missing_variant_title_surcharge_defaults_to_zero() {
        let p = product(&["bracelet"], Some("10.00"), &[("V1", "Unknown")]);
        let prices = compute_target_prices(&p, &table()).unwrap();
        assert_eq!(prices[0].price, 10.00);
    }

    #[test]
    fn test_rounding_half_up() {
        // 12.375 is exactly representable, so *100 gives an exact .5 case
        assert_eq!(round_to_cents(12.375), 12.38);
        assert_eq!(round_to_cents(12.374), 12.37);
        assert_eq!(round_to_cents(12.376), 12.38);
        assert_eq!(round_to_cents(10.0 + 2.5), 12.50);
        assert_eq!(round_to_cents(0.0), 0.0);
    }

    #[test]
    fn test_price_non_negative_for_non_negative_inputs() {
        let p = product(&["bracelet"], Some("0.00"), &[("V1", "Unknown")]);
        let prices = compute_target_prices(&p, &table()).unwrap();
        assert!(prices[0].price >= 0.0);
    }

    #[test]
    fn test_idempotent() {
        let p = product(&["bracelet"], Some("10.00"), &[("V1", "Small"), ("V2", "Other")]);
        let t = table();
        assert_eq!(
            compute_target_prices(&p, &t).unwrap(),
            compute_target_prices(&p, &t).unwrap()
        );
    }

    #[test]
    fn test_end_to_end_p1_scenario() {
        let p = product(&["bracelet"], Some("10.00"), &[("V1", "Small")]);
        let prices = compute_target_prices(&p, &table()).unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].variant_id, "V1");
        assert_eq!(prices[0].price, 12.50);
    }
}
