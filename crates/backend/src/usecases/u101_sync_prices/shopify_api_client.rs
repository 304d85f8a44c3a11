use async_trait::async_trait;
use contracts::domain::a001_connection_shopify::ShopifyConnection;
use contracts::domain::a002_catalog_product::{CatalogProduct, Metafield, ProductVariant};
use serde::Deserialize;
use serde_json::json;

/// Размер страницы товаров в одном GraphQL-запросе
pub const PRODUCT_PAGE_SIZE: u32 = 250;

/// Размер страницы вариантов внутри товара (вторая страница не запрашивается)
pub const VARIANT_PAGE_SIZE: u32 = 100;

const PRODUCTS_QUERY: &str = r#"
    query fetchProducts($cursor: String) {
      products(first: 250, query: "tag:CHAINE_UPDATE", after: $cursor) {
        pageInfo { hasNextPage endCursor }
        edges {
          node {
            id
            tags
            metafields(first: 10, namespace: "custom") {
              edges { node { key value } }
            }
            variants(first: 100) {
              pageInfo { hasNextPage }
              edges { node { id title } }
            }
          }
        }
      }
    }
"#;

const UPDATE_VARIANT_MUTATION: &str = r#"
    mutation updateVariant($id: ID!, $price: Money!) {
      productVariantUpdate(input: {id: $id, price: $price}) {
        productVariant { id price }
        userErrors { field message }
      }
    }
"#;

/// Ошибки обращения к каталогу Shopify.
///
/// Transport/Api/Decode are all fatal for a fetch; for a mutation they are
/// isolated to the variant being updated. Remote validation failures are not
/// represented here — see [`VariantUpdateOutcome::Rejected`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status or top-level GraphQL errors
    #[error("shopify API error: {0}")]
    Api(String),

    /// Ответ не соответствует ожидаемой схеме
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Ошибка валидации на стороне Shopify (userErrors мутации).
///
/// Приходит в успешном (2xx) ответе — это штатный исход, а не исключение.
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Исход мутации цены варианта.
#[derive(Debug, Clone)]
pub enum VariantUpdateOutcome {
    /// Цена обновлена; `price` — значение, которое вернул Shopify
    /// (оно авторитетно для лога, не локально вычисленное).
    Updated { id: String, price: String },

    /// Shopify отклонил мутацию со списком field errors
    Rejected(Vec<UserError>),
}

impl VariantUpdateOutcome {
    /// Joined userErrors messages, "" for the Updated branch.
    pub fn joined_errors(&self) -> String {
        match self {
            VariantUpdateOutcome::Updated { .. } => String::new(),
            VariantUpdateOutcome::Rejected(errors) => errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Операции каталога, которые нужны синхронизации цен.
///
/// Seam between the engine and the real HTTP client; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Все товары с тегом CHAINE_UPDATE, собранные по страницам.
    async fn fetch_tagged_products(&self) -> Result<Vec<CatalogProduct>, CatalogError>;

    /// Одна мутация цены одного варианта.
    async fn update_variant_price(
        &self,
        variant_id: &str,
        price: f64,
    ) -> Result<VariantUpdateOutcome, CatalogError>;
}

/// HTTP-клиент для Shopify Admin GraphQL API
pub struct ShopifyApiClient {
    client: reqwest::Client,
    connection: ShopifyConnection,
}

impl ShopifyApiClient {
    pub fn new(connection: ShopifyConnection) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            connection,
        }
    }

    /// Выполнить GraphQL-запрос и вернуть поле `data`.
    async fn gql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, CatalogError> {
        let response = self
            .client
            .post(self.connection.graphql_url())
            .header("X-Shopify-Access-Token", &self.connection.api_token)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Shopify API request failed with status {}: {}", status, body);
            return Err(CatalogError::Api(format!(
                "status {}: {}",
                status,
                preview(&body)
            )));
        }

        let body = response.text().await?;
        tracing::debug!("Shopify API response preview: {}", preview(&body));

        let envelope: GraphQlEnvelope = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Shopify API response: {}", e);
            CatalogError::Decode(format!("{}. Body: {}", e, preview(&body)))
        })?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let joined = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::error!("Shopify GraphQL errors: {}", joined);
                return Err(CatalogError::Api(joined));
            }
        }

        envelope
            .data
            .ok_or_else(|| CatalogError::Decode("response has no data field".to_string()))
    }

    /// Одна страница товаров, отфильтрованных по тегу на стороне сервера.
    async fn fetch_products_page(
        &self,
        cursor: Option<String>,
    ) -> Result<ProductsConnection, CatalogError> {
        let data = self.gql(PRODUCTS_QUERY, json!({ "cursor": cursor })).await?;
        let data: ProductsData =
            serde_json::from_value(data).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(data.products)
    }
}

#[async_trait]
impl CatalogApi for ShopifyApiClient {
    async fn fetch_tagged_products(&self) -> Result<Vec<CatalogProduct>, CatalogError> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;

        // Курсор строго движется вперёд; страница никогда не запрашивается
        // повторно, поэтому товар не может попасть в результат дважды.
        loop {
            let page = self.fetch_products_page(cursor.clone()).await?;
            cursor = append_page(&mut all, page);
            if cursor.is_none() {
                break;
            }
        }

        tracing::info!("Fetched {} tagged products from Shopify", all.len());
        Ok(all)
    }

    async fn update_variant_price(
        &self,
        variant_id: &str,
        price: f64,
    ) -> Result<VariantUpdateOutcome, CatalogError> {
        let data = self
            .gql(
                UPDATE_VARIANT_MUTATION,
                json!({ "id": variant_id, "price": price }),
            )
            .await?;
        let data: VariantUpdateData =
            serde_json::from_value(data).map_err(|e| CatalogError::Decode(e.to_string()))?;
        interpret_update(data)
    }
}

/// Перелить страницу в аккумулятор и вернуть курсор следующей страницы.
fn append_page(all: &mut Vec<CatalogProduct>, page: ProductsConnection) -> Option<String> {
    for edge in page.edges {
        all.push(edge.node.into_product());
    }
    if page.page_info.has_next_page {
        page.page_info.end_cursor
    } else {
        None
    }
}

/// Разобрать payload мутации на успех / отклонение / нарушение схемы.
fn interpret_update(data: VariantUpdateData) -> Result<VariantUpdateOutcome, CatalogError> {
    let payload = data.product_variant_update;
    if !payload.user_errors.is_empty() {
        return Ok(VariantUpdateOutcome::Rejected(payload.user_errors));
    }
    let variant = payload.product_variant.ok_or_else(|| {
        CatalogError::Decode(
            "productVariantUpdate returned neither a variant nor userErrors".to_string(),
        )
    })?;
    Ok(VariantUpdateOutcome::Updated {
        id: variant.id,
        price: variant.price,
    })
}

fn preview(body: &str) -> String {
    let preview: String = body.chars().take(500).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

// ============================================================================
// Response schemas
// ============================================================================

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: ProductsConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductsConnection {
    page_info: PageInfo,
    edges: Vec<ProductEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductEdge {
    node: ProductNode,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    id: String,
    tags: Vec<String>,
    metafields: MetafieldConnection,
    variants: VariantConnection,
}

impl ProductNode {
    fn into_product(self) -> CatalogProduct {
        CatalogProduct {
            id: self.id,
            tags: self.tags,
            metafields: self
                .metafields
                .edges
                .into_iter()
                .map(|e| Metafield {
                    key: e.node.key,
                    value: e.node.value,
                })
                .collect(),
            variants_truncated: self.variants.page_info.has_next_page,
            variants: self
                .variants
                .edges
                .into_iter()
                .map(|e| ProductVariant {
                    id: e.node.id,
                    title: e.node.title,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetafieldConnection {
    edges: Vec<MetafieldEdge>,
}

#[derive(Debug, Deserialize)]
struct MetafieldEdge {
    node: MetafieldNode,
}

#[derive(Debug, Deserialize)]
struct MetafieldNode {
    key: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantConnection {
    page_info: VariantPageInfo,
    edges: Vec<VariantEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantPageInfo {
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct VariantEdge {
    node: VariantNode,
}

#[derive(Debug, Deserialize)]
struct VariantNode {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantUpdateData {
    product_variant_update: VariantUpdatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantUpdatePayload {
    product_variant: Option<UpdatedVariant>,
    user_errors: Vec<UserError>,
}

/// Вариант, как его вернула мутация (цена приходит строкой)
#[derive(Debug, Deserialize)]
struct UpdatedVariant {
    id: String,
    price: String,
}
