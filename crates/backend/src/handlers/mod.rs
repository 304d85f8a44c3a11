pub mod u101_sync_prices;

use contracts::domain::a001_connection_shopify::ShopifyConnection;
use contracts::domain::a003_surcharge_table::SurchargeTable;
use std::sync::Arc;

/// Состояние приложения, общее для всех обработчиков.
pub struct AppState {
    pub connection: ShopifyConnection,
    pub surcharges: Arc<SurchargeTable>,
}
