pub mod progress;
pub mod response;

pub use progress::SyncEvent;
pub use response::{RunStatus, SyncReport};

use crate::usecases::common::UseCaseMetadata;

pub struct SyncPrices;

impl UseCaseMetadata for SyncPrices {
    fn usecase_index() -> &'static str {
        "u101"
    }

    fn usecase_name() -> &'static str {
        "sync_prices"
    }

    fn display_name() -> &'static str {
        "Синхронизация цен Shopify"
    }

    fn description() -> &'static str {
        "Обновление цен вариантов в Shopify по базовой цене и таблице надбавок"
    }
}
