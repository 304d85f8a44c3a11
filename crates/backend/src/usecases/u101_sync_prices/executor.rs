use std::sync::Arc;

use contracts::domain::a003_surcharge_table::SurchargeTable;
use contracts::usecases::u101_sync_prices::{RunStatus, SyncReport};
use uuid::Uuid;

use super::price_computer::{self, SkipReason};
use super::progress::ProgressSink;
use super::shopify_api_client::{CatalogApi, VariantUpdateOutcome, VARIANT_PAGE_SIZE};

/// Executor синхронизации цен: fetch → categorize → compute → mutate.
///
/// Работает строго последовательно — один запрос к каталогу в полёте,
/// мутации не распараллеливаются, лог прогресса остаётся упорядоченным.
pub struct SyncExecutor {
    api: Arc<dyn CatalogApi>,
    surcharges: Arc<SurchargeTable>,
}

impl SyncExecutor {
    pub fn new(api: Arc<dyn CatalogApi>, surcharges: Arc<SurchargeTable>) -> Self {
        Self { api, surcharges }
    }

    /// Выполнить один запуск, отправляя прогресс в sink.
    ///
    /// Фатальна только ошибка чтения каталога. Ошибка мутации отдельного
    /// варианта логируется и не прерывает обход: каждый вариант получает
    /// ровно одну попытку за запуск, без ретраев — повторный запуск и есть
    /// путь восстановления. Sentinel `Closed` отправляется последним на
    /// любом исходе.
    pub async fn run(&self, sink: ProgressSink) -> SyncReport {
        let session_id = Uuid::new_v4().to_string();
        let mut report = SyncReport::new(session_id.clone());
        tracing::info!("Starting price sync session {}", session_id);

        sink.log(format!(
            "Starting at {}",
            chrono::Local::now().format("%H:%M:%S")
        ))
        .await;
        sink.log("Fetching products via GraphQL...").await;

        let products = match self.api.fetch_tagged_products().await {
            Ok(products) => products,
            Err(e) => {
                // Ни один товар ещё не обработан — запуск падает целиком
                tracing::error!("Catalog fetch failed: {}", e);
                sink.log(format!("ERROR: {}", e)).await;
                report.finish(RunStatus::Failed);
                sink.close().await;
                return report;
            }
        };

        report.products_fetched = products.len() as i32;
        sink.log(format!("Found {} products", products.len())).await;
        sink.log(format!("Preparing {} products...", products.len()))
            .await;

        for product in &products {
            let targets = match price_computer::compute_target_prices(product, &self.surcharges) {
                Ok(targets) => targets,
                Err(reason) => {
                    report.products_skipped += 1;
                    self.log_skip(&sink, &product.id, reason).await;
                    continue;
                }
            };

            if product.variants_truncated {
                tracing::warn!(
                    "Product {} has more than {} variants, extra variants are not updated",
                    product.id,
                    VARIANT_PAGE_SIZE
                );
                sink.log(format!(
                    "warning: {} has more than {} variants, only the first page is updated",
                    product.id, VARIANT_PAGE_SIZE
                ))
                .await;
            }

            for target in targets {
                // Courtesy cancellation: consumer gone → stop between steps
                if sink.is_closed() {
                    tracing::warn!(
                        "Progress consumer disconnected, stopping session {} early",
                        session_id
                    );
                    report.finish(RunStatus::Cancelled);
                    sink.close().await;
                    return report;
                }

                sink.log(format!(
                    "updating {} -> {:.2}",
                    target.variant_id, target.price
                ))
                .await;

                match self
                    .api
                    .update_variant_price(&target.variant_id, target.price)
                    .await
                {
                    Ok(VariantUpdateOutcome::Updated { id, price }) => {
                        report.variants_updated += 1;
                        // Цена из ответа Shopify, не локально вычисленная
                        sink.log(format!("{} = {}", id, price)).await;
                    }
                    Ok(rejected @ VariantUpdateOutcome::Rejected(_)) => {
                        report.variants_failed += 1;
                        let joined = rejected.joined_errors();
                        tracing::warn!("Variant {} rejected: {}", target.variant_id, joined);
                        sink.log(format!("{} error: {}", target.variant_id, joined))
                            .await;
                    }
                    Err(e) => {
                        report.variants_failed += 1;
                        tracing::warn!("Variant {} update failed: {}", target.variant_id, e);
                        sink.log(format!("{} error: {}", target.variant_id, e))
                            .await;
                    }
                }
            }
        }

        // Ошибки отдельных вариантов не делают запуск Failed
        sink.log("Bulk update complete.").await;
        sink.log("Done! Shopify updated.").await;
        report.finish(RunStatus::Completed);
        tracing::info!(
            "Session {} completed: {} fetched, {} updated, {} skipped, {} failed",
            session_id,
            report.products_fetched,
            report.variants_updated,
            report.products_skipped,
            report.variants_failed
        );
        sink.close().await;
        report
    }

    async fn log_skip(&self, sink: &ProgressSink, product_id: &str, reason: SkipReason) {
        tracing::info!("Skipping product {} ({})", product_id, reason.describe());
        sink.log(format!("skipping {} ({})", product_id, reason.describe()))
            .await;
    }
}
