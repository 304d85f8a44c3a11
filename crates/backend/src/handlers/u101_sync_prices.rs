use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::Extension,
    response::sse::{Event, KeepAlive, Sse},
};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u101_sync_prices::{SyncEvent, SyncPrices};
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};

use crate::handlers::AppState;
use crate::usecases::u101_sync_prices::{
    CatalogApi, ProgressSink, ShopifyApiClient, SyncExecutor,
};

/// GET /api/sync_prices/run
///
/// Запустить синхронизацию и отдать её прогресс как SSE-поток.
/// Каждая строка лога — отдельное событие `data:`; sentinel превращается
/// в событие `close`, после которого поток заканчивается. Один потребитель
/// на запуск; параллельные запуски намеренно не запрещены — каждый получает
/// свой канал, последняя запись в Shopify побеждает.
pub async fn run(
    Extension(state): Extension<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!("{} run requested", SyncPrices::full_name());

    let (sink, rx) = ProgressSink::channel();
    let api: Arc<dyn CatalogApi> = Arc::new(ShopifyApiClient::new(state.connection.clone()));
    let executor = SyncExecutor::new(api, state.surcharges.clone());

    // Сам запуск живёт в фоне; отключение потребителя останавливает его
    // между шагами (см. SyncExecutor::run)
    tokio::spawn(async move {
        let report = executor.run(sink).await;
        tracing::info!(
            "Sync run {} finished with status {:?}",
            report.session_id,
            report.status
        );
    });

    let stream = ReceiverStream::new(rx).map(|event| {
        Ok(match event {
            SyncEvent::Log { line } => Event::default().data(line),
            SyncEvent::Closed => Event::default().event("close").data("close"),
        })
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
