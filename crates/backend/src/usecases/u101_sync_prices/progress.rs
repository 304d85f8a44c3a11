use contracts::usecases::u101_sync_prices::SyncEvent;
use tokio::sync::mpsc;

/// Ёмкость канала прогресса. Буферизация — забота канала, а не движка:
/// медленный потребитель задерживает лог, но не роняет обновление цен.
const CHANNEL_CAPACITY: usize = 64;

/// Отправитель прогресса синхронизации.
///
/// Ordered, fire-and-forget delivery over a bounded channel. When the
/// consumer is gone, sends become no-ops instead of errors; the engine
/// checks [`ProgressSink::is_closed`] between steps to stop early.
pub struct ProgressSink {
    tx: mpsc::Sender<SyncEvent>,
}

impl ProgressSink {
    /// Пара (sink, receiver) для одного запуска.
    pub fn channel() -> (ProgressSink, mpsc::Receiver<SyncEvent>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (ProgressSink { tx }, rx)
    }

    /// Отправить строку лога. Потеря строки при отключившемся
    /// потребителе допустима, ошибка не возвращается.
    pub async fn log(&self, line: impl Into<String>) {
        let line = line.into();
        let _ = self.tx.send(SyncEvent::log(line)).await;
    }

    /// Отправить терминальный sentinel. Всегда последнее событие.
    pub async fn close(&self) {
        let _ = self.tx.send(SyncEvent::Closed).await;
    }

    /// Потребитель отключился (receiver dropped).
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_order_preserved_and_sentinel_last() {
        let (sink, mut rx) = ProgressSink::channel();
        sink.log("first").await;
        sink.log("second").await;
        sink.close().await;
        drop(sink);

        assert_eq!(rx.recv().await, Some(SyncEvent::log("first")));
        assert_eq!(rx.recv().await, Some(SyncEvent::log("second")));
        assert_eq!(rx.recv().await, Some(SyncEvent::Closed));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_send_after_consumer_gone_is_noop() {
        let (sink, rx) = ProgressSink::channel();
        drop(rx);
        assert!(sink.is_closed());
        // must not panic or hang
        sink.log("into the void").await;
        sink.close().await;
    }
}
