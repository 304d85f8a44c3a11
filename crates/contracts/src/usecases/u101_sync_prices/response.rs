use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Итог одного запуска синхронизации.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// ID сессии запуска
    pub session_id: String,

    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Сколько товаров вернул каталог
    pub products_fetched: i32,

    /// Товары, пропущенные без обработки (нет категории / базовой цены)
    pub products_skipped: i32,

    /// Успешно обновлённые варианты
    pub variants_updated: i32,

    /// Варианты с ошибкой мутации (field errors или транспорт)
    pub variants_failed: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,

    /// Запуск дошёл до конца каталога. Ошибки отдельных вариантов
    /// не переводят запуск в Failed.
    Completed,

    /// Фатальная ошибка чтения каталога до начала обработки
    Failed,

    /// Потребитель прогресса отключился, запуск остановлен досрочно
    Cancelled,
}

impl SyncReport {
    pub fn new(session_id: String) -> Self {
        Self {
            session_id,
            status: RunStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
            products_fetched: 0,
            products_skipped: 0,
            variants_updated: 0,
            variants_failed: 0,
        }
    }

    pub fn finish(&mut self, status: RunStatus) {
        self.status = status;
        self.completed_at = Some(Utc::now());
    }
}
