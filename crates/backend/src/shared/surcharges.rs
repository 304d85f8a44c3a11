use anyhow::Context;
use contracts::domain::a003_surcharge_table::SurchargeTable;
use std::path::Path;

/// Загрузить таблицу надбавок из JSON-файла.
///
/// Формат файла — двухуровневый объект: категория → название варианта →
/// надбавка. Таблица читается один раз при старте и дальше не меняется.
pub fn load_surcharge_table(path: &Path) -> anyhow::Result<SurchargeTable> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read surcharge table at {}", path.display()))?;
    let table: SurchargeTable = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse surcharge table at {}", path.display()))?;

    if table.is_empty() {
        tracing::warn!("Surcharge table at {} is empty", path.display());
    } else {
        tracing::info!(
            "Loaded surcharge table from {} ({} categories)",
            path.display(),
            table.0.len()
        );
    }
    Ok(table)
}
