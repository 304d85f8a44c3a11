use serde::{Deserialize, Serialize};

/// Событие прогресса синхронизации.
///
/// Events are pushed through a bounded channel in emission order; `Closed`
/// is the end-of-stream sentinel and is always the last event a consumer
/// sees. Log lines are opaque, human-readable status text; severity is
/// inferable from the line content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncEvent {
    Log { line: String },
    Closed,
}

impl SyncEvent {
    pub fn log(line: impl Into<String>) -> Self {
        SyncEvent::Log { line: line.into() }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, SyncEvent::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&SyncEvent::log("Found 3 products")).unwrap();
        assert_eq!(json, r#"{"kind":"log","line":"Found 3 products"}"#);
        let json = serde_json::to_string(&SyncEvent::Closed).unwrap();
        assert_eq!(json, r#"{"kind":"closed"}"#);
    }
}
