//! Column decoding shared by the backends.

use chrono::{DateTime, Utc};

use crate::error::StorageError;

/// `tags` column (JSONB) into an ordered list of strings.
#[cfg_attr(not(feature = "postgres"), allow(dead_code))]
pub(crate) fn tags_from_value(id: i64, value: serde_json::Value) -> Result<Vec<String>, StorageError> {
    serde_json::from_value(value)
        .map_err(|e| StorageError::corrupt(format!("prompt {id}: tags is not a string array"), e))
}

/// `tags` column (JSON text) into an ordered list of strings.
#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub(crate) fn tags_from_json(id: i64, raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw)
        .map_err(|e| StorageError::corrupt(format!("prompt {id}: tags is not a string array"), e))
}

/// Microseconds since the Unix epoch into a UTC timestamp.
#[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
pub(crate) fn timestamp_from_micros(
    id: i64,
    column: &str,
    micros: i64,
) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        StorageError::corrupt(
            format!("prompt {id}: {column} value {micros} out of range"),
            "timestamp out of range",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_keep_order() {
        let tags = tags_from_json(1, r#"["b","a","b"]"#).unwrap();
        assert_eq!(tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn non_array_tags_are_corruption() {
        let err = tags_from_value(4, serde_json::json!({"a": 1})).unwrap_err();
        assert!(matches!(err, StorageError::DataCorruption { .. }));
        assert!(err.to_string().contains("prompt 4"));
    }

    #[test]
    fn micros_round_trip() {
        let now = Utc::now();
        let back = timestamp_from_micros(1, "created_at", now.timestamp_micros()).unwrap();
        assert_eq!(back.timestamp_micros(), now.timestamp_micros());
        assert!(timestamp_from_micros(1, "created_at", i64::MAX).is_err());
    }
}
