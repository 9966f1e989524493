use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Fresh opaque record id
pub fn uid() -> String {
    Uuid::new_v4().to_simple().to_string()
}

/// Current UTC time, millisecond precision with a `Z` suffix, so values sort lexically
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(uid(), uid());
        assert_eq!(uid().len(), 32);
    }

    #[test]
    fn timestamp_shape() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'), "{}", ts);
        // 2024-05-01T12:00:00.000Z
        assert_eq!(ts.len(), 24);
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
