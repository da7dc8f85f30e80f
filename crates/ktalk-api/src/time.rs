// Timestamp encoding shared by query parameters and request bodies.
//
// The API accepts instants only as `YYYY-MM-DDTHH:MM:SS.mmmZ`.

use chrono::{DateTime, SecondsFormat, Utc};

/// Render an instant as `2023-05-01T00:00:00.000Z`.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `#[serde(with = "crate::time::timestamp")]` for required body fields.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(at))
    }

    /// Same encoding for `Option<DateTime<Utc>>`; pair with
    /// `skip_serializing_if = "Option::is_none"`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::Serializer;

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            at: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match at {
                Some(at) => super::serialize(at, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Timelike};
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::*;

    #[test]
    fn whole_seconds_get_zero_millis() {
        let at = Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&at), "2023-05-01T00:00:00.000Z");
    }

    #[test]
    fn sub_millisecond_precision_is_truncated() {
        let at = Utc
            .with_ymd_and_hms(2024, 12, 31, 23, 59, 59)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        assert_eq!(format_timestamp(&at), "2024-12-31T23:59:59.123Z");
    }

    #[test]
    fn parsed_offset_is_normalized_to_utc() {
        let at = DateTime::parse_from_rfc3339("2023-05-01T03:00:00+03:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&at), "2023-05-01T00:00:00.000Z");
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Draft {
        #[serde(with = "timestamp")]
        starts_at: DateTime<Utc>,
        #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
        expires_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn serde_helpers_emit_api_format() {
        let draft = Draft {
            starts_at: Utc.with_ymd_and_hms(2023, 5, 1, 12, 30, 0).unwrap(),
            expires_at: None,
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({ "startsAt": "2023-05-01T12:30:00.000Z" })
        );
    }
}
