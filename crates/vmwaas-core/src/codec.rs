//! JSON encoding and decoding for request and response bodies.
//!
//! Request bodies are written as canonical JSON: object keys sorted, array
//! order kept, no insignificant whitespace. Decoding goes through
//! `serde_path_to_error` so a schema mismatch reports the JSON pointer of
//! the offending field.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use serde_path_to_error::{Path, Segment};

use crate::error::{Error, Result};

/// Encode `value` as canonical JSON bytes.
///
/// # Errors
///
/// Returns [`Error::SerializationError`] if `value` cannot be represented
/// as JSON (e.g. a map with non-string keys).
pub fn to_canonical_json<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value)?;
    let mut out = Vec::new();
    write_canonical(&value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            out.push(b'{');
            for (index, (key, item)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_canonical(item, out)?;
            }
            out.push(b'}');
        }
        Value::Array(items) => {
            out.push(b'[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(b',');
                }
                write_canonical(item, out)?;
            }
            out.push(b']');
        }
        scalar => serde_json::to_writer(&mut *out, scalar)?,
    }
    Ok(())
}

/// Decode a response body into `T`.
///
/// # Errors
///
/// Returns [`Error::ParseError`] carrying the JSON pointer of the first
/// field that failed to decode. The error has no response attached; the
/// dispatcher adds it.
pub fn unmarshal<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        Error::ParseError {
            pointer: json_pointer(err.path()),
            message: err.inner().to_string(),
            response: None,
        }
    })?;

    deserializer.end().map_err(|err| Error::ParseError {
        pointer: String::new(),
        message: err.to_string(),
        response: None,
    })?;

    Ok(value)
}

/// Project a raw JSON value onto a typed model.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the value does not match `T`.
pub fn project<T>(value: &Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize(value).map_err(|err| Error::ParseError {
        pointer: json_pointer(err.path()),
        message: err.inner().to_string(),
        response: None,
    })
}

/// Render a `serde_path_to_error` path as an RFC 6901 pointer.
fn json_pointer(path: &Path) -> String {
    let mut pointer = String::new();
    for segment in path.iter() {
        match segment {
            Segment::Seq { index } => {
                pointer.push('/');
                pointer.push_str(&index.to_string());
            }
            Segment::Map { key } | Segment::Enum { variant: key } => {
                pointer.push('/');
                pointer.push_str(&key.replace('~', "~0").replace('/', "~1"));
            }
            Segment::Unknown => pointer.push_str("/?"),
        }
    }
    pointer
}

/// Gzip-compress a request body.
///
/// # Errors
///
/// Returns an error if the encoder fails to write.
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// RFC 3339 date-time serde helpers.
///
/// Values are written in UTC with a `Z` suffix; sub-second digits are kept
/// when present and omitted otherwise.
pub mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Format a timestamp the way the service expects it.
    #[must_use]
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Serialize a required timestamp.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    /// Deserialize a required timestamp, accepting any offset.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    /// Helpers for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serialize an optional timestamp (pair with `skip_serializing_if`).
        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.serialize_str(&super::format(value)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional timestamp; `null` maps to `None`.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| {
                    DateTime::parse_from_rfc3339(&raw)
                        .map(|value| value.with_timezone(&Utc))
                        .map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use flate2::read::GzDecoder;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;
    use std::io::Read;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Site {
        name: String,
        pvdcs: Vec<Pvdc>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pvdc {
        host_count: u32,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(
            default,
            with = "rfc3339::option",
            skip_serializing_if = "Option::is_none"
        )]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn canonical_json_sorts_keys_and_keeps_array_order() {
        let mut map = HashMap::new();
        map.insert("zeta", json!([3, 1, 2]));
        map.insert("alpha", json!({"b": 1, "a": 2}));

        let bytes = to_canonical_json(&map).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"alpha":{"a":2,"b":1},"zeta":[3,1,2]}"#
        );
    }

    #[test]
    fn canonical_json_is_stable_across_runs() {
        let value = json!({"name": "s1", "pvdcs": [{"name": "p1"}], "count": 2});
        let first = to_canonical_json(&value).unwrap();
        for _ in 0..10 {
            assert_eq!(to_canonical_json(&value).unwrap(), first);
        }
    }

    #[test]
    fn canonical_json_escapes_keys() {
        let value = json!({"a\"b": "line\nbreak"});
        let bytes = to_canonical_json(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a\"b":"line\nbreak"}"#
        );
    }

    #[test]
    fn unmarshal_reports_json_pointer() {
        let body = br#"{"name":"s1","pvdcs":[{"host_count":2},{"host_count":"many"}]}"#;
        let err = unmarshal::<Site>(body).unwrap_err();
        match err {
            Error::ParseError { pointer, .. } => assert_eq!(pointer, "/pvdcs/1/host_count"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unmarshal_ignores_unknown_fields() {
        let body = br#"{"name":"s1","pvdcs":[],"extra":{"nested":true}}"#;
        let site: Site = unmarshal(body).unwrap();
        assert_eq!(site.name, "s1");
        assert!(site.pvdcs.is_empty());
    }

    #[test]
    fn unmarshal_rejects_trailing_garbage() {
        let err = unmarshal::<Site>(br#"{"name":"s1","pvdcs":[]} trailing"#).unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
    }

    #[test]
    fn json_pointer_escapes_reserved_characters() {
        let err = project::<HashMap<String, u32>>(&json!({"a/b~c": "x"})).unwrap_err();
        match err {
            Error::ParseError { pointer, .. } => assert_eq!(pointer, "/a~1b~0c"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rfc3339_keeps_subsecond_precision() {
        let at = Utc.with_ymd_and_hms(2023, 5, 1, 12, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let json = serde_json::to_string(&Stamped { at: Some(at) }).unwrap();
        assert_eq!(json, r#"{"at":"2023-05-01T12:30:00.250Z"}"#);

        let decoded: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.at, Some(at));
    }

    #[test]
    fn rfc3339_normalizes_offsets_to_utc() {
        let decoded: Stamped = serde_json::from_str(r#"{"at":"2023-05-01T14:30:00+02:00"}"#).unwrap();
        assert_eq!(
            decoded.at,
            Some(Utc.with_ymd_and_hms(2023, 5, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn rfc3339_missing_and_null_are_none() {
        let missing: Stamped = serde_json::from_str("{}").unwrap();
        let null: Stamped = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert_eq!(missing.at, None);
        assert_eq!(null.at, None);
        assert_eq!(serde_json::to_string(&missing).unwrap(), "{}");
    }

    #[test]
    fn gzip_roundtrips() {
        let body = br#"{"name":"s1"}"#;
        let compressed = gzip(body).unwrap();

        let mut decoded = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, body);
    }
}
