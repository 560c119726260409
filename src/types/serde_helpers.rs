//! Serde helpers for Cryptowatch's query-string conventions.
//!
//! Query parameters are only sent when they carry a meaningful value, and list
//! parameters travel as a single comma-separated field.

use std::fmt::Display;

use serde::Serializer;

/// Serialize a slice as a comma-separated string.
///
/// Pair with `skip_serializing_if = "Vec::is_empty"` so that empty lists are
/// omitted rather than sent as an empty value.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use cryptowatch_api_client::types::serde_helpers::comma_separated;
///
/// #[derive(Serialize)]
/// struct Query {
///     #[serde(serialize_with = "comma_separated::serialize")]
///     periods: Vec<i64>,
/// }
///
/// let query = Query { periods: vec![60, 3600] };
/// assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "periods=60%2C3600");
/// ```
pub mod comma_separated {
    use super::*;

    /// Serialize the values joined by `,`.
    pub fn serialize<T, S>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        let s = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&s)
    }
}

/// Skip predicate for integer parameters that are only sent when strictly positive.
///
/// Zero and negative values mean "unset" and are dropped without complaint.
pub fn is_not_positive(value: &i64) -> bool {
    *value <= 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Test {
        #[serde(skip_serializing_if = "is_not_positive")]
        limit: i64,
        #[serde(
            serialize_with = "comma_separated::serialize",
            skip_serializing_if = "Vec::is_empty"
        )]
        ids: Vec<i64>,
    }

    #[test]
    fn test_comma_separated_serialize() {
        let test = Test {
            limit: 0,
            ids: vec![1, 2, 3],
        };
        let json = serde_json::to_string(&test).unwrap();
        assert_eq!(json, r#"{"ids":"1,2,3"}"#);
    }

    #[test]
    fn test_non_positive_and_empty_are_skipped() {
        let test = Test {
            limit: -5,
            ids: Vec::new(),
        };
        assert_eq!(serde_json::to_string(&test).unwrap(), "{}");
        assert_eq!(serde_urlencoded::to_string(&test).unwrap(), "");
    }

    #[test]
    fn test_positive_is_kept() {
        let test = Test {
            limit: 7,
            ids: Vec::new(),
        };
        assert_eq!(serde_urlencoded::to_string(&test).unwrap(), "limit=7");
    }
}
