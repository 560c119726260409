//! Allowance tracking.
//!
//! Every Cryptowatch response reports what the request cost and how much of the
//! period's allowance is left. [`AllowanceTracker`] keeps the most recent report
//! so callers can inspect it between requests.
//!
//! ```rust
//! use cryptowatch_api_client::allowance::AllowanceTracker;
//! use cryptowatch_api_client::types::Allowance;
//!
//! let tracker = AllowanceTracker::new();
//! assert_eq!(tracker.current(), Allowance::default());
//!
//! tracker.update(Allowance { cost: 1, remaining: 9999, upgrade: None });
//! assert_eq!(tracker.current().remaining, 9999);
//! ```

use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::error::CryptowatchError;
use crate::rest::decode::truncate_i64;
use crate::types::Allowance;

/// Shared, last-write-wins holder of the most recently observed [`Allowance`].
///
/// Clones share the same state. `cost` and `remaining` are always read and
/// written together under one lock.
#[derive(Debug, Clone, Default)]
pub struct AllowanceTracker {
    inner: Arc<RwLock<Allowance>>,
}

impl AllowanceTracker {
    /// Create a tracker holding the zero allowance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked allowance.
    pub fn update(&self, allowance: Allowance) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = allowance;
    }

    /// The most recently observed allowance.
    pub fn current(&self) -> Allowance {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Decode the `allowance` object of a response envelope.
///
/// `cost` and `remaining` must be JSON numbers; fractional values are truncated
/// toward zero. `upgrade`, when present, must be a string.
pub fn parse_allowance(value: &Value) -> Result<Allowance, CryptowatchError> {
    let obj = value
        .as_object()
        .ok_or_else(|| CryptowatchError::Allowance(format!("expected an object, got {}", value)))?;

    let integer = |key: &str| -> Result<i64, CryptowatchError> {
        match obj.get(key) {
            Some(v) => {
                let n = v.as_f64().ok_or_else(|| {
                    CryptowatchError::Allowance(format!("`{}` must be a number, got {}", key, v))
                })?;
                truncate_i64(n).ok_or_else(|| {
                    CryptowatchError::Allowance(format!(
                        "`{}` does not fit in a 64-bit integer: {}",
                        key, v
                    ))
                })
            }
            None => Err(CryptowatchError::Allowance(format!("missing `{}`", key))),
        }
    };

    let upgrade = match obj.get("upgrade") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(CryptowatchError::Allowance(format!(
                "`upgrade` must be a string, got {}",
                other
            )));
        }
    };

    Ok(Allowance {
        cost: integer("cost")?,
        remaining: integer("remaining")?,
        upgrade,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_is_last_write_wins() {
        let tracker = AllowanceTracker::new();
        tracker.update(Allowance {
            cost: 3,
            remaining: 100,
            upgrade: None,
        });
        tracker.update(Allowance {
            cost: 1,
            remaining: 99,
            upgrade: None,
        });
        let current = tracker.current();
        assert_eq!(current.cost, 1);
        assert_eq!(current.remaining, 99);
    }

    #[test]
    fn test_clones_share_state() {
        let tracker = AllowanceTracker::new();
        let other = tracker.clone();
        other.update(Allowance {
            cost: 2,
            remaining: 50,
            upgrade: None,
        });
        assert_eq!(tracker.current().remaining, 50);
    }

    #[test]
    fn test_concurrent_updates_are_never_torn() {
        let tracker = AllowanceTracker::new();
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let tracker = tracker.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        tracker.update(Allowance {
                            cost: i,
                            remaining: i * 1000,
                            upgrade: None,
                        });
                        let seen = tracker.current();
                        assert_eq!(seen.remaining, seen.cost * 1000);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_parse_allowance() {
        let allowance = parse_allowance(&json!({
            "cost": 1,
            "remaining": 9999,
            "upgrade": "Upgrade for a higher allowance"
        }))
        .unwrap();
        assert_eq!(allowance.cost, 1);
        assert_eq!(allowance.remaining, 9999);
        assert_eq!(
            allowance.upgrade.as_deref(),
            Some("Upgrade for a higher allowance")
        );
    }

    #[test]
    fn test_parse_allowance_truncates_fractions() {
        let allowance = parse_allowance(&json!({"cost": 2.9, "remaining": 7999.99})).unwrap();
        assert_eq!(allowance.cost, 2);
        assert_eq!(allowance.remaining, 7999);
    }

    #[test]
    fn test_parse_allowance_rejects_out_of_range() {
        let err = parse_allowance(&json!({"cost": 1, "remaining": 1e30})).unwrap_err();
        assert!(matches!(err, CryptowatchError::Allowance(msg) if msg.contains("remaining")));

        let err = parse_allowance(&json!({"cost": -1e19, "remaining": 5})).unwrap_err();
        assert!(matches!(err, CryptowatchError::Allowance(msg) if msg.contains("cost")));
    }

    #[test]
    fn test_parse_allowance_rejects_bad_shapes() {
        assert!(matches!(
            parse_allowance(&json!([1, 2])),
            Err(CryptowatchError::Allowance(_))
        ));
        assert!(matches!(
            parse_allowance(&json!({"cost": 1})),
            Err(CryptowatchError::Allowance(msg)) if msg.contains("remaining")
        ));
        assert!(matches!(
            parse_allowance(&json!({"cost": "1", "remaining": 5})),
            Err(CryptowatchError::Allowance(msg)) if msg.contains("cost")
        ));
    }
}
