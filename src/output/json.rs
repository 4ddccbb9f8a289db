//! JSON serialization for results and report snapshots.

use serde::Serialize;

/// Serialize any result type to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for the types
/// this crate exports).
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize any result type to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for the types
/// this crate exports).
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::BenchmarkResult;

    fn make_result() -> BenchmarkResult {
        BenchmarkResult {
            name: "encode".to_string(),
            durations: vec![0.01, 0.02, 0.03],
        }
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&make_result()).unwrap();
        assert!(json.contains("\"name\":\"encode\""));
        assert!(json.contains("0.02"));
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json_pretty(&make_result()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("durations"));
    }
}
