//! Core error types for the layout engine
//!
//! Graph-shape problems never surface as errors: the engine recovers from
//! them locally. These variants cover caller contract violations, strategy
//! failures that the facade replaces with the fallback grid, and the JSON
//! boundary.

use thiserror::Error;

/// Core error types for layout processing
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("Strategy error in {strategy}: {message}")]
    Strategy {
        strategy: &'static str,
        message: String,
    },

    #[error("Verification error: {message}")]
    Verification { message: String },

    #[error("Invalid graph: {}", issues.join("; "))]
    InvalidGraph { issues: Vec<String> },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl LayoutError {
    /// Create a new invalid config error
    pub fn invalid_config(field: &'static str, value: f64) -> Self {
        Self::InvalidConfig { field, value }
    }

    /// Create a new strategy error
    pub fn strategy(strategy: &'static str, message: impl Into<String>) -> Self {
        Self::Strategy {
            strategy,
            message: message.into(),
        }
    }

    /// Create a new verification error
    pub fn verification(message: impl Into<String>) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }

    /// Create a new invalid graph error
    pub fn invalid_graph(issues: Vec<String>) -> Self {
        Self::InvalidGraph { issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_error() {
        let error = LayoutError::invalid_config("nodeWidth", -1.0);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid config"));
        assert!(error_msg.contains("nodeWidth"));
        assert!(error_msg.contains("-1"));
    }

    #[test]
    fn test_strategy_error() {
        let error = LayoutError::strategy("balanced-tree", "no roots");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Strategy error"));
        assert!(error_msg.contains("balanced-tree"));
        assert!(error_msg.contains("no roots"));
    }

    #[test]
    fn test_verification_error() {
        let error = LayoutError::verification("node count mismatch");
        assert!(format!("{}", error).contains("node count mismatch"));
    }

    #[test]
    fn test_invalid_graph_joins_issues() {
        let error = LayoutError::invalid_graph(vec![
            "duplicate node id 'a'".to_string(),
            "edge a -> z references missing node 'z'".to_string(),
        ]);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("duplicate node id 'a'; edge a -> z"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: LayoutError = json_err.into();
        assert!(format!("{}", error).contains("JSON error"));
    }
}
