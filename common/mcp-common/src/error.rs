//! Error helpers for MCP tool implementations

use rmcp::ErrorData as McpError;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// Internal error with a message, for faults the caller cannot fix
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Invalid params error, for arguments that pass schema checks but are
/// still out of range
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error() {
        let err = internal_error("serializer exploded");
        assert!(err.message.contains("serializer exploded"));
    }

    #[test]
    fn test_invalid_params() {
        let err = invalid_params("isFinished must be 0 or 1");
        assert!(err.message.contains("isFinished"));
    }
}
