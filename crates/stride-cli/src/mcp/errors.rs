//! Error conversion for the MCP server

use rmcp::ErrorData;
use stride_core::PlannerError;

/// Convert a planner error into an MCP error, prefixed with what was being
/// attempted.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}

/// Error for a lookup that found nothing.
pub fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::internal_error(format!("{kind} with ID {id} not found"), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = to_mcp_error("Failed to get goal", &PlannerError::GoalNotFound { id: 3 });
        assert!(error.message.starts_with("Failed to get goal: "));
        assert!(error.message.contains('3'));

        assert_eq!(not_found("Goal", 12).message, "Goal with ID 12 not found");
    }
}
