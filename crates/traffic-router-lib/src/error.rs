use thiserror::Error;

/// Convenient result alias for the traffic router library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// A query that simply has no feasible route is not an error; it is reported
/// through [`crate::RouteResult::Unreachable`]. The variants here describe
/// caller mistakes at the API boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a start or goal name is not a node of the network.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised by [`crate::RoadNetwork::validate`] for edges whose weights
    /// would break the non-negative cost assumption of the search.
    #[error("invalid edge {from} -> {to}: {message}")]
    InvalidEdge {
        from: String,
        to: String,
        message: String,
    },

    /// Raised when router configuration fails validation.
    #[error("invalid router configuration: {message}")]
    InvalidConfig { message: String },

    /// Raised when a route query carries an unusable toll budget.
    #[error("invalid route request: {message}")]
    InvalidRequest { message: String },

    /// Wrapper for configuration parsing errors.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
