//! Error types for the zopen MCP server
//!
//! Failures of the underlying zopen commands are not errors at this level:
//! they are reported back to the caller as tool output (see
//! [`ToolOutput`](crate::tools::ToolOutput)). This type covers startup
//! problems and protocol-level faults only.

use thiserror::Error;

/// Main error type for the zopen MCP server
#[derive(Debug, Error)]
pub enum ZopenMcpError {
    /// Configuration error (fatal, before the server starts)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool arguments that could not be decoded
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Call for a tool name that is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The MCP transport failed
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias using ZopenMcpError
pub type Result<T> = std::result::Result<T, ZopenMcpError>;

impl ZopenMcpError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        ZopenMcpError::Config(msg.into())
    }

    /// Create an invalid params error from a string
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        ZopenMcpError::InvalidParams(msg.into())
    }

    /// Create an unknown tool error from a tool name
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        ZopenMcpError::UnknownTool(name.into())
    }

    /// Create a transport error from a string
    pub fn transport(msg: impl Into<String>) -> Self {
        ZopenMcpError::Transport(msg.into())
    }
}
