//! MCP Server implementation
//!
//! This module provides the MCP server that registers every zopen tool and
//! routes calls to the [`ZopenTools`] dispatcher.

use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData as McpError,
};
use tracing::{debug, error, info};

use crate::command::CommandBuilder;
use crate::config::Config;
use crate::error::ZopenMcpError;
use crate::runner::{CommandRunner, ProcessRunner};
use crate::tools::{ToolName, ZopenTools};

/// zopen MCP Server
#[derive(Clone)]
pub struct ZopenMcpServer {
    /// Server configuration
    config: Arc<Config>,

    /// Tool dispatcher
    tools: ZopenTools,
}

impl ZopenMcpServer {
    /// Create a server that runs commands as child processes
    pub fn new(config: Config) -> Self {
        let runner = ProcessRunner::new().with_timeout(config.timeout);
        Self::with_runner(config, Arc::new(runner))
    }

    /// Create a server with a custom command runner
    pub fn with_runner(config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        let builder = CommandBuilder::from_config(&config);
        Self {
            config: Arc::new(config),
            tools: ZopenTools::new(builder, runner),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tools(&self) -> &ZopenTools {
        &self.tools
    }

    fn instructions(&self) -> String {
        let location = if self.config.is_remote() {
            format!("on {} over SSH (port {})", self.config.host, self.config.port)
        } else {
            "on this machine".to_string()
        };

        format!(
            "zopen MCP Server v{} - Manage zopen community packages {}. \
             Failed commands are returned as tool results starting with an error marker.",
            env!("CARGO_PKG_VERSION"),
            location,
        )
    }
}

impl From<ZopenMcpError> for McpError {
    fn from(err: ZopenMcpError) -> Self {
        match err {
            ZopenMcpError::UnknownTool(_) | ZopenMcpError::InvalidParams(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            other => McpError::internal_error(other.to_string(), None),
        }
    }
}

impl ServerHandler for ZopenMcpServer {
    /// Return server information
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(self.instructions()),
        }
    }

    /// List available tools
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        debug!("list_tools called");

        Ok(ListToolsResult {
            tools: ToolName::definitions(),
            next_cursor: None,
            meta: Default::default(),
        })
    }

    /// Call a tool
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let tool_name: &str = request.name.as_ref();
        debug!("call_tool called: {:?}", tool_name);

        let tool: ToolName = tool_name.parse()?;
        let args = request.arguments.unwrap_or_default();

        match self.tools.call(tool, args, &context.ct).await {
            Ok(output) => {
                if output.is_error {
                    info!("{} reported an error", tool);
                }
                Ok(output.into_call_result())
            }
            Err(e) => {
                error!("{} rejected: {}", tool, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionMode;

    #[test]
    fn test_server_info() {
        let server = ZopenMcpServer::new(Config::local());
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains(env!("CARGO_PKG_VERSION")));
        assert!(instructions.contains("on this machine"));
    }

    #[test]
    fn test_server_info_remote() {
        let mut config = Config::local();
        config.mode = ExecutionMode::Remote;
        config.host = "zos.example.com".to_string();
        let server = ZopenMcpServer::new(config);

        let instructions = server.get_info().instructions.unwrap();
        assert!(instructions.contains("zos.example.com"));
        assert_eq!(server.tools().mode(), ExecutionMode::Remote);
    }

    #[test]
    fn test_error_mapping() {
        let err: McpError = ZopenMcpError::unknown_tool("zopen_fly").into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("zopen_fly"));

        let err: McpError = ZopenMcpError::transport("closed").into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }
}
