//! MCP Server implementation.
//!
//! `McpServer` is the protocol-server instance handed to every transport.
//! The STDIO transport drives it through rmcp's [`ServerHandler`]; the SSE
//! and HTTP transports call [`McpServer::list_tools`] and
//! [`McpServer::call_tool`] from their JSON-RPC processor. Both paths go
//! through the same [`Dispatcher`].

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ErrorCode, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::tools::{
    ArgumentBag, Dispatcher, ResponseEnvelope, ToolError, ToolListing, ToolRegistry,
};

/// Instructions returned to clients on initialize.
pub const INSTRUCTIONS: &str = "Read-only access to a BigCommerce store. Use the get_* tools to \
     look up products, customers and orders; every tool needs the store_Hash of the store.";

/// The main MCP server handler.
///
/// Cheap to clone: configuration and registry are shared behind `Arc`s.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher over the immutable tool registry.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server over an already discovered registry.
    pub fn new(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(Arc::new(registry)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.dispatcher.registry().len()
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<ToolListing> {
        self.dispatcher.list_tools()
    }

    /// Call a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: ArgumentBag,
    ) -> Result<ResponseEnvelope, ToolError> {
        self.dispatcher.call_tool(name, arguments).await
    }
}

/// Map a protocol fault onto rmcp's error envelope.
fn to_mcp_error(err: &ToolError) -> McpError {
    McpError::new(ErrorCode(err.code()), err.to_string(), None)
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = self.name().to_string();
        info.server_info.version = self.version().to_string();
        info
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        let tools = McpServer::list_tools(self)
            .into_iter()
            .map(|listing| serde_json::to_value(listing).and_then(serde_json::from_value::<Tool>))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        let envelope = McpServer::call_tool(self, &request.name, arguments)
            .await
            .map_err(|e| to_mcp_error(&e))?;

        // Round-trip through the wire format so `_meta` is carried as is.
        serde_json::to_value(&envelope)
            .and_then(serde_json::from_value::<CallToolResult>)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}
