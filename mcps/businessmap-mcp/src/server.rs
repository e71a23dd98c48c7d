//! MCP Server implementation
//!
//! This module defines the MCP server exposing the Businessmap API as
//! tools, plus the `user://me` resource for the API key owner. Handler
//! implementations are in the handlers/ module.
//!
//! # Tool Groups
//!
//! Read tools are always registered. Write tools (creating, updating or
//! deleting comments, co-owners, subtasks and lanes) are only registered
//! when the server is not in read-only mode, so a read-only client never
//! sees them in `tools/list`.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use mcp_common::{async_trait, EmbeddableError, EmbeddableMcp, EmbeddableResult};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, ListResourcesResult, PaginatedRequestParam, ReadResourceRequestParam,
        ReadResourceResult, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};
use serde_json::Value;

use crate::api::{BusinessMapClient, HttpTransport, RestTransport};
use crate::config::Config;
use crate::handlers;
use crate::params::*;

const INSTRUCTIONS: &str = "Businessmap MCP Server - provides tools for reading and editing \
    Businessmap boards, columns, lanes, cards, comments, co-owners and subtasks. Use \
    add-formatted-card-comment for comments with HTML or markdown formatting; \
    add-card-comment only accepts plain text. Subtask descriptions accept HTML directly.";

/// The main Businessmap MCP Server
#[derive(Clone)]
pub struct BusinessMapMcpServer {
    client: BusinessMapClient,
    config: Config,
    started_at: Instant,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Read Tools (always available)
// ============================================================================

#[tool_router(router = read_tool_router)]
impl BusinessMapMcpServer {
    #[tool(name = "get-me", description = "Get data about the user owning the API key")]
    async fn get_me(&self) -> Result<CallToolResult, McpError> {
        handlers::get_me(&self.client).await
    }

    #[tool(name = "get-api-limits", description = "Get the API rate limits and current usage")]
    async fn get_api_limits(&self) -> Result<CallToolResult, McpError> {
        handlers::get_api_limits(&self.client).await
    }

    #[tool(name = "get-card", description = "Get the details of a single card")]
    async fn get_card(
        &self,
        Parameters(params): Parameters<CardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_card(&self.client, params).await
    }

    #[tool(
        name = "get-cards",
        description = "Get a list of cards matching optional criteria. Linked cards, co-owners and subtasks are included"
    )]
    async fn get_cards(
        &self,
        Parameters(params): Parameters<CardSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_cards(&self.client, params).await
    }

    #[tool(name = "get-card-comments", description = "Get a card's comments")]
    async fn get_card_comments(
        &self,
        Parameters(params): Parameters<CardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_card_comments(&self.client, params).await
    }

    #[tool(name = "get-card-comment", description = "Get the details of a comment on a card")]
    async fn get_card_comment(
        &self,
        Parameters(params): Parameters<CommentParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_card_comment(&self.client, params).await
    }

    #[tool(name = "get-card-co-owners", description = "Get the co-owners of a card")]
    async fn get_card_co_owners(
        &self,
        Parameters(params): Parameters<CardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_card_co_owners(&self.client, params).await
    }

    #[tool(name = "check-card-co-owner", description = "Check whether a user is a co-owner of a card")]
    async fn check_card_co_owner(
        &self,
        Parameters(params): Parameters<CoOwnerParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::check_card_co_owner(&self.client, params).await
    }

    #[tool(name = "get-linked-cards", description = "Get the cards linked to a card")]
    async fn get_linked_cards(
        &self,
        Parameters(params): Parameters<CardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_linked_cards(&self.client, params).await
    }

    #[tool(name = "get-card-subtasks", description = "Get a card's subtasks")]
    async fn get_card_subtasks(
        &self,
        Parameters(params): Parameters<CardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_card_subtasks(&self.client, params).await
    }

    #[tool(name = "get-card-subtask", description = "Get the details of a subtask of a card")]
    async fn get_card_subtask(
        &self,
        Parameters(params): Parameters<SubtaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_card_subtask(&self.client, params).await
    }

    #[tool(name = "get-boards", description = "Get the boards the current user is assigned to")]
    async fn get_boards(&self) -> Result<CallToolResult, McpError> {
        handlers::get_boards(&self.client).await
    }

    #[tool(name = "get-board", description = "Get the details of a single board")]
    async fn get_board(
        &self,
        Parameters(params): Parameters<BoardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_board(&self.client, params).await
    }

    #[tool(name = "get-columns", description = "Get the columns of a board")]
    async fn get_columns(
        &self,
        Parameters(params): Parameters<BoardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_columns(&self.client, params).await
    }

    #[tool(name = "get-column", description = "Get the details of a single column")]
    async fn get_column(
        &self,
        Parameters(params): Parameters<ColumnParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_column(&self.client, params).await
    }

    #[tool(name = "get-lanes", description = "Get the lanes of a board")]
    async fn get_lanes(
        &self,
        Parameters(params): Parameters<BoardParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_lanes(&self.client, params).await
    }

    #[tool(name = "get-lane", description = "Get the details of a single lane")]
    async fn get_lane(
        &self,
        Parameters(params): Parameters<LaneParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_lane(&self.client, params).await
    }

    #[tool(name = "get-user", description = "Get the details of a single user")]
    async fn get_user(
        &self,
        Parameters(params): Parameters<UserParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_user(&self.client, params).await
    }

    #[tool(name = "get-workspace", description = "Get the details of a single workspace")]
    async fn get_workspace(
        &self,
        Parameters(params): Parameters<WorkspaceParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_workspace(
            &self.client,
            self.config.default_workspace_id.as_deref(),
            params,
        )
        .await
    }

    #[tool(
        name = "format-content",
        description = "Convert plain text or light markdown (### headings, **bold**, *italic*, [links](url), `code`, - and 1. lists) to an HTML fragment suitable for comments and subtask descriptions"
    )]
    async fn format_content(
        &self,
        Parameters(params): Parameters<FormatContentParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::format_content(params)
    }

    #[tool(name = "get-mcp-version", description = "Get the MCP server version and configuration")]
    async fn get_mcp_version(&self) -> Result<CallToolResult, McpError> {
        handlers::get_mcp_version(&self.config, self.started_at.elapsed())
    }

    #[tool(name = "get-system-health", description = "Get server health and configuration status")]
    async fn get_system_health(&self) -> Result<CallToolResult, McpError> {
        handlers::get_system_health(&self.config, self.started_at.elapsed())
    }
}

// ============================================================================
// Write Tools (not registered in read-only mode)
// ============================================================================

#[tool_router(router = write_tool_router)]
impl BusinessMapMcpServer {
    #[tool(name = "add-card-comment", description = "Add a plain-text comment to a card")]
    async fn add_card_comment(
        &self,
        Parameters(params): Parameters<CommentAddParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_card_comment(&self.client, params).await
    }

    #[tool(
        name = "add-formatted-card-comment",
        description = "Add a comment with rich HTML formatting to a card. Accepts HTML, or plain text/markdown which is converted to HTML. Returns the new comment including its comment_id"
    )]
    async fn add_formatted_card_comment(
        &self,
        Parameters(params): Parameters<FormattedCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_formatted_card_comment(&self.client, params).await
    }

    #[tool(name = "update-card-comment", description = "Update the text of a comment on a card; HTML is accepted")]
    async fn update_card_comment(
        &self,
        Parameters(params): Parameters<CommentUpdateParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::update_card_comment(&self.client, params).await
    }

    #[tool(name = "delete-card-comment", description = "Delete a comment from a card")]
    async fn delete_card_comment(
        &self,
        Parameters(params): Parameters<CommentParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_card_comment(&self.client, params).await
    }

    #[tool(name = "add-card-co-owner", description = "Add a user as a co-owner of a card")]
    async fn add_card_co_owner(
        &self,
        Parameters(params): Parameters<CoOwnerParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_card_co_owner(&self.client, params).await
    }

    #[tool(name = "remove-card-co-owner", description = "Remove a user as a co-owner of a card")]
    async fn remove_card_co_owner(
        &self,
        Parameters(params): Parameters<CoOwnerParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::remove_card_co_owner(&self.client, params).await
    }

    #[tool(name = "add-card-subtask", description = "Add a subtask to a card; the description may be HTML")]
    async fn add_card_subtask(
        &self,
        Parameters(params): Parameters<SubtaskAddParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_card_subtask(&self.client, params).await
    }

    #[tool(
        name = "update-card-subtask",
        description = "Update a subtask's description (HTML accepted) and finished flag"
    )]
    async fn update_card_subtask(
        &self,
        Parameters(params): Parameters<SubtaskUpdateParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::update_card_subtask(&self.client, params).await
    }

    #[tool(name = "delete-card-subtask", description = "Delete a subtask from a card")]
    async fn delete_card_subtask(
        &self,
        Parameters(params): Parameters<SubtaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_card_subtask(&self.client, params).await
    }

    #[tool(name = "create-lane", description = "Create a lane on a board")]
    async fn create_lane(
        &self,
        Parameters(params): Parameters<LaneCreateParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_lane(&self.client, params).await
    }

    #[tool(name = "update-lane", description = "Update an existing lane; only the given fields change")]
    async fn update_lane(
        &self,
        Parameters(params): Parameters<LaneUpdateParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::update_lane(&self.client, params).await
    }

    #[tool(name = "delete-lane", description = "Delete a lane")]
    async fn delete_lane(
        &self,
        Parameters(params): Parameters<LaneParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_lane(&self.client, params).await
    }
}

// ============================================================================
// Router Composition & Server Initialization
// ============================================================================

impl BusinessMapMcpServer {
    /// Create a server talking to the API configured in `config`
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.api)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a server over an arbitrary transport
    pub fn with_transport(config: Config, transport: Arc<dyn RestTransport>) -> Self {
        let router = Self::read_tool_router();
        let router = if config.read_only {
            router
        } else {
            router + Self::write_tool_router()
        };

        Self {
            client: BusinessMapClient::new(transport),
            config,
            started_at: Instant::now(),
            tool_router: router,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    fn is_registered(&self, name: &str) -> bool {
        self.tool_router.list_all().iter().any(|tool| tool.name == name)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for BusinessMapMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(handlers::list_resources())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        handlers::read_resource(&self.client, &request.uri).await
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for BusinessMapMcpServer {
    fn server_name(&self) -> &str {
        handlers::SERVER_NAME
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        if !self.is_registered(name) {
            return Err(EmbeddableError::ToolNotFound(name.to_string()));
        }

        let result = match name {
            // Account & system
            "get-me" => self.get_me().await,
            "get-api-limits" => self.get_api_limits().await,
            "get-user" => self.get_user(Parameters(serde_json::from_value(params)?)).await,
            "get-workspace" => {
                self.get_workspace(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "get-mcp-version" => self.get_mcp_version().await,
            "get-system-health" => self.get_system_health().await,
            "format-content" => {
                self.format_content(Parameters(serde_json::from_value(params)?))
                    .await
            }

            // Cards & co-owners
            "get-card" => self.get_card(Parameters(serde_json::from_value(params)?)).await,
            "get-cards" => self.get_cards(Parameters(serde_json::from_value(params)?)).await,
            "get-linked-cards" => {
                self.get_linked_cards(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "get-card-co-owners" => {
                self.get_card_co_owners(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "check-card-co-owner" => {
                self.check_card_co_owner(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "add-card-co-owner" => {
                self.add_card_co_owner(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "remove-card-co-owner" => {
                self.remove_card_co_owner(Parameters(serde_json::from_value(params)?))
                    .await
            }

            // Comments
            "get-card-comments" => {
                self.get_card_comments(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "get-card-comment" => {
                self.get_card_comment(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "add-card-comment" => {
                self.add_card_comment(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "add-formatted-card-comment" => {
                self.add_formatted_card_comment(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "update-card-comment" => {
                self.update_card_comment(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "delete-card-comment" => {
                self.delete_card_comment(Parameters(serde_json::from_value(params)?))
                    .await
            }

            // Subtasks
            "get-card-subtasks" => {
                self.get_card_subtasks(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "get-card-subtask" => {
                self.get_card_subtask(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "add-card-subtask" => {
                self.add_card_subtask(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "update-card-subtask" => {
                self.update_card_subtask(Parameters(serde_json::from_value(params)?))
                    .await
            }
            "delete-card-subtask" => {
                self.delete_card_subtask(Parameters(serde_json::from_value(params)?))
                    .await
            }

            // Boards, columns, lanes
            "get-boards" => self.get_boards().await,
            "get-board" => self.get_board(Parameters(serde_json::from_value(params)?)).await,
            "get-columns" => self.get_columns(Parameters(serde_json::from_value(params)?)).await,
            "get-column" => self.get_column(Parameters(serde_json::from_value(params)?)).await,
            "get-lanes" => self.get_lanes(Parameters(serde_json::from_value(params)?)).await,
            "get-lane" => self.get_lane(Parameters(serde_json::from_value(params)?)).await,
            "create-lane" => self.create_lane(Parameters(serde_json::from_value(params)?)).await,
            "update-lane" => self.update_lane(Parameters(serde_json::from_value(params)?)).await,
            "delete-lane" => self.delete_lane(Parameters(serde_json::from_value(params)?)).await,

            _ => return Err(EmbeddableError::ToolNotFound(name.to_string())),
        };

        result.map_err(Into::into)
    }
}
