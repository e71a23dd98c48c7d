//! Lane handler implementations

use mcp_common::{CallToolResult, McpError};

use crate::api::{BusinessMapClient, LaneChanges, NewLane};
use crate::params::{BoardParams, LaneCreateParams, LaneParams, LaneUpdateParams};

use super::envelope_result;

pub async fn get_lanes(
    client: &BusinessMapClient,
    params: BoardParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_lanes(&params.board_id).await)
}

pub async fn get_lane(
    client: &BusinessMapClient,
    params: LaneParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.get_lane(&params.lane_id).await)
}

pub async fn create_lane(
    client: &BusinessMapClient,
    params: LaneCreateParams,
) -> Result<CallToolResult, McpError> {
    let lane = NewLane {
        workflow_id: params.workflow_id,
        position: params.position,
        name: params.name,
        description: params.description,
        color: params.color,
    };
    envelope_result(client.create_lane(&params.board_id, &lane).await)
}

pub async fn update_lane(
    client: &BusinessMapClient,
    params: LaneUpdateParams,
) -> Result<CallToolResult, McpError> {
    let changes = LaneChanges {
        workflow_id: params.workflow_id,
        position: params.position,
        name: params.name,
        description: params.description,
        color: params.color,
    };
    envelope_result(client.update_lane(&params.lane_id, &changes).await)
}

pub async fn delete_lane(
    client: &BusinessMapClient,
    params: LaneParams,
) -> Result<CallToolResult, McpError> {
    envelope_result(client.delete_lane(&params.lane_id).await)
}
