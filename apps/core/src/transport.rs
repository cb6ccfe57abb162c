use serde::{Deserialize, Serialize};

use crate::contract::{CoreRequest, CoreResponse};
use crate::core_service::{LauncherCore, ServiceError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRequest,
    Config,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(core: &LauncherCore, request: CoreRequest) -> TransportResponse {
    match core.handle_command(request) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_service_error(error),
        },
    }
}

/// Decodes one JSON request and encodes its response. Never panics on bad
/// input; malformed payloads come back as `invalid_json`.
pub fn handle_json(core: &LauncherCore, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(core, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    encode_response(&response)
}

fn encode_response(response: &TransportResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|error| {
        log::error!("failed to encode transport response: {error}");
        r#"{"status":"err","error":{"code":"internal","message":"response encoding failed"}}"#
            .to_string()
    })
}

fn map_service_error(error: ServiceError) -> ErrorResponse {
    let message = error.to_string();
    let code = match error {
        ServiceError::InvalidRequest(_) => ErrorCode::InvalidRequest,
        ServiceError::Config(_) => ErrorCode::Config,
    };
    ErrorResponse { code, message }
}
