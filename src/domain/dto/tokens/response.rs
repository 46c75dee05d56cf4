//! 토큰 관련 응답 DTO
use serde::Serialize;

/// API 응답 래퍼
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl ApiResponse<()> {
    /// 데이터 없이 메시지만 담는 응답
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// 권한 상승(Elevated) 토큰 응답
#[derive(Debug, Serialize)]
pub struct ElevatedTokenResponse {
    pub token: String,
}

/// 머신 키(API Key) 응답
#[derive(Debug, Serialize)]
pub struct MachineKeyResponse {
    pub key: String,
}
