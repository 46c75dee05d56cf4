/// 보호된 라우트의 인증 방식
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// `Authorization: Bearer <access token>` 헤더 검증
    ///
    /// 요구 역할 목록이 비어 있으면 인증만 확인합니다.
    Bearer(Vec<i64>),
    /// `X-Api-Key` 헤더의 MachineKey 토큰 검증
    ApiKey,
}

impl AuthMode {
    /// 인증만 필요한 Bearer 모드
    pub fn bearer() -> Self {
        AuthMode::Bearer(Vec::new())
    }

    /// 특정 역할 중 하나가 필요한 Bearer 모드
    pub fn bearer_with_roles(roles: &[i64]) -> Self {
        AuthMode::Bearer(roles.to_vec())
    }
}
