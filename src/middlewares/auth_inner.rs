//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::{AuthMode, AuthorizedUser};
use crate::errors::{AppError, AuthError};
use crate::services::auth::AccessGate;
use crate::utils::string_utils::clean_header_value;

/// 머신 키 헤더 이름
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();

        Box::pin(async move {
            let Some(gate) = req.app_data::<web::Data<AccessGate>>().cloned() else {
                log::error!("AccessGate가 앱 데이터에 등록되지 않았습니다");
                return Ok(reject(req, AppError::InternalError("internal server error".to_string())));
            };

            match authenticate(&req, &gate, &mode).await {
                Ok(Some(user)) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.subject_id);
                    req.extensions_mut().insert(user);
                }
                Ok(None) => {
                    log::debug!("머신 키 인증 성공: {}", req.path());
                }
                Err(err) => return Ok(reject(req, AppError::from(err))),
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 인증 방식에 맞는 헤더를 읽어 Gate에 넘깁니다.
///
/// Bearer 모드는 호출자를, ApiKey 모드는 `None`을 돌려줍니다.
async fn authenticate(
    req: &ServiceRequest,
    gate: &AccessGate,
    mode: &AuthMode,
) -> Result<Option<AuthorizedUser>, AuthError> {
    let header_name = match mode {
        AuthMode::Bearer(_) => actix_web::http::header::AUTHORIZATION.as_str(),
        AuthMode::ApiKey => API_KEY_HEADER,
    };

    let value = clean_header_value(
        req.headers()
            .get(header_name)
            .and_then(|h| h.to_str().ok()),
    )
    .ok_or_else(|| AuthError::Unauthorized(format!("{} 헤더가 없습니다", header_name)))?;

    match mode {
        AuthMode::Bearer(roles) => gate.check_access(&value, roles).await.map(Some),
        AuthMode::ApiKey => gate.check_api_key(&value).map(|_| None),
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}
