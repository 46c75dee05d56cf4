//! 미들웨어 모듈
//!
//! 보호된 라우트 앞에서 Access Gate를 실행하는 인증 미들웨어를 제공합니다.
//! 통과한 호출자는 request extension에 [`AuthorizedUser`](crate::domain::models::auth::AuthorizedUser)로 저장되어
//! 핸들러에서 추출자로 꺼낼 수 있습니다.
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/admin")
//!     .wrap(AuthMiddleware::bearer_with_roles(&[ADMIN_ROLE]))
//!     .route("/secret", web::get().to(admin_secret))
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
