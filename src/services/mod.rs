//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 생성자로 의존성(`Arc<dyn ...>` 포트, `Clock`, `KeyConfig`)을 받아 구성되며,
//! `main.rs`에서 한 번 만들어 `web::Data`로 공유합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AccessGate, PassportService, RoleService, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(keys, clock.clone()));
//! let roles = Arc::new(RoleService::new(directory.clone()));
//! let gate = AccessGate::new(tokens.clone(), store.clone(), roles);
//! ```

pub mod auth;
