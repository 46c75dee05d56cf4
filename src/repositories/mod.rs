//! 데이터 액세스 계층
//!
//! 인증 코어는 [`ports`]의 trait만 의존하고, 구체 저장소는 실행 시 선택됩니다.
//!
//! | 구현 | CredentialStore | UserProfileStore | RoleCatalog |
//! |------|-----------------|------------------|-------------|
//! | [`memory`] | `InMemoryCredentialStore` | `InMemoryUserDirectory` | `InMemoryUserDirectory` |
//! | Redis + MongoDB | `RedisSessionRepository` | `MongoUserRepository` | `MongoUserRepository` |

pub mod ports;
pub mod memory;
pub mod tokens;
pub mod users;

pub use ports::*;
pub use memory::*;
pub use tokens::*;
pub use users::*;
