//! # Core Module
//!
//! 인증 코어 전반에서 공유하는 기반 기능입니다.
//!
//! - [`clock`] - 주입 가능한 시간 소스 (`Clock`, `SystemClock`, `ManualClock`)

pub mod clock;

pub use clock::*;
