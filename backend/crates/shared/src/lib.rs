//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - Error kinds and the unified [`error::app_error::AppError`]
//! - Typed identifiers ([`id::Id`])
//!
//! Nothing in here knows about HTTP routes, tokens or storage engines.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
