//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - The HTTP-facing error type ([`error::app_error::AppError`]) and its kinds
//! - Typed identifiers ([`id::Id`])
//!
//! Only things whose meaning is stable across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
