//! Lambda handlers and request processing

pub mod content;
pub mod helpers;
pub mod parsing;
pub mod registration;

pub use helpers::ApiResponse;
