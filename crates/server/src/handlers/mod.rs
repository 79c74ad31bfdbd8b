//! # API Route Handlers

pub mod general;
pub mod repurpose;

pub use general::*;
pub use repurpose::*;

use super::{errors::AppError, state::AppState};
