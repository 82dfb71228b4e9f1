//! Image reference model
//!
//! The upload pipeline lives outside this service; resources only hold a
//! reference to a stored image.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ImageRef {
    pub id: i64,
    pub path: String,
}
