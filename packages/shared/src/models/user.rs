use serde::{Deserialize, Serialize};

/// Public projection of a platform user, as embedded in session views.
///
/// The users table carries more attributes than these; this subsystem only
/// reads the public summary and never writes the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: String,
    pub username: String,
    pub rating: i32,
}
