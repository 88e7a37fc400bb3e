use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scan session. Created standalone; files are registered against it
/// afterwards. Immutable except via cascading deletes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scan {
    pub id: i64,
    /// Store-assigned creation timestamp (UTC).
    pub started_at: DateTime<Utc>,
}
