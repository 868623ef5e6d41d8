//! Comment records as stored and as accepted on create.

use serde::{Deserialize, Serialize};

/// A persisted comment. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: i32,
    pub txt: String,
}

/// Validated create payload (the resource's add columns).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewComment {
    pub txt: String,
}

impl From<(i32, String)> for Comment {
    fn from((id, txt): (i32, String)) -> Self {
        Comment { id, txt }
    }
}
