use serde::{Deserialize, Serialize};

use super::User;

/// A user registered as collaborator on one todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    pub id: i64,
    pub user: User,
    pub todo_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewManager {
    pub user_id: i64,
    pub todo_id: i64,
}
