pub mod memory;
pub mod models;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use memory::MemoryStore;
pub use pool::{DatabaseError, DatabaseManager};
pub use postgres::{PgCommentRepository, PgManagerRepository, PgTodoRepository, PgUserRepository};
pub use repository::{CommentRepository, ManagerRepository, TodoPage, TodoRepository, UserRepository};
