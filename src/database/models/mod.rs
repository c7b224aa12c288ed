pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

pub use comment::{Comment, NewComment};
pub use manager::{Manager, NewManager};
pub use todo::{NewTodo, Todo};
pub use user::{NewUser, User};
