//! Database repositories.
//!
//! One repository per entity, wrapping a shared [`sea_orm::DatabaseConnection`].

mod post;
mod question;
mod user;

pub use post::PostRepository;
pub use question::QuestionRepository;
pub use user::UserRepository;
