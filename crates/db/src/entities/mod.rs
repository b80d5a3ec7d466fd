//! Database entities.

pub mod post;
pub mod question;
pub mod user;

pub use post::Entity as Post;
pub use question::Entity as Question;
pub use user::Entity as User;
