//! Business logic services.

pub mod post;
pub mod question;
pub mod seed;
pub mod user;

pub use post::{CreatePostInput, PostService, UpdatePostInput};
pub use question::{QuestionService, SubmitQuestionInput};
pub use seed::SeedService;
pub use user::{CreateUserInput, UpdateUserInput, UserService};
