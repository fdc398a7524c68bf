pub mod content_store;
pub mod extract;
pub mod gateway;
pub mod prompt;
pub mod providers;

pub use content_store::{ContentStore, LoadError};
pub use extract::{ResponseExtractor, ShapeError};
pub use gateway::{ChatError, ChatGateway};
pub use prompt::PromptBuilder;
