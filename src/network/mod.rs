pub mod error_handler;
pub mod navigation;
pub mod scope;

pub use error_handler::{ErrorHandler, ServerDown};
pub use navigation::NavigationService;
pub use scope::RequestScope;
