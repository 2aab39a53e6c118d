pub mod error;
pub mod models;
pub mod project;
pub mod requests;

pub use error::*;
pub use models::*;
pub use project::*;
pub use requests::*;
