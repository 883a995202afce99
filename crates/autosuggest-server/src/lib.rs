pub mod catalog;
pub mod http;
pub mod server;

pub use catalog::Catalog;
pub use server::SuggestionServer;
