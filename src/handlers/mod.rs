pub mod get;
pub mod identifier;
pub mod preflight;
pub mod put;

pub use get::get_handler;
pub use identifier::identifier_handler;
pub use preflight::{not_found_handler, preflight_handler};
pub use put::put_handler;
