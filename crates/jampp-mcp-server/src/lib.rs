pub mod errors;
mod json_schema;
pub mod server;
pub mod server_handler;
pub mod tools;
