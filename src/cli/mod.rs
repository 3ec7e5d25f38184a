pub mod send;
pub mod server;
