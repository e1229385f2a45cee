// Server module entry
// Hosts the greeter and deleter on a local HTTP listener

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword and cannot name a module, so it is mounted as server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;
