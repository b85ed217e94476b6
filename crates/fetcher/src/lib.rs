pub mod poller;
pub mod source;
pub mod state;
