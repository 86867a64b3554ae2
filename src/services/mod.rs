//! Background services keeping the cache consistent with the server.

mod log_poller;

pub use log_poller::LogPoller;
