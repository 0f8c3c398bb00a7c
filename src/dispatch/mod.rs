//! Event dispatch and reply pipeline

pub mod dispatcher;
pub mod generator;

pub use dispatcher::Dispatcher;
pub use generator::ReplyGenerator;
