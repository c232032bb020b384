//! Message handling - parsing and dispatching chat lines

pub mod dispatcher;
pub mod parser;

pub use dispatcher::CommandDispatcher;
pub use parser::MessageParser;
