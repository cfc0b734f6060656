pub mod forwarder_service;
pub mod parser_service;

pub use forwarder_service::ForwarderService;
pub use parser_service::ParserService;
