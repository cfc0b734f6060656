pub mod config_repo;
pub mod signals_repo;

pub use config_repo::ConfigRepository;
pub use signals_repo::SignalsRepository;
