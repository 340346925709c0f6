mod config;
mod logging;

pub use config::{load_config, load_rules};
pub use logging::init_logging;
