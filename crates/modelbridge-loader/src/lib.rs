pub mod autoload;
pub mod config;
pub mod modules;

pub use autoload::autoload;
pub use config::{load_config, load_config_from_path, load_config_or_default};
pub use modules::{app_dir, load_apps, load_module};
