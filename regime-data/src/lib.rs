pub mod config_loader;
pub mod scenario_loader;

pub use config_loader::{ConfigLoadError, load_config_from_file, load_config_from_str};
pub use scenario_loader::{Scenario, ScenarioLoadError};
