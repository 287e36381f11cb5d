pub mod toml_loader;

pub use toml_loader::{load_all_scenarios, load_toml_to_scenario};
