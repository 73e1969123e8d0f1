pub mod config;
pub mod logging;

pub mod fetch;
pub mod model;
pub mod orchestrator;
pub mod url_model;
