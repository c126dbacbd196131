//! Configuration
//!
//! Every setting can come from the command line or the environment; a `.env`
//! file in the working directory is loaded first when present.

mod logging;
mod service;

pub use logging::{LogFormat, LoggingConfig};
pub use service::ServiceArgs;

/// Load a `.env` file if present.
pub fn load_dotenv() {
    // Missing .env is fine
    _ = dotenvy::dotenv();
}
