//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default size of the database connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "addresses.db";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geo-addresses";
