//! Application-wide constants

pub const MAX_NAME_LENGTH: u64 = 100;
pub const MAX_CUISINE_TYPE_LENGTH: u64 = 50;
pub const MAX_DESCRIPTION_LENGTH: u64 = 1000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILE_PREFIX: &str = "catalog.log";
pub const CONFIG_ENV_PREFIX: &str = "CATALOG";
