//! different utility modules used throughout the project
/// logger setup shared by the engine and the demo binary
pub mod logger;
/// parse the engine settings document (TOML) into EngineConfig
pub mod task_parser;
