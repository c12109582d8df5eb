/// Database connection and table creation
pub mod database;

/// Application settings and category seeds from config.toml
pub mod settings;
