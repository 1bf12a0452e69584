use std::env;

use crate::{env_flag, env_or};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    /// `DATABASE_URL`, required.
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").ok(),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            run_migrations: env_flag("RUN_MIGRATIONS"),
        }
    }
}
