//! Write a default config file

use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!("Edit [database] or set DATABASE_URL / POSTGRES_* before running `agroexpert serve`.");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}
