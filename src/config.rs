use anyhow::{bail, Context};

use crate::registry::DeleteGuard;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub delete_guard: DeleteGuard,
    /// Start with the three demo records instead of an empty registry.
    pub seed_items: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            delete_guard: lookup("DELETE_GUARD")
                .unwrap_or_else(|| "legacy".to_string())
                .parse()
                .context("DELETE_GUARD must be `legacy` or `corrected`")?,
            seed_items: parse_bool(lookup("SEED_ITEMS").as_deref().unwrap_or("true"))
                .context("SEED_ITEMS must be true or false")?,
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised boolean `{other}`"),
    }
}
