//! Handles settings for the application.
//!
//! Values are read, in increasing priority, from the optional `settings.toml`
//! (or the file given with `--config`) and from `FINLEDGER__*` environment
//! variables, e.g. `FINLEDGER__AUTH__SECRET`.
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub secret: String,
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
}

fn default_ttl_hours() -> i64 {
    24
}

fn default_password_cost() -> u32 {
    8
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
    pub auth: Auth,
}

#[derive(Debug, Parser)]
#[command(name = "finledger", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(Environment::with_prefix("FINLEDGER").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
