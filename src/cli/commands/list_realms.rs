//! List realms command implementation

use super::exit_code_for;
use crate::adapters::store::FileStore;
use crate::config::load_config;
use crate::core::export::list_realms;
use clap::Args;

/// Arguments for the list-realms command
#[derive(Args, Debug)]
pub struct ListRealmsArgs {}

impl ListRealmsArgs {
    /// Execute the list-realms command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let store = match FileStore::open(&config.store.path) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to open store");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        let realms = match list_realms(&store) {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to list realms");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if realms.is_empty() {
            println!("No realms found in {}", config.store.path);
            return Ok(0);
        }

        println!("📋 Realms ({}):", realms.len());
        for realm in &realms {
            println!("  {} ({})", realm.name, realm.id);
        }

        Ok(0)
    }
}
