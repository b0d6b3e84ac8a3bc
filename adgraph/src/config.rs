//! Configuration read from `adgraph/config.json` in XDG config directories.

use adgraph_core::context::Context;
use adgraph_core::debug::DebugMask;
use adgraph_core::graph::GraphSet;
use adgraph_core::scalar::Scalar;
use nanoserde::DeJson;
use std::path::PathBuf;

/// Adgraph configuration
///
/// ```json
/// { "debug": 3 }
/// ```
/// `ADGRAPH_DEBUG` env variable overrides debug from the file.
#[derive(DeJson, Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Debug bitmask, see [DebugMask]
    #[nserde(default)]
    pub debug: u32,
}

impl Config {
    /// Search through config directories and find adgraph/config.json.
    /// If not found or failed to parse, use defaults.
    pub fn load() -> Self {
        let env_debug = DebugMask::from_env();
        let verbose = env_debug.is_some_and(DebugMask::registry);
        let mut config = config_paths()
            .into_iter()
            .find_map(|path| std::fs::read_to_string(path).ok())
            .and_then(|file| {
                Config::parse(&file)
                    .map_err(|e| {
                        if verbose {
                            println!("Failed to parse adgraph/config.json, {e}");
                        }
                    })
                    .ok()
            })
            .unwrap_or_else(|| {
                if verbose {
                    println!("Failed to get adgraph config, using defaults.");
                }
                Config::default()
            });
        if let Some(debug) = env_debug {
            config.debug = debug.bits();
        }
        config
    }

    /// Parse config from json
    pub fn parse(json: &str) -> Result<Self, nanoserde::DeJsonErr> {
        Config::deserialize_json(json)
    }

    /// Debug mask
    pub fn debug(&self) -> DebugMask {
        DebugMask::new(self.debug)
    }

    /// New context using this configuration
    pub fn context<T: Scalar>(&self) -> Context<T> {
        Context::with_debug(self.debug())
    }

    /// New graph registry using this configuration
    pub fn graph_set(&self) -> GraphSet {
        GraphSet::with_debug(self.debug())
    }
}

// User config home is searched first
fn config_paths() -> Vec<PathBuf> {
    xdg::BaseDirectories::new()
        .map(|bd| {
            let mut dirs = vec![bd.get_config_home()];
            dirs.extend(bd.get_config_dirs());
            dirs
        })
        .unwrap_or_default()
        .into_iter()
        .map(|mut path| {
            path.push("adgraph/config.json");
            path
        })
        .collect()
}

#[test]
fn parse() {
    assert_eq!(Config::parse(r#"{ "debug": 5 }"#).ok().map(|c| c.debug), Some(5));
    assert_eq!(Config::parse("{}").ok().map(|c| c.debug), Some(0));
    assert!(Config::parse("{ \"debug\": ").is_err());
}
