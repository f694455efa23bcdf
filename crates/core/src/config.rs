use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpangraphError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Raw trace export: a file path or a glob pattern.
    pub trace_input: String,
    pub reduced_path: PathBuf,
    pub graph_path: PathBuf,
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_input: "trace1.json".to_string(),
            reduced_path: PathBuf::from("trace1-processed.json"),
            graph_path: PathBuf::from("service-dependency-graph.json"),
            pretty: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides, "config file")?;
        }
        let env_overrides = env_overrides(|key| env::var(key).ok());
        apply_overrides(&mut cfg, env_overrides, "environment")?;
        Ok(cfg)
    }
}

#[derive(Debug, Default)]
struct ConfigOverrides {
    trace_input: Option<String>,
    reduced_path: Option<PathBuf>,
    graph_path: Option<PathBuf>,
    pretty: Option<String>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("SPANGRAPH_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("spangraph/config.toml")
}

fn load_file_overrides(path: &Path) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| SpangraphError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed = parse_file_overrides(&raw)
        .map_err(|e| SpangraphError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

// `pretty` is accepted as a TOML bool or a string so file and env values share
// one parser.
fn parse_file_overrides(raw: &str) -> std::result::Result<ConfigOverrides, toml::de::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    #[derive(Deserialize)]
    struct FileOverrides {
        trace_input: Option<String>,
        reduced_path: Option<PathBuf>,
        graph_path: Option<PathBuf>,
        pretty: Option<Flag>,
    }

    let file: FileOverrides = toml::from_str(raw)?;
    Ok(ConfigOverrides {
        trace_input: file.trace_input,
        reduced_path: file.reduced_path,
        graph_path: file.graph_path,
        pretty: file.pretty.map(|flag| match flag {
            Flag::Bool(b) => b.to_string(),
            Flag::Text(s) => s,
        }),
    })
}

fn env_overrides(lookup: impl Fn(&str) -> Option<String>) -> ConfigOverrides {
    ConfigOverrides {
        trace_input: lookup("SPANGRAPH_TRACE_INPUT"),
        reduced_path: lookup("SPANGRAPH_REDUCED_PATH").map(PathBuf::from),
        graph_path: lookup("SPANGRAPH_GRAPH_PATH").map(PathBuf::from),
        pretty: lookup("SPANGRAPH_PRETTY"),
    }
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides, source: &str) -> Result<()> {
    if let Some(v) = overrides.trace_input {
        if v.trim().is_empty() {
            return Err(SpangraphError::Config(format!(
                "trace_input in {source} cannot be empty"
            )));
        }
        cfg.trace_input = v;
    }
    if let Some(v) = overrides.reduced_path {
        cfg.reduced_path = v;
    }
    if let Some(v) = overrides.graph_path {
        cfg.graph_path = v;
    }
    if let Some(v) = overrides.pretty {
        cfg.pretty = parse_flag(&v).ok_or_else(|| {
            SpangraphError::Config(format!("bad pretty in {source}: expected a boolean (value={v})"))
        })?;
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
