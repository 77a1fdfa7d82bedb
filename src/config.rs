use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "blog.toml";

/// Where posts and comment threads are fetched from.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Sources {
    pub content_base: String,
    pub issue_tracker_base: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            content_base: "https://raw.githubusercontent.com/adam-drewery/blog/main/content".to_string(),
            issue_tracker_base: "https://api.github.com/repos/adam-drewery/blog".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_file: PathBuf::from("rss.xml"),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RssFeed {
    pub title: String,
    pub site_url: String,
    pub feed_url: String,
    pub description: String,
    pub language: String,
    pub managing_editor: String,
    pub web_master: String,
}

impl Default for RssFeed {
    fn default() -> Self {
        Self {
            title: "Adam Drewery's Blog".to_string(),
            site_url: "https://blog.drewery.uk".to_string(),
            feed_url: "https://raw.githubusercontent.com/adam-drewery/blog/main/rss.xml".to_string(),
            description: String::new(),
            language: "en".to_string(),
            managing_editor: "Adam Drewery".to_string(),
            web_master: "Adam Drewery".to_string(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: Sources,
    #[serde(default)]
    pub paths: Paths,
    pub log: Option<Log>,
    #[serde(default)]
    pub rss_feed: RssFeed,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let rest = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        output_file: parse_path(cfg.paths.output_file)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

/// Looks for the configuration next to the executable, then in the current
/// directory, then in the user config directory.
pub fn locate_config() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Reads the given configuration or the first one found by [`locate_config`].
/// Without any configuration file, defaults are used.
pub fn open_config(cfg_path: Option<PathBuf>) -> io::Result<Config> {
    let config_path = match cfg_path.or_else(locate_config) {
        Some(path) => path,
        None => {
            eprintln!("No {} found. Using defaults", CFG_FILE_NAME);
            return Ok(Config::default());
        }
    };

    eprintln!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    if let Some(mut log) = config.log {
        let location = match log.location {
            Some(location) => location,
            None => dirs::cache_dir()
                .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Could not find user cache dir"))?
                .join("drewery-blog").join("log").join("blog.log"),
        };
        eprintln!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
        config.log = Some(log);
    } else {
        eprintln!("Log disabled. Using the console");
    }

    Ok(config)
}
