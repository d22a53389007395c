use serde::Deserialize;
use tracing::{debug, warn};
use std::{env, fmt, path::Path};
use std::path::PathBuf;
use std::fs::read_to_string;
use anyhow::{anyhow, bail, Result};


pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_INPUT: &str = "DineLine favicon.png";
// Tuned for the 1563x1563 source, gives very round corners
pub const DEFAULT_RADIUS: u32 = 300;
pub const DEFAULT_TARGETS: [&str; 4] = [
    "app/icon.png",
    "app/favicon.ico",
    "public/icon.png",
    "public/favicon.ico",
];

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Ico,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Ico => "ico",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub radius: Option<u32>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Target {
    pub fn new<T: Into<PathBuf>>(path: T) -> Self {
        Self { path: path.into(), radius: None, format: OutputFormat::default() }
    }
    /// True when the file extension names a different format than the one
    /// the target is encoded with, e.g. PNG bytes written to `favicon.ico`.
    pub fn extension_mismatch(&self) -> bool {
        let ext = match self.path.extension().and_then(|e| e.to_str()) {
            Some(e) => e.to_ascii_lowercase(),
            None => return false,
        };

        match ext.as_str() {
            "png" | "ico" => ext.ne(self.format.extension()),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub dir: PathBuf,
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_radius() -> u32 {
    DEFAULT_RADIUS
}

fn default_targets() -> Vec<Target> {
    DEFAULT_TARGETS.iter().map(Target::new).collect()
}

impl Config {
    pub fn new() -> Result<Self> {
        let path = match env::args().nth(1) {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from("."),
        };

        // Allow config path to point to a 'config.toml' file or a dir where it might be present.
        match &path {
            p if p.is_file() => Self::from_path(p),
            p if p.is_dir() => {
                let file = p.join(CONFIG_FILE);

                match file.is_file() {
                    true => Self::from_path(&file),
                    false => {
                        debug!("No {} in {}, using built-in targets", CONFIG_FILE, p.display());
                        Ok(Self::defaults(path))
                    }
                }
            },
            _ => bail!("Unable to determine config.toml path from {:?}", &path),
        }
    }
    pub fn defaults<T: Into<PathBuf>>(dir: T) -> Self {
        Self {
            dir: dir.into(),
            input: default_input(),
            radius: default_radius(),
            targets: default_targets(),
        }
    }
    pub fn from_path<T>(path: T) -> Result<Self>
    where T: AsRef<Path> {
        let path = path.as_ref();
        let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_owned();

        let contents = read_to_string(path).map_err(|e|
            anyhow!("Unable to read {} to string: {}", path.display(), e)
        )?;

        Self::parse(&contents, dir)
    }
    pub fn parse(contents: &str, dir: PathBuf) -> Result<Self> {
        let mut config = toml::from_str::<Self>(contents).map_err(|e|
            anyhow!("Unable to read config file as toml: {}", e)
        )?;

        if config.targets.is_empty() {
            bail!("Config defines an empty 'targets' list, nothing to write")
        }

        for (i, t) in config.targets.iter().enumerate() {
            if config.targets[..i].iter().any(|o| o.path.eq(&t.path)) {
                warn!("Target {:?} is listed more than once, later entry overwrites", t.path);
            }
        }

        debug!("Config dir set to {}", dir.display());

        // Add decided dir path to config
        config.dir = dir;

        Ok(config)
    }
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(&self.input)
    }
    pub fn target_path(&self, target: &Target) -> PathBuf {
        self.dir.join(&target.path)
    }
    pub fn radius_for(&self, target: &Target) -> u32 {
        target.radius.unwrap_or(self.radius)
    }
}
