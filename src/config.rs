use std::path::PathBuf;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_ROUTE_PREFIX: &str = "/files/";

#[derive(Debug, Clone)]
pub struct Config {
    /// Server listening address
    pub addr: String,

    /// Directory served read-only as static assets
    pub public_dir: PathBuf,

    /// Directory whose entries are listed and downloadable
    pub files_dir: PathBuf,

    /// Route segment prepended to each entry name in listings
    pub route_prefix: String,

    /// Disables confinement of download names to `files_dir`
    pub allow_unsafe_names: bool,
}

impl Default for Config {
    fn default() -> Self {
        let public_dir = PathBuf::from(DEFAULT_PUBLIC_DIR);
        Config {
            addr: DEFAULT_ADDR.to_string(),
            files_dir: public_dir.join("files"),
            public_dir,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            allow_unsafe_names: false,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let vars = std::env::vars().collect::<Vec<_>>();
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::from_sources(&vars, &args)
    }

    /// Builds a config from environment pairs, then lets `--name=value`
    /// arguments override them.
    pub fn from_sources(vars: &[(String, String)], args: &[String]) -> Self {
        let env = |key: &str| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        let mut config = Config::default();
        let mut files_dir = None;

        if let Some(addr) = env("ADDR") {
            config.addr = addr;
        }
        if let Some(dir) = env("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env("FILES_DIR") {
            files_dir = Some(PathBuf::from(dir));
        }
        if let Some(prefix) = env("ROUTE_PREFIX") {
            config.route_prefix = prefix;
        }
        if let Some(flag) = env("ALLOW_UNSAFE_NAMES") {
            config.allow_unsafe_names = parse_bool(&flag);
        }

        for arg in args {
            if let Some(addr) = arg.strip_prefix("--addr=") {
                config.addr = addr.to_string();
            } else if let Some(dir) = arg.strip_prefix("--public-dir=") {
                config.public_dir = PathBuf::from(dir);
            } else if let Some(dir) = arg.strip_prefix("--files-dir=") {
                files_dir = Some(PathBuf::from(dir));
            } else if let Some(prefix) = arg.strip_prefix("--route-prefix=") {
                config.route_prefix = prefix.to_string();
            } else if arg == "--allow-unsafe-names" {
                config.allow_unsafe_names = true;
            }
        }

        // Follows the public dir unless set explicitly.
        config.files_dir = files_dir.unwrap_or_else(|| config.public_dir.join("files"));
        config
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
