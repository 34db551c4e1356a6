use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::WikiError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SKIN: &str = "default";

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the working tree served as the wiki.
    pub wiki_dir: Arc<PathBuf>,
    pub static_dir: Arc<PathBuf>,
    pub skin: String,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            wiki_dir: Arc::new(PathBuf::from("wiki")),
            static_dir: Arc::new(PathBuf::from("static")),
            skin: DEFAULT_SKIN.to_string(),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Create configuration with custom values
    pub fn with_custom(
        wiki_dir: PathBuf,
        static_dir: Option<PathBuf>,
        skin: Option<String>,
        port: Option<u16>,
        host: Option<String>,
    ) -> Self {
        Self {
            wiki_dir: Arc::new(wiki_dir),
            static_dir: Arc::new(static_dir.unwrap_or_else(|| PathBuf::from("static"))),
            skin: skin.unwrap_or_else(|| DEFAULT_SKIN.to_string()),
            port: port.unwrap_or(DEFAULT_PORT),
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        let ip = self
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or(std::net::IpAddr::from([0, 0, 0, 0]));
        std::net::SocketAddr::new(ip, self.port)
    }

    /// Fail with an error naming `wiki_dir` unless it is a directory.
    pub fn check_wiki_dir(&self) -> Result<(), WikiError> {
        if self.wiki_dir.is_dir() {
            return Ok(());
        }
        let message = format!("wiki directory {:?} does not exist", self.wiki_dir);
        Err(WikiError::Io(io::Error::new(io::ErrorKind::NotFound, message)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_values_override_defaults() {
        let config = Config::with_custom(PathBuf::from("/srv/wiki"), None, None, Some(9000), None);
        assert_eq!(config.wiki_dir.as_path(), std::path::Path::new("/srv/wiki"));
        assert_eq!(config.skin, DEFAULT_SKIN);
        assert_eq!(config.socket_addr().port(), 9000);
    }

    #[test]
    fn unparsable_host_binds_all_interfaces() {
        let config = Config::with_custom(PathBuf::from("w"), None, None, None, Some("nope".into()));
        assert!(config.socket_addr().ip().is_unspecified());
    }

    #[test]
    fn missing_wiki_dir_is_named_in_the_error() -> Result<(), WikiError> {
        let dir = tempfile::tempdir()?;
        let absent = dir.path().join("no-such-branch");
        let config = Config::with_custom(absent.clone(), None, None, None, None);
        let Err(WikiError::Io(err)) = config.check_wiki_dir() else {
            panic!("expected an I/O error");
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("no-such-branch"));

        let config = Config::with_custom(dir.path().to_path_buf(), None, None, None, None);
        config.check_wiki_dir()
    }
}
