use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Cloud bucket settings used by the image endpoints.
///
/// `public_url_template` accepts `{bucket}` and `{name}` placeholders; the
/// name is form-urlencoded before substitution.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_public_url_template")]
    pub public_url_template: String,
    #[serde(default = "default_delete_prefix")]
    pub delete_prefix: String,
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            credentials_path: default_credentials_path(),
            api_base: default_api_base(),
            public_url_template: default_public_url_template(),
            delete_prefix: default_delete_prefix(),
            staging_dir: default_staging_dir(),
            content_type: default_content_type(),
        }
    }
}

fn default_bucket() -> String { "importadorakaleth.appspot.com".into() }
fn default_credentials_path() -> String { "izenshy-projects-firebase.json".into() }
fn default_api_base() -> String { "https://storage.googleapis.com".into() }
fn default_public_url_template() -> String {
    "https://firebasestorage.googleapis.com/v0/b/{bucket}/o/{name}?alt=media".into()
}
fn default_delete_prefix() -> String { "api-dragonball/".into() }
fn default_staging_dir() -> String {
    std::env::temp_dir().join("dragonball-uploads").to_string_lossy().into_owned()
}
fn default_content_type() -> String { "media".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a configuration purely from environment variables, used when no
    /// `config.toml` is present.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        // 归一化 storage（凭证路径、bucket 可由环境变量覆盖）
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(bucket) = std::env::var("STORAGE_BUCKET") {
            if !bucket.trim().is_empty() { self.bucket = bucket; }
        }
        if let Ok(path) = std::env::var("GOOGLE_APPLICATION_CREDENTIALS") {
            if !path.trim().is_empty() { self.credentials_path = path; }
        }
        if let Ok(dir) = std::env::var("STORAGE_STAGING_DIR") {
            if !dir.trim().is_empty() { self.staging_dir = dir; }
        }
        self.api_base = self.api_base.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(anyhow!("storage.bucket is empty"));
        }
        if self.credentials_path.trim().is_empty() {
            return Err(anyhow!("storage.credentials_path is empty; set it or GOOGLE_APPLICATION_CREDENTIALS"));
        }
        if !self.public_url_template.contains("{name}") {
            return Err(anyhow!("storage.public_url_template must contain a {{name}} placeholder"));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(anyhow!("storage.api_base must start with http(s)"));
        }
        if self.staging_dir.trim().is_empty() {
            return Err(anyhow!("storage.staging_dir is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_file_with_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
[server]
host = "0.0.0.0"
port = 9000

[database]
url = "postgres://u:p@localhost:5432/dragonball"

[storage]
bucket = "my-bucket"
credentials_path = "/etc/creds.json"
"#
        )
        .unwrap();
        let mut cfg = load_from_file(f.path().to_str().unwrap()).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.storage.delete_prefix, "api-dragonball/");
        assert_eq!(cfg.storage.content_type, "media");
    }

    #[test]
    fn rejects_non_postgres_url() {
        let db = DatabaseConfig {
            url: "mysql://localhost/x".into(),
            min_connections: 1,
            max_connections: 2,
            connect_timeout_secs: 1,
            acquire_timeout_secs: 1,
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn storage_template_needs_name_placeholder() {
        let s = StorageConfig { public_url_template: "https://example.com/{bucket}".into(), ..Default::default() };
        assert!(s.validate().is_err());
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_worker_threads_normalized() {
        let mut s = ServerConfig { host: " ".into(), port: 8080, worker_threads: Some(0) };
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));
    }
}
