use std::{
    collections::HashMap,
    env, fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use tracing::{debug, warn};

pub const DEFAULT_CONF_DIR: &str = "/etc/zecx-hpot";
pub const CONF_FILE_NAME: &str = "dashboard.conf";
pub const DEFAULT_COLLECTION: &str = "honeypots";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is undefined")]
    Missing(&'static str),
    #[error("{key} has an unsupported value: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("failed to read {}: {source}", path.display())]
    ConfFile { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            other => Err(other.to_string()),
        }
    }
}

/// The web-app style connection settings a Firebase project hands out.
#[derive(Clone, Default)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

// Keeps the api key out of startup logs.
impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Everything [`crate::storage::firestore::FirestoreEventStore`] needs.
#[derive(Clone)]
pub struct FirestoreSettings {
    pub base_url: String,
    pub project_id: String,
    pub collection: String,
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
    pub page_size: u32,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: StoreBackend,
    pub firebase: FirebaseConfig,
    pub collection: String,
    pub firestore_base_url: String,
    pub auth_token: Option<String>,
    pub page_size: u32,
    pub request_timeout: Duration,
}

impl Config {
    /// Environment first, then `dashboard.conf` in `HONEYPOT_CONF_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let conf_dir = env::var("HONEYPOT_CONF_DIR").unwrap_or_else(|_| DEFAULT_CONF_DIR.to_string());
        let file_values = load_conf_file(&Path::new(&conf_dir).join(CONF_FILE_NAME))?;

        Self::from_lookup(|key: &str| {
            env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match var("STORE_BACKEND") {
            Some(value) => value.parse().map_err(|value| ConfigError::Invalid {
                key: "STORE_BACKEND",
                value,
            })?,
            None => StoreBackend::Firestore,
        };

        let firebase = FirebaseConfig {
            api_key: var("FIREBASE_API_KEY"),
            auth_domain: var("FIREBASE_AUTH_DOMAIN"),
            project_id: var("FIREBASE_PROJECT_ID"),
            storage_bucket: var("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: var("FIREBASE_MESSAGING_SENDER_ID"),
            app_id: var("FIREBASE_APP_ID"),
        };

        let collection = var("HONEYPOT_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        // An emulator host wins over any configured base URL.
        let firestore_base_url = match var("FIRESTORE_EMULATOR_HOST") {
            Some(host) => format!("http://{}", host.trim()),
            None => var("FIRESTORE_BASE_URL").unwrap_or_else(|| DEFAULT_FIRESTORE_URL.to_string()),
        };

        let auth_token = var("FIRESTORE_AUTH_TOKEN");

        let page_size = parse_or(var("FIRESTORE_PAGE_SIZE"), "FIRESTORE_PAGE_SIZE", 300u32).max(1);

        let request_timeout = Duration::from_millis(parse_or(
            var("REQUEST_TIMEOUT_MS"),
            "REQUEST_TIMEOUT_MS",
            10_000u64,
        ));

        Ok(Self {
            backend,
            firebase,
            collection,
            firestore_base_url,
            auth_token,
            page_size,
            request_timeout,
        })
    }

    pub fn firestore_settings(&self) -> Result<FirestoreSettings, ConfigError> {
        let project_id = self
            .firebase
            .project_id
            .clone()
            .ok_or(ConfigError::Missing("FIREBASE_PROJECT_ID"))?;

        Ok(FirestoreSettings {
            base_url: self.firestore_base_url.clone(),
            project_id,
            collection: self.collection.clone(),
            api_key: self.firebase.api_key.clone(),
            auth_token: self.auth_token.clone(),
            page_size: self.page_size,
            request_timeout: self.request_timeout,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {key} value {raw:?}, using default: {default}");
            default
        }),
        None => default,
    }
}

/// `KEY=value` lines; `#` starts a comment. A missing file is empty.
pub fn load_conf_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No config file at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(source) => {
            return Err(ConfigError::ConfFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    Ok(parse_conf(&contents))
}

fn parse_conf(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
