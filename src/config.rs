/*
 * Responsibility
 * - Load settings from the environment (stores, bucket, token verification, limits)
 * - Validate them once at startup (missing/invalid -> startup fails)
 * - Handlers never touch std::env; the values are injected through AppState
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_ADMIN_GROUP: &str = "hotel-manager";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where hotel records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotelStoreConfig {
    Postgres { database_url: String },
    Memory,
}

/// Where uploaded images live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStoreConfig {
    S3 { endpoint: Option<String> },
    Local { root: PathBuf },
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAlgorithm {
    Rs256,
    EdDsa,
}

impl FromStr for TokenAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RS256" => Ok(Self::Rs256),
            "EDDSA" => Ok(Self::EdDsa),
            _ => Err(ConfigError::Invalid("TOKEN_ALGORITHM")),
        }
    }
}

/// Signature verification settings. Absent = tokens are trusted as delivered
/// (an authorizer in front of the service has already verified them).
#[derive(Debug, Clone)]
pub struct TokenVerification {
    pub public_key_pem: String,
    pub algorithm: TokenAlgorithm,
    pub issuer: Option<String>,
    pub leeway_seconds: u64,
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub hotel_store: HotelStoreConfig,
    pub image_store: ImageStoreConfig,

    pub region: String,
    pub bucket_name: String,
    pub admin_group: String,

    pub token_verification: Option<TokenVerification>,

    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let hotel_store = match std::env::var("HOTEL_STORE")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => HotelStoreConfig::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => HotelStoreConfig::Memory,
            _ => return Err(ConfigError::Invalid("HOTEL_STORE")),
        };

        let image_store = match std::env::var("OBJECT_STORE")
            .unwrap_or_else(|_| "s3".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "s3" => ImageStoreConfig::S3 {
                endpoint: non_empty_var("S3_ENDPOINT"),
            },
            "local" => ImageStoreConfig::Local {
                root: PathBuf::from(
                    non_empty_var("OBJECT_STORE_LOCAL_PATH").unwrap_or_else(|| "./data".into()),
                ),
            },
            "memory" => ImageStoreConfig::Memory,
            _ => return Err(ConfigError::Invalid("OBJECT_STORE")),
        };

        let region = non_empty_var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());

        // `bucketName` is the variable name older deployments were provisioned with.
        let bucket_name = non_empty_var("HOTEL_BUCKET_NAME")
            .or_else(|| non_empty_var("bucketName"))
            .ok_or(ConfigError::Missing("HOTEL_BUCKET_NAME"))?;

        let admin_group =
            non_empty_var("HOTEL_ADMIN_GROUP").unwrap_or_else(|| DEFAULT_ADMIN_GROUP.to_string());

        let token_verification = match non_empty_var("TOKEN_PUBLIC_KEY_PEM") {
            Some(pem) => {
                let algorithm = non_empty_var("TOKEN_ALGORITHM")
                    .map(|v| v.parse::<TokenAlgorithm>())
                    .transpose()?
                    .unwrap_or(TokenAlgorithm::Rs256);

                let leeway_seconds = std::env::var("TOKEN_LEEWAY_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);

                Some(TokenVerification {
                    public_key_pem: pem.replace("\\n", "\n"),
                    algorithm,
                    issuer: non_empty_var("TOKEN_ISSUER"),
                    leeway_seconds,
                })
            }
            None => None,
        };

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("MAX_UPLOAD_BYTES"))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            addr,
            app_env,
            hotel_store,
            image_store,
            region,
            bucket_name,
            admin_group,
            token_verification,
            max_upload_bytes,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
