pub const CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const API_PREFIX: &str = "api";

pub const CHECKSUM_CHUNK_SIZE: usize = 4096;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024; // 16MiB
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

pub const PASSWORD_DEBOUNCE_MS: u64 = 500;
pub const PASSWORD_MIN_AUTO_ANALYZE_LEN: usize = 4; // analysis triggers on input only past 3 chars
pub const ALERT_AUTO_DISMISS_SECS: u64 = 5;
pub const COPY_FEEDBACK_SECS: u64 = 2;

pub const LEAKCHECK_PUBLIC_URL: &str = "https://leakcheck.io/api/public";
pub const BREACH_MAX_SOURCES: usize = 20;
