use serde::Deserialize;

fn def_http_host() -> String {
    String::from("127.0.0.1")
}

fn def_http_port() -> u16 {
    5000
}

fn def_db_max_connections() -> u32 {
    10
}

fn def_expose_error_detail() -> bool {
    true
}

fn def_service_api_url() -> String {
    String::from("http://127.0.0.1:5000/api")
}

/// Whether raw persistence error text is returned to API clients in the
/// envelope's `error` member. It is always logged either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetail {
    Expose,
    Hide,
}

impl ErrorDetail {
    pub fn reveal(self, err: &impl ToString) -> Option<String> {
        match self {
            ErrorDetail::Expose => Some(err.to_string()),
            ErrorDetail::Hide => None,
        }
    }
}

/// Server configuration, read from the environment (after `.env` is loaded).
#[derive(Deserialize, Debug)]
pub struct AppConfig {
    /// interface the http server binds to
    #[serde(default = "def_http_host")]
    pub http_host: String,

    #[serde(default = "def_http_port")]
    pub http_port: u16,

    /// postgres URL
    pub database_url: String,

    #[serde(default = "def_db_max_connections")]
    pub db_max_connections: u32,

    /// return backend error text to clients on 500 responses
    #[serde(default = "def_expose_error_detail")]
    pub expose_error_detail: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<AppConfig, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn error_detail(&self) -> ErrorDetail {
        if self.expose_error_detail {
            ErrorDetail::Expose
        } else {
            ErrorDetail::Hide
        }
    }
}

/// Configuration of the console client.
#[derive(Deserialize, Debug)]
pub struct ClientConfig {
    /// base url of the service API, including the `/api` prefix
    #[serde(default = "def_service_api_url")]
    pub service_api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<ClientConfig, envy::Error> {
        envy::from_env()
    }
}
