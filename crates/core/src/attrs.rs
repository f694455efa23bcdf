//! Well-known span attribute keys and the fixed key lists built from them.

/// HTTP request method of a client or server span (`GET`, `POST`, ...).
pub const HTTP_REQUEST_METHOD: &str = "http.request.method";

/// Response status code; integer in most exporters.
pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";

/// Matched route template on the server side.
pub const HTTP_ROUTE: &str = "http.route";

/// Logical name or address of the remote peer of a client call.
pub const SERVER_ADDRESS: &str = "server.address";

/// Port of the remote peer; string or integer depending on the exporter.
pub const SERVER_PORT: &str = "server.port";

pub const SERVICE_NAME: &str = "service.name";

pub const URL_PATH: &str = "url.path";

pub const URL_SCHEME: &str = "url.scheme";

/// Absolute URL of an outgoing HTTP client call. Its presence marks a span as a
/// cross-service call candidate.
pub const URL_FULL: &str = "url.full";

/// Attribute keys kept by span reduction, in output order.
pub const RETAINED_KEYS: [&str; 9] = [
    HTTP_REQUEST_METHOD,
    HTTP_RESPONSE_STATUS_CODE,
    HTTP_ROUTE,
    SERVER_ADDRESS,
    SERVER_PORT,
    SERVICE_NAME,
    URL_PATH,
    URL_SCHEME,
    URL_FULL,
];

/// Substrings that mark a callee address as a database backend.
pub const DATABASE_KEYWORDS: [&str; 6] = [
    "mongo",
    "mysql",
    "redis",
    "postgres",
    "elasticsearch",
    "cassandra",
];

/// Method recorded for calls whose span carries no `http.request.method`.
pub const UNKNOWN_METHOD: &str = "UNKNOWN";

pub fn is_database_address(address: &str) -> bool {
    let lower = address.to_lowercase();
    DATABASE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
