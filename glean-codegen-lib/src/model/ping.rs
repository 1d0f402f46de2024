use super::ordered::OrderedMap;

/// Ping names that are built into the runtime library.
pub const RESERVED_PING_NAMES: &[&str] = &["baseline", "metrics", "events", "deletion-request"];

/// A validated ping definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub name: String,
    pub description: String,
    pub include_client_id: bool,
    pub send_if_empty: bool,
    pub bugs: Vec<String>,
    pub data_reviews: Vec<String>,
    pub notification_emails: Vec<String>,

    /// Reason codes mapped to their descriptions, in declaration order
    pub reasons: OrderedMap<String>,
    pub origin: String,
}

impl Ping {
    #[must_use]
    pub fn is_reserved_name(name: &str) -> bool {
        RESERVED_PING_NAMES.contains(&name)
    }
}
