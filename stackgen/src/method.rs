//! HTTP transport selection for commands.

use strum::{Display, EnumString};

/// Command name prefixes that never change server state.
pub const READ_ONLY_PREFIXES: &[&str] = &["list", "get", "query", "search", "find"];

/// HTTP methods used to carry a command.
///
/// The query API only ever uses GET and POST: GET carries every parameter
/// in the URL, POST carries them in a form-encoded body.
///
/// ## Examples
///
/// ```rust
/// use stackgen::method::Transport;
///
/// assert_eq!(Transport::select("listZones", false, false), Transport::Get);
/// assert_eq!(Transport::select("deployVirtualMachine", false, false), Transport::Post);
///
/// let parsed: Transport = "POST".parse().unwrap();
/// assert_eq!(parsed, Transport::Post);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Transport {
    /// Parameters and signature in the query string.
    Get,
    /// Parameters and signature in a form body.
    Post,
}

impl Transport {
    /// Picks the transport for a command.
    ///
    /// POST when the call site forces it or the command is not a read-only
    /// verb; `get_only` forces GET unconditionally.
    pub fn select(command: &str, force_post: bool, get_only: bool) -> Self {
        if get_only {
            return Self::Get;
        }
        if force_post || !is_read_only(command) {
            Self::Post
        } else {
            Self::Get
        }
    }

    /// Returns `true` if this transport carries a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

/// Returns `true` if the command name starts with a read-only verb.
pub fn is_read_only(command: &str) -> bool {
    READ_ONLY_PREFIXES
        .iter()
        .any(|prefix| command.starts_with(prefix))
}
