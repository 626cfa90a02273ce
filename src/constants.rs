//! Centralized constants for wire paths, headers, and defaults.

/// Path listing the child namespaces of the root namespace.
pub const NAMESPACES_PATH: &str = "/v1/sys/namespaces";

/// Path of the identity group collection (listing and per-id reads).
pub const GROUPS_PATH: &str = "/v1/identity/group";

/// Query flag that turns a GET into a listing.
pub const LIST_QUERY: &str = "list=true";

/// Non-standard HTTP verb used by Vault to enumerate child keys.
pub const LIST_VERB: &str = "LIST";

/// Header carrying the client token.
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Header scoping a request to a namespace.
pub const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Default export file name, written to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "ad_groups_by_namespace.csv";

/// Fixed export header.
pub const CSV_HEADER: [&str; 3] = ["namespace", "AD group name", "group policies"];

/// Separator used when flattening a policy list into one field.
pub const POLICY_SEPARATOR: &str = ", ";

/// Default pause after each namespace, in seconds.
pub const DEFAULT_DELAY_SECS: u64 = 2;

/// Maximum number of response body characters kept in an error message.
pub const MAX_ERROR_BODY_CHARS: usize = 200;
