//! Central constants for the dewiki application

/// Default values for GitHub API access
pub mod github {
    /// GitHub API base URL
    pub const API_BASE: &str = dewiki_github::DEFAULT_API_BASE;

    /// Items requested per page; also the largest page GitHub serves
    pub const PAGE_SIZE: u32 = dewiki_github::MAX_PER_PAGE;

    /// Pages fetched per listing before it is declared runaway
    pub const MAX_PAGES: u32 = 1000;
}

/// Token shape and authorization requirements
pub mod credentials {
    /// Length of a classic personal access token
    pub const TOKEN_LENGTH: usize = 40;

    /// Scopes a token must carry, checked in this order
    pub const REQUIRED_SCOPES: [&str; 2] = ["read:org", "repo"];

    /// Message shown when asking for a token
    pub const TOKEN_PROMPT: &str =
        "Please enter a GitHub token with \"repo\" and \"read:org\" permissions";
}

/// Bounded task pool defaults
pub mod pool {
    /// Wiki updates in flight at once
    pub const DEFAULT_CONCURRENCY: usize = 5;

    /// Upper bound accepted on the command line
    pub const MAX_CONCURRENCY: usize = 64;
}

/// Retry policy defaults for transient API failures
pub mod retry {
    pub const MAX_ATTEMPTS: u32 = 3;
    pub const BASE_DELAY_MS: u64 = 500;
    pub const MAX_DELAY_MS: u64 = 8_000;
}

/// Process exit statuses
pub mod exit {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    /// Operator cancelled a prompt (Ctrl-C / Esc)
    pub const ABORTED: u8 = 130;
}
