//! Configuration for the storefront identity store

/// Password rules enforced by the in-process store on user creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub required_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            required_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordPolicy {
    /// Check a candidate password, returning one message per failed rule
    pub fn check(&self, password: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if password.chars().count() < self.required_length {
            errors.push(format!(
                "Passwords must be at least {} characters.",
                self.required_length
            ));
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_alphanumeric()) {
            errors.push("Passwords must have at least one non alphanumeric character.".into());
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Passwords must have at least one digit ('0'-'9').".into());
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push("Passwords must have at least one lowercase ('a'-'z').".into());
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push("Passwords must have at least one uppercase ('A'-'Z').".into());
        }
        errors
    }
}

/// Identity store configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Password rules applied on user creation
    pub password_policy: PasswordPolicy,

    /// Reject a new user whose email is already registered
    pub require_unique_email: bool,

    /// Argon2 memory cost in KiB (default: 19456 = 19 MiB)
    pub hash_memory_kib: u32,

    /// Argon2 iteration count
    pub hash_iterations: u32,

    /// Capacity of the actor mailbox
    pub mailbox_capacity: usize,
}

impl IdentityConfig {
    /// Create config with sensible defaults
    pub fn new() -> Self {
        Self {
            password_policy: PasswordPolicy::default(),
            require_unique_email: false,
            hash_memory_kib: 19 * 1024,
            hash_iterations: 2,
            mailbox_capacity: 256,
        }
    }

    /// Defaults overridden by `STOREFRONT_*` environment variables
    ///
    /// Recognised: `STOREFRONT_PASSWORD_MIN_LENGTH`,
    /// `STOREFRONT_REQUIRE_UNIQUE_EMAIL`, `STOREFRONT_HASH_MEMORY_KIB`,
    /// `STOREFRONT_HASH_ITERATIONS`. Unparseable values keep the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::new();
        if let Some(len) = env_parse("STOREFRONT_PASSWORD_MIN_LENGTH") {
            cfg.password_policy.required_length = len;
        }
        if let Some(unique) = env_parse("STOREFRONT_REQUIRE_UNIQUE_EMAIL") {
            cfg.require_unique_email = unique;
        }
        if let Some(kib) = env_parse("STOREFRONT_HASH_MEMORY_KIB") {
            cfg.hash_memory_kib = kib;
        }
        if let Some(iterations) = env_parse("STOREFRONT_HASH_ITERATIONS") {
            cfg.hash_iterations = iterations;
        }
        cfg
    }

    /// Override the password policy
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    /// Require unique emails
    pub fn with_unique_email(mut self, unique: bool) -> Self {
        self.require_unique_email = unique;
        self
    }

    /// Override Argon2 cost parameters
    pub fn with_hash_cost(mut self, memory_kib: u32, iterations: u32) -> Self {
        self.hash_memory_kib = memory_kib;
        self.hash_iterations = iterations;
        self
    }

    /// Override the actor mailbox capacity
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
