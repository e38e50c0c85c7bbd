//! Server configuration

use storefront_identity::IdentityConfig;

use crate::error::{Result, ServerError};

/// Runtime settings for the admin HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to bind on all interfaces
    pub port: u16,

    /// HS256 secret administrator tokens are signed with
    pub jwt_secret: String,

    /// Role a token must carry to reach `/admin`
    pub admin_role: String,

    /// Settings for the in-process identity store
    pub identity: IdentityConfig,
}

impl ServerConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            port: 8080,
            jwt_secret: jwt_secret.into(),
            admin_role: "Administrators".into(),
            identity: IdentityConfig::new(),
        }
    }

    /// Read `PORT`, `ADMIN_JWT_SECRET` and `ADMIN_ROLE`, plus the identity
    /// store's `STOREFRONT_*` variables
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::new(std::env::var("ADMIN_JWT_SECRET").unwrap_or_default());
        cfg.identity = IdentityConfig::from_env();

        if let Ok(port) = std::env::var("PORT") {
            cfg.port = port
                .parse()
                .map_err(|_| ServerError::Config(format!("PORT is not a valid port: {port}")))?;
        }
        if let Ok(role) = std::env::var("ADMIN_ROLE") {
            if !role.trim().is_empty() {
                cfg.admin_role = role;
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_admin_role(mut self, role: impl Into<String>) -> Self {
        self.admin_role = role.into();
        self
    }

    pub fn with_identity(mut self, identity: IdentityConfig) -> Self {
        self.identity = identity;
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// A signing secret is mandatory whenever token checks are compiled in
    pub fn validate(&self) -> Result<()> {
        if cfg!(feature = "auth") && self.jwt_secret.is_empty() {
            return Err(ServerError::Config("ADMIN_JWT_SECRET must be set".into()));
        }
        Ok(())
    }
}
