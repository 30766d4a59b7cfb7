use gateway::{CredentialProvider, EnvCredentials};

/// Agent bearer token, read fresh on every request: the environment first,
/// then the OS keychain entry managed by the config crate.
#[derive(Default)]
pub struct StoredCredentials {
    env: EnvCredentials,
}

impl StoredCredentials {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialProvider for StoredCredentials {
    fn access_token(&self) -> Option<String> {
        self.env
            .access_token()
            .or_else(|| config::get_secret(config::ACCESS_TOKEN_KEY).ok())
    }
}
