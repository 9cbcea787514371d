mod auth;
mod store;

pub use auth::TokenManager;
pub use store::CredentialStore;
pub use store::EnvFileStore;
pub use store::MemoryStore;
pub use store::merge_env_file;
