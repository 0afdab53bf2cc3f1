//! Authentication module

mod context;
mod storage;

pub use context::{use_auth, AuthContext, AuthProvider};
pub use storage::LocalStorageTokenStore;
