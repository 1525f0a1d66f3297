pub mod memory;
pub mod queries;
pub mod types;

use async_trait::async_trait;

pub use memory::MemoryUserRepository;
pub use queries::PgUserRepository;
pub use types::*;

/// Storage seam for user accounts. Sliders only need lookups; creation is
/// used by seeding and test fixtures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error>;
    async fn find_ref(&self, id: i64) -> Result<Option<UserRef>, sqlx::Error>;
    /// All users ordered by login, for relationship dropdowns.
    async fn find_all_refs(&self) -> Result<Vec<UserRef>, sqlx::Error>;
    async fn create(&self, new_user: &NewUser) -> Result<i64, sqlx::Error>;
    async fn count(&self) -> Result<i64, sqlx::Error>;
}
