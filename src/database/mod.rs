pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryBannerRepository;
pub use models::Banner;
pub use repository::{BannerRepository, PgBannerRepository};
