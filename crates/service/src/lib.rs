//! Service layer: the product store abstraction and the service that
//! forwards to it.
//! - `product::repository` is the persistence seam (SeaORM or in-memory).
//! - `product::service` is where business rules would go; today it only
//!   forwards, with every call wrapped by `aspect::around` for logging.

pub mod errors;
pub mod aspect;
pub mod product;
#[cfg(test)]
pub mod test_support;

pub use product::repository::{ProductRepository, SeaOrmProductRepository};
pub use product::repository::memory::InMemoryProductRepository;
pub use product::service::ProductService;
