pub mod errors;
pub mod db;
pub mod product;

pub use product::Product;

#[cfg(test)]
mod tests;
