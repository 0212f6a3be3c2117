//! HTTP layer of the product application: routes, the request lifecycle
//! (interceptors and view rendering) and startup wiring.

pub mod dispatch;
pub mod errors;
pub mod interceptor;
pub mod routes;
pub mod startup;
pub mod state;
pub mod views;

pub use startup::run;
