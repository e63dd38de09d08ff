//! Request handling
//!
//! Turns an endpoint call (base, path, credential, parameters) into a typed
//! result, choosing a cache hint from the expiration registry and mapping
//! every failure into one `RequestError`.

mod handler;
mod types;

pub use handler::RequestHandler;
pub use types::ApiRequest;
