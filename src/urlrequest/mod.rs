//! High-level request API.
//!
//! - [`request`]: the fluent [`RequestBuilder`](request::RequestBuilder)
//! - [`spec`]: the frozen [`RequestSpec`](spec::RequestSpec) it produces

pub mod request;
pub mod spec;

pub use request::RequestBuilder;
pub use spec::RequestSpec;
