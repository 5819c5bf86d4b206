pub mod decoder;
pub mod method;
pub mod orderedheaders;
pub mod requestbody;
pub mod response;
pub mod streamfactory;
pub mod transaction;

// Re-exports for convenience
pub use decoder::{ContentEncoding, Decoder};
pub use method::Method;
pub use orderedheaders::OrderedHeaderMap;
pub use requestbody::{BodyKind, RequestBody};
pub use response::HttpResponse;
