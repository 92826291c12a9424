mod message;
mod request;

pub use message::{Message, Role};
pub use request::{ChatRequest, ServiceInfo};
