pub mod error;
pub mod event;
pub mod response;

pub use error::ProxyError;
pub use event::{ProxyEvent, ProxyRequestContext, RequestIdentity};
pub use response::ProxyResponse;
