mod document;
mod endpoint;
mod ext;
mod load;
mod schema;

pub use document::*;
pub use endpoint::*;
pub use ext::*;
pub use load::*;
pub use schema::*;
