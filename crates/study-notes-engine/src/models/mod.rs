pub mod document;
pub mod post;

pub use document::*;
pub use post::*;
