pub mod editing;
pub mod io;
pub mod markup;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, EditSession};
pub use io::IoError;
pub use markup::{deserialize, serialize};
pub use models::*;
