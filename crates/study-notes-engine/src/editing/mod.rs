/*!
 * # Editing Core
 *
 * The editing surface holds one [`Document`](crate::models::Document) per
 * session and never mutates it in place.
 *
 * ## Edit Loop
 *
 * 1. Every structural edit is a **`Cmd`** (append, update, remove, move)
 * 2. `Document::apply` builds the next document from the current one
 * 3. The session swaps the new document in
 * 4. The preview is re-rendered from the new document
 *
 * Commands whose ids or indices do not match the current document are
 * no-ops.
 *
 * ## Module Structure
 *
 * - **`commands`**: `Cmd` and the pure document transformations
 * - **`ids`**: short process-local block identity tokens
 * - **`session`**: `EditSession`, the owner of the current document
 */

pub mod commands;
pub mod ids;
pub mod session;

pub use commands::{Cmd, append, move_block, remove, update};
pub use session::EditSession;
