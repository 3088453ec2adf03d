// Restricted Markdown dialect: one interpreter, one block model, several presenters.
// The paginated exporter in `layout` consumes the same `Document`.

pub mod blocks;
pub mod handlers;
pub mod html;
pub mod interpreter;
pub mod spans;

pub use blocks::{BlockKind, Document, HeadingLevel};
pub use interpreter::interpret;
pub use spans::plain_text;
