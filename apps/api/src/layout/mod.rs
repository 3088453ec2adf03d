// Export layout: static font metrics, the paginated compositor and PDF output.
// Composition is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod compositor;
pub mod font_metrics;
pub mod pdf;

// Re-export the public API consumed by the export handlers.
pub use compositor::{compose_package, ExportError};
pub use font_metrics::{default_page_config, PageConfig};
pub use pdf::render_pdf;
