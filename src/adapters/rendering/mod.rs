//! Rendering engine adapters.

mod wkhtmltopdf;

pub use wkhtmltopdf::{WkhtmltopdfEngine, WkhtmltopdfLauncher};
