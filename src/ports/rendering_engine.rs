//! Rendering Engine Port - paginates HTML into a binary document.
//!
//! An engine instance is a scoped resource: it is launched for one render,
//! used exactly once and then closed, whether or not rendering succeeded.
//! Instances are never pooled or shared between requests.

use async_trait::async_trait;
use thiserror::Error;

/// Page geometry handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub size: PageSize,
    pub margin_top_mm: u32,
    pub margin_right_mm: u32,
    pub margin_bottom_mm: u32,
    pub margin_left_mm: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
}

impl PageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
        }
    }
}

impl PageSettings {
    /// A4 with 20mm top/bottom and 15mm left/right margins.
    pub const CV: PageSettings = PageSettings {
        size: PageSize::A4,
        margin_top_mm: 20,
        margin_right_mm: 15,
        margin_bottom_mm: 20,
        margin_left_mm: 15,
    };
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::CV
    }
}

/// Acquires rendering engine instances.
#[async_trait]
pub trait RenderingEngineLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn RenderingEngine>, RenderError>;
}

/// One live engine instance.
#[async_trait]
pub trait RenderingEngine: Send {
    /// Convert a complete HTML page into document bytes.
    async fn render(&mut self, html: &str, page: &PageSettings) -> Result<Vec<u8>, RenderError>;

    /// Release the instance. Must be safe to call after a failed render.
    async fn close(self: Box<Self>) -> Result<(), RenderError>;
}

/// Rendering failures. All of them are fatal to the render request.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to launch rendering engine: {0}")]
    Launch(String),

    #[error("rendering engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendering engine exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },

    #[error("rendering engine produced no output")]
    EmptyOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_page_has_fixed_margins() {
        let page = PageSettings::default();
        assert_eq!(page.size.as_str(), "A4");
        assert_eq!((page.margin_top_mm, page.margin_bottom_mm), (20, 20));
        assert_eq!((page.margin_left_mm, page.margin_right_mm), (15, 15));
    }

    #[test]
    fn launcher_is_object_safe() {
        fn _accepts_dyn(_launcher: &dyn RenderingEngineLauncher) {}
    }
}
