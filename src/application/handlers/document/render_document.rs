//! DocumentRenderer - document model to paginated bytes.

use std::sync::Arc;

use crate::domain::document::{build_markup, to_html, DocumentError, DocumentModel};
use crate::ports::{PageSettings, RenderingEngineLauncher};

/// Renders through one freshly launched engine per call.
pub struct DocumentRenderer {
    launcher: Arc<dyn RenderingEngineLauncher>,
    page: PageSettings,
}

impl DocumentRenderer {
    pub fn new(launcher: Arc<dyn RenderingEngineLauncher>) -> Self {
        Self {
            launcher,
            page: PageSettings::CV,
        }
    }

    /// Produces the document bytes. The engine is closed on every path.
    pub async fn render(&self, model: &DocumentModel) -> Result<Vec<u8>, DocumentError> {
        let html = to_html(&build_markup(model));

        let mut engine = self
            .launcher
            .launch()
            .await
            .map_err(|e| DocumentError::render_failed(e.to_string()))?;

        let rendered = engine.render(&html, &self.page).await;

        if let Err(err) = engine.close().await {
            tracing::warn!(error = %err, "failed to close rendering engine");
        }

        let bytes = rendered.map_err(|e| {
            tracing::warn!(error = %e, "rendering failed");
            DocumentError::render_failed(e.to_string())
        })?;

        tracing::debug!(bytes = bytes.len(), "document rendered");
        Ok(bytes)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Rendering engine doubles that count launches and closes.

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::ports::{PageSettings, RenderError, RenderingEngine, RenderingEngineLauncher};

    #[derive(Debug, Default)]
    pub struct Counters {
        pub launched: AtomicU32,
        pub closed: AtomicU32,
    }

    impl Counters {
        pub fn launched(&self) -> u32 {
            self.launched.load(Ordering::SeqCst)
        }

        pub fn closed(&self) -> u32 {
            self.closed.load(Ordering::SeqCst)
        }
    }

    /// Launcher whose engines echo the HTML back, or fail when told to.
    #[derive(Debug, Clone, Default)]
    pub struct CountingLauncher {
        pub counters: Arc<Counters>,
        pub fail_render: bool,
    }

    impl CountingLauncher {
        pub fn failing() -> Self {
            Self {
                fail_render: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl RenderingEngineLauncher for CountingLauncher {
        async fn launch(&self) -> Result<Box<dyn RenderingEngine>, RenderError> {
            self.counters.launched.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingEngine {
                counters: self.counters.clone(),
                fail: self.fail_render,
            }))
        }
    }

    struct CountingEngine {
        counters: Arc<Counters>,
        fail: bool,
    }

    #[async_trait]
    impl RenderingEngine for CountingEngine {
        async fn render(&mut self, html: &str, _page: &PageSettings) -> Result<Vec<u8>, RenderError> {
            if self.fail {
                return Err(RenderError::EngineFailed {
                    status: "exit status: 1".to_string(),
                    stderr: "page crashed".to_string(),
                });
            }
            Ok(html.as_bytes().to_vec())
        }

        async fn close(self: Box<Self>) -> Result<(), RenderError> {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CountingLauncher;
    use super::*;
    use crate::domain::profile::PersonalInfo;
    use crate::ports::{RenderError, RenderingEngine};
    use async_trait::async_trait;

    fn model() -> DocumentModel {
        DocumentModel {
            personal: PersonalInfo {
                first_name: Some("Ana".to_string()),
                ..PersonalInfo::default()
            },
            ..DocumentModel::default()
        }
    }

    #[tokio::test]
    async fn successful_render_closes_engine() {
        let launcher = CountingLauncher::default();
        let renderer = DocumentRenderer::new(Arc::new(launcher.clone()));

        let bytes = renderer.render(&model()).await.unwrap();

        assert!(String::from_utf8(bytes).unwrap().contains("Ana"));
        assert_eq!(launcher.counters.launched(), 1);
        assert_eq!(launcher.counters.closed(), 1);
    }

    #[tokio::test]
    async fn failed_render_still_closes_engine() {
        let launcher = CountingLauncher::failing();
        let renderer = DocumentRenderer::new(Arc::new(launcher.clone()));

        let err = renderer.render(&model()).await.unwrap_err();

        assert!(matches!(err, DocumentError::RenderFailed(_)));
        assert_eq!(launcher.counters.launched(), 1);
        assert_eq!(launcher.counters.closed(), 1);
    }

    #[tokio::test]
    async fn each_render_gets_its_own_engine() {
        let launcher = CountingLauncher::default();
        let renderer = DocumentRenderer::new(Arc::new(launcher.clone()));

        renderer.render(&model()).await.unwrap();
        renderer.render(&model()).await.unwrap();

        assert_eq!(launcher.counters.launched(), 2);
        assert_eq!(launcher.counters.closed(), 2);
    }

    struct NoEngine;

    #[async_trait]
    impl RenderingEngineLauncher for NoEngine {
        async fn launch(&self) -> Result<Box<dyn RenderingEngine>, RenderError> {
            Err(RenderError::Launch("wkhtmltopdf: not found".to_string()))
        }
    }

    #[tokio::test]
    async fn launch_failure_is_render_failure() {
        let renderer = DocumentRenderer::new(Arc::new(NoEngine));
        let err = renderer.render(&model()).await.unwrap_err();
        assert!(matches!(err, DocumentError::RenderFailed(_)));
    }
}
