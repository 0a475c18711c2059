//! Wiring: ports in, router out.

use std::sync::Arc;

use axum::Router;

use crate::adapters::http::{app_router, ChatHandlers, CvHandlers};
use crate::application::handlers::chat::{
    GetHistoryHandler, SendMessageHandler, StartSessionHandler,
};
use crate::application::handlers::document::{
    DocumentRenderer, GenerateDocumentHandler, PreviewDocumentHandler, ProfileAssembler,
};
use crate::config::ServerConfig;
use crate::ports::{
    ChatSessionRepository, ExtractionOracle, ProfileRepository, RenderingEngineLauncher,
    UserRepository,
};

/// Everything the use cases need from the outside world.
#[derive(Clone)]
pub struct AppDependencies {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub chats: Arc<dyn ChatSessionRepository>,
    pub oracle: Arc<dyn ExtractionOracle>,
    pub launcher: Arc<dyn RenderingEngineLauncher>,
}

/// Builds every handler once and mounts them on the API router.
pub fn build_router(deps: AppDependencies, server: &ServerConfig) -> Router {
    let chat = ChatHandlers::new(
        Arc::new(StartSessionHandler::new(deps.users.clone(), deps.chats.clone())),
        Arc::new(SendMessageHandler::new(
            deps.users.clone(),
            deps.profiles.clone(),
            deps.chats.clone(),
            deps.oracle.clone(),
        )),
        Arc::new(GetHistoryHandler::new(deps.chats.clone())),
    );

    let assembler = Arc::new(ProfileAssembler::new(
        deps.users.clone(),
        deps.profiles.clone(),
        deps.oracle.clone(),
    ));
    let renderer = Arc::new(DocumentRenderer::new(deps.launcher.clone()));

    let cv = CvHandlers::new(
        Arc::new(GenerateDocumentHandler::new(
            deps.users.clone(),
            deps.chats.clone(),
            assembler.clone(),
            renderer,
        )),
        Arc::new(PreviewDocumentHandler::new(deps.users, deps.chats, assembler)),
    );

    app_router(chat, cv, server)
}
