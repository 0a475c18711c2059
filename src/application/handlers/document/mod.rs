//! Document use cases: assembling, rendering, generating and previewing CVs.

mod assemble_profile;
mod generate_document;
mod preview_document;
mod render_document;

pub use assemble_profile::ProfileAssembler;
pub use generate_document::{GenerateDocumentHandler, GeneratedDocument};
pub use preview_document::{DocumentPreview, PreviewDocumentHandler};
pub use render_document::DocumentRenderer;
