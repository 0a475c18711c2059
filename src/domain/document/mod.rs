//! Document domain module.
//!
//! Everything needed to turn a profile into a CV page short of actually
//! paginating it:
//!
//! - `records` - persisted user and profile shapes
//! - `model` - the render-ready model and the persisted-vs-accumulated precedence rule
//! - `markup` - model to structured markup tree
//! - `html` - markup tree to printable HTML

mod errors;
mod html;
mod markup;
mod model;
mod records;

pub use errors::DocumentError;
pub use html::to_html;
pub use markup::{
    build_markup, Column, Element, Entry, Item, Markup, Section, SectionKind,
    DEFAULT_LANGUAGE_LEVEL,
};
pub use model::{assemble, document_filename, DocumentModel};
pub use records::{CompletionStatus, PersistedProfile, UserRecord};
