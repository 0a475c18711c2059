//! Profile domain module.
//!
//! The candidate profile accumulated over a conversation, the partial
//! fragments produced by extraction, and the merge rules that combine them.

mod merge;
#[allow(clippy::module_inception)]
mod profile;
mod sections;
mod values;

pub use merge::{merge, overlay_personal, overlay_work};
pub use profile::{Profile, ProfileFragment};
pub use sections::{
    non_blank, Certification, Education, Language, PersonalInfo, Skill, WorkExperience, WorkInfo,
};
pub use values::{SkillCategory, SkillLevel, WorkPermitStatus};
