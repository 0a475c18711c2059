//! Folding extraction fragments into the accumulated profile.
//!
//! Scalar sections are overlaid key by key: a present, non-blank value
//! replaces the old one and everything else is kept. Collection sections are
//! appended in encounter order with no identity check, so the same job
//! mentioned twice yields two entries.

use super::profile::{Profile, ProfileFragment};
use super::sections::{PersonalInfo, WorkInfo};
use super::values::WorkPermitStatus;

/// Values that may arrive present-but-meaningless from extraction.
trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for u32 {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for bool {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for WorkPermitStatus {
    fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

fn overlay<T: Blank>(slot: &mut Option<T>, incoming: Option<T>) {
    if let Some(value) = incoming.filter(|v| !v.is_blank()) {
        *slot = Some(value);
    }
}

/// Combines `fragment` into `existing`, returning the new profile.
pub fn merge(existing: &Profile, fragment: ProfileFragment) -> Profile {
    let mut merged = existing.clone();

    if let Some(incoming) = fragment.personal_info {
        let base = merged.personal_info.take();
        let had_section = base.is_some();
        let combined = overlay_personal(base.unwrap_or_default(), incoming);
        if had_section || !combined.is_empty() {
            merged.personal_info = Some(combined);
        }
    }

    if let Some(incoming) = fragment.work_info {
        let base = merged.work_info.take();
        let had_section = base.is_some();
        let combined = overlay_work(base.unwrap_or_default(), incoming);
        if had_section || !combined.is_empty() {
            merged.work_info = Some(combined);
        }
    }

    merged.skills.extend(fragment.skills);
    merged.work_experience.extend(fragment.work_experience);
    merged.education.extend(fragment.education);
    merged.languages.extend(fragment.languages);
    merged.certifications.extend(fragment.certifications);

    merged
}

/// Overlays the present, non-blank fields of `incoming` onto `base`.
pub fn overlay_personal(mut base: PersonalInfo, incoming: PersonalInfo) -> PersonalInfo {
    overlay(&mut base.first_name, incoming.first_name);
    overlay(&mut base.last_name, incoming.last_name);
    overlay(&mut base.email, incoming.email);
    overlay(&mut base.phone, incoming.phone);
    overlay(&mut base.date_of_birth, incoming.date_of_birth);
    overlay(&mut base.nationality, incoming.nationality);
    overlay(&mut base.address, incoming.address);
    overlay(&mut base.city, incoming.city);
    overlay(&mut base.country, incoming.country);
    overlay(&mut base.postal_code, incoming.postal_code);
    base
}

/// Overlays the present, non-blank fields of `incoming` onto `base`.
pub fn overlay_work(mut base: WorkInfo, incoming: WorkInfo) -> WorkInfo {
    overlay(&mut base.target_position, incoming.target_position);
    overlay(&mut base.years_of_experience, incoming.years_of_experience);
    overlay(&mut base.current_job, incoming.current_job);
    overlay(&mut base.industry, incoming.industry);
    overlay(&mut base.availability_date, incoming.availability_date);
    overlay(&mut base.salary_expectation, incoming.salary_expectation);
    overlay(&mut base.work_permit_status, incoming.work_permit_status);
    overlay(&mut base.driving_license, incoming.driving_license);
    overlay(&mut base.willing_to_relocate, incoming.willing_to_relocate);
    base
}
