//! Document model to markup tree.
//!
//! Decides what appears on the CV and in which order. The tree carries no
//! styling; `html` turns it into a printable page.

use std::collections::HashMap;

use super::model::DocumentModel;
use crate::domain::profile::{non_blank, Education, Skill, WorkExperience};

/// Whole document: a title plus sections in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    Summary,
    WorkExperience,
    Skills,
    Education,
    LanguagesAndCertifications,
    AdditionalInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: Option<String>,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Candidate name at the top of the page.
    Name(String),
    /// Short items laid out on one line.
    InlineList(Vec<String>),
    Paragraph(String),
    Entry(Entry),
    /// Labeled bucket of items, used for skill categories.
    Group { label: String, items: Vec<Item> },
    /// Side-by-side blocks.
    Columns(Vec<Column>),
    BulletList {
        caption: Option<String>,
        items: Vec<String>,
    },
}

/// A dated entry such as a job or a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub subtitle: Option<String>,
    /// Date range with an optional ` | location` suffix.
    pub meta: Option<String>,
    pub body: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub label: String,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub heading: String,
    pub items: Vec<Item>,
}

impl Markup {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Label shown for languages without a stated level.
pub const DEFAULT_LANGUAGE_LEVEL: &str = "Conversational";

/// Maps a document model to its markup tree. Pure and deterministic.
pub fn build_markup(model: &DocumentModel) -> Markup {
    let name = model.personal.full_name();

    let mut sections = vec![header(model, &name)];
    sections.extend(summary(model));
    sections.extend(work_experience(&model.work_experience));
    sections.extend(skills(&model.skills));
    sections.extend(education(&model.education));
    sections.extend(languages_and_certifications(model));
    sections.extend(additional_info(model));

    Markup {
        title: format!("CV - {}", name).trim_end_matches([' ', '-']).to_string(),
        sections,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Sections
// ════════════════════════════════════════════════════════════════════════════════

fn header(model: &DocumentModel, name: &str) -> Section {
    let p = &model.personal;
    let mut contacts: Vec<String> = Vec::new();

    contacts.extend(non_blank(&p.email).map(str::to_string));
    contacts.extend(non_blank(&p.phone).map(str::to_string));

    let location: Vec<&str> = [non_blank(&p.address), non_blank(&p.city), non_blank(&p.country)]
        .into_iter()
        .flatten()
        .collect();
    if !location.is_empty() {
        contacts.push(location.join(", "));
    }

    contacts.extend(non_blank(&p.nationality).map(str::to_string));

    let mut elements = vec![Element::Name(name.to_string())];
    if !contacts.is_empty() {
        elements.push(Element::InlineList(contacts));
    }

    Section {
        kind: SectionKind::Header,
        heading: None,
        elements,
    }
}

fn summary(model: &DocumentModel) -> Option<Section> {
    let text = non_blank(&model.summary)?;
    Some(Section {
        kind: SectionKind::Summary,
        heading: Some("Professional Summary".to_string()),
        elements: vec![Element::Paragraph(text.to_string())],
    })
}

fn work_experience(jobs: &[WorkExperience]) -> Option<Section> {
    if jobs.is_empty() {
        return None;
    }

    let elements = jobs
        .iter()
        .map(|job| {
            let end = if job.is_current {
                "Present"
            } else {
                non_blank(&job.end_date).unwrap_or("")
            };

            let mut body = Vec::new();
            body.extend(non_blank(&job.description).map(|d| Element::Paragraph(d.to_string())));
            body.extend(bullets("Key Responsibilities:", &job.responsibilities));
            body.extend(bullets("Achievements:", &job.achievements));

            Element::Entry(Entry {
                title: non_blank(&job.title).unwrap_or("").to_string(),
                subtitle: non_blank(&job.company).map(str::to_string),
                meta: meta_line(non_blank(&job.start_date), end, non_blank(&job.location)),
                body,
            })
        })
        .collect();

    Some(Section {
        kind: SectionKind::WorkExperience,
        heading: Some("Work Experience".to_string()),
        elements,
    })
}

fn skills(skills: &[Skill]) -> Option<Section> {
    if skills.is_empty() {
        return None;
    }

    let elements = group_skills(skills)
        .into_iter()
        .map(|(label, items)| Element::Group { label, items })
        .collect();

    Some(Section {
        kind: SectionKind::Skills,
        heading: Some("Skills".to_string()),
        elements,
    })
}

fn education(entries: &[Education]) -> Option<Section> {
    if entries.is_empty() {
        return None;
    }

    let elements = entries
        .iter()
        .map(|edu| {
            let end = if edu.is_completed {
                non_blank(&edu.end_date).unwrap_or("Completed")
            } else {
                "In Progress"
            };
            let title = non_blank(&edu.degree)
                .or_else(|| non_blank(&edu.field_of_study))
                .unwrap_or("Education");

            let mut body = Vec::new();
            body.extend(non_blank(&edu.description).map(|d| Element::Paragraph(d.to_string())));
            body.extend(non_blank(&edu.grade).map(|g| Element::Paragraph(format!("Grade: {}", g))));

            Element::Entry(Entry {
                title: title.to_string(),
                subtitle: non_blank(&edu.institution).map(str::to_string),
                meta: meta_line(non_blank(&edu.start_date), end, non_blank(&edu.location)),
                body,
            })
        })
        .collect();

    Some(Section {
        kind: SectionKind::Education,
        heading: Some("Education".to_string()),
        elements,
    })
}

fn languages_and_certifications(model: &DocumentModel) -> Option<Section> {
    let mut columns = Vec::new();

    if !model.languages.is_empty() {
        columns.push(Column {
            heading: "Languages".to_string(),
            items: model
                .languages
                .iter()
                .map(|lang| Item {
                    label: lang.name.clone(),
                    notes: vec![non_blank(&lang.proficiency)
                        .unwrap_or(DEFAULT_LANGUAGE_LEVEL)
                        .to_string()],
                })
                .collect(),
        });
    }

    if !model.certifications.is_empty() {
        columns.push(Column {
            heading: "Certifications".to_string(),
            items: model
                .certifications
                .iter()
                .map(|cert| Item {
                    label: cert.name.clone(),
                    notes: [non_blank(&cert.issuer), non_blank(&cert.date_obtained)]
                        .into_iter()
                        .flatten()
                        .map(str::to_string)
                        .collect(),
                })
                .collect(),
        });
    }

    if columns.is_empty() {
        return None;
    }

    Some(Section {
        kind: SectionKind::LanguagesAndCertifications,
        heading: None,
        elements: vec![Element::Columns(columns)],
    })
}

fn additional_info(model: &DocumentModel) -> Option<Section> {
    let info = &model.work_info;
    let mut items = Vec::new();

    if info.driving_license == Some(true) {
        items.push("Valid Driving License".to_string());
    }
    if info.willing_to_relocate == Some(true) {
        items.push("Willing to Relocate".to_string());
    }
    if let Some(status) = info
        .work_permit_status
        .as_ref()
        .filter(|s| !s.as_str().trim().is_empty())
    {
        items.push(format!("Work Status: {}", status.label()));
    }
    if let Some(date) = non_blank(&info.availability_date) {
        items.push(format!("Available from: {}", date));
    }

    if items.is_empty() {
        return None;
    }

    Some(Section {
        kind: SectionKind::AdditionalInfo,
        heading: Some("Additional Information".to_string()),
        elements: vec![Element::BulletList {
            caption: None,
            items,
        }],
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

/// Buckets skills by category in first-seen order. Unset category is `other`.
fn group_skills(skills: &[Skill]) -> Vec<(String, Vec<Item>)> {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<Item>> = HashMap::new();

    for skill in skills {
        let key = skill
            .category
            .as_ref()
            .map(|c| c.as_str().trim())
            .filter(|c| !c.is_empty())
            .unwrap_or("other")
            .to_string();

        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(Item {
            label: skill.name.clone(),
            notes: skill.level.iter().map(|l| l.as_str().to_string()).collect(),
        });
    }

    order
        .into_iter()
        .map(|key| {
            let items = buckets.remove(&key).unwrap_or_default();
            (category_label(&key), items)
        })
        .collect()
}

fn category_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

fn meta_line(start: Option<&str>, end: &str, location: Option<&str>) -> Option<String> {
    let start = start.unwrap_or("");
    if start.is_empty() && end.is_empty() && location.is_none() {
        return None;
    }

    let mut line = format!("{} - {}", start, end);
    if let Some(location) = location {
        line.push_str(" | ");
        line.push_str(location);
    }
    Some(line)
}

fn bullets(caption: &str, items: &[String]) -> Option<Element> {
    let items: Vec<String> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(Element::BulletList {
            caption: Some(caption.to_string()),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{
        Certification, Language, PersonalInfo, SkillCategory, SkillLevel, WorkInfo,
        WorkPermitStatus,
    };

    fn kinds(markup: &Markup) -> Vec<SectionKind> {
        markup.sections.iter().map(|s| s.kind).collect()
    }

    fn bullet_items(section: &Section) -> Vec<String> {
        match &section.elements[0] {
            Element::BulletList { items, .. } => items.clone(),
            other => panic!("expected bullet list, got {:?}", other),
        }
    }

    fn entry(section: &Section, index: usize) -> &Entry {
        match &section.elements[index] {
            Element::Entry(entry) => entry,
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn work_permit_is_rendered_through_label_table() {
        let model = DocumentModel {
            work_info: WorkInfo {
                work_permit_status: Some(WorkPermitStatus::from("work_permit")),
                ..WorkInfo::default()
            },
            ..DocumentModel::default()
        };

        let markup = build_markup(&model);
        let info = markup.section(SectionKind::AdditionalInfo).unwrap();
        assert_eq!(bullet_items(info), vec!["Work Status: Work Permit Holder"]);
    }

    #[test]
    fn unknown_permit_code_passes_through() {
        let model = DocumentModel {
            work_info: WorkInfo {
                work_permit_status: Some(WorkPermitStatus::from("blue_card")),
                driving_license: Some(true),
                willing_to_relocate: Some(false),
                availability_date: Some("2025-03-01".to_string()),
                ..WorkInfo::default()
            },
            ..DocumentModel::default()
        };

        let markup = build_markup(&model);
        let info = markup.section(SectionKind::AdditionalInfo).unwrap();
        assert_eq!(
            bullet_items(info),
            vec![
                "Valid Driving License",
                "Work Status: blue_card",
                "Available from: 2025-03-01"
            ]
        );
    }

    #[test]
    fn skills_grouped_in_first_seen_order() {
        let model = DocumentModel {
            skills: vec![
                Skill::new("Welding", SkillCategory::Technical),
                Skill::new("Teamwork", SkillCategory::Soft),
            ],
            ..DocumentModel::default()
        };

        let markup = build_markup(&model);
        let section = markup.section(SectionKind::Skills).unwrap();
        let labels: Vec<&str> = section
            .elements
            .iter()
            .map(|e| match e {
                Element::Group { label, .. } => label.as_str(),
                other => panic!("expected group, got {:?}", other),
            })
            .collect();
        assert_eq!(labels, vec!["TECHNICAL", "SOFT"]);
    }

    #[test]
    fn skill_groups_collect_repeats_and_default_to_other() {
        let model = DocumentModel {
            skills: vec![
                Skill::new("Forklift", SkillCategory::from("heavy_equipment")),
                Skill {
                    name: "Punctuality".to_string(),
                    ..Skill::default()
                },
                Skill::new("Crane", SkillCategory::from("heavy_equipment"))
                    .with_level(SkillLevel::Advanced),
            ],
            ..DocumentModel::default()
        };

        let groups = group_skills(&model.skills);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "HEAVY EQUIPMENT");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].notes, vec!["advanced".to_string()]);
        assert_eq!(groups[1].0, "OTHER");
    }

    #[test]
    fn current_job_shows_present_and_location() {
        let model = DocumentModel {
            work_experience: vec![
                WorkExperience {
                    title: Some("Welder".to_string()),
                    company: Some("Acme".to_string()),
                    start_date: Some("2019".to_string()),
                    end_date: Some("2021".to_string()),
                    is_current: true,
                    location: Some("Berlin".to_string()),
                    responsibilities: vec!["MIG welding".to_string()],
                    ..WorkExperience::default()
                },
                WorkExperience {
                    title: Some("Helper".to_string()),
                    start_date: Some("2015".to_string()),
                    end_date: Some("2019".to_string()),
                    ..WorkExperience::default()
                },
            ],
            ..DocumentModel::default()
        };

        let markup = build_markup(&model);
        let section = markup.section(SectionKind::WorkExperience).unwrap();

        let first = entry(section, 0);
        assert_eq!(first.meta.as_deref(), Some("2019 - Present | Berlin"));
        assert_eq!(first.subtitle.as_deref(), Some("Acme"));
        assert_eq!(
            first.body,
            vec![Element::BulletList {
                caption: Some("Key Responsibilities:".to_string()),
                items: vec!["MIG welding".to_string()],
            }]
        );

        let second = entry(section, 1);
        assert_eq!(second.meta.as_deref(), Some("2015 - 2019"));
        assert!(second.body.is_empty());
    }

    #[test]
    fn education_end_depends_on_completion() {
        let model = DocumentModel {
            education: vec![
                Education {
                    field_of_study: Some("Plumbing".to_string()),
                    start_date: Some("2010".to_string()),
                    ..Education::default()
                },
                Education {
                    start_date: Some("2022".to_string()),
                    end_date: Some("2024".to_string()),
                    is_completed: false,
                    grade: Some("B".to_string()),
                    ..Education::default()
                },
            ],
            ..DocumentModel::default()
        };

        let markup = build_markup(&model);
        let section = markup.section(SectionKind::Education).unwrap();

        let first = entry(section, 0);
        assert_eq!(first.title, "Plumbing");
        assert_eq!(first.meta.as_deref(), Some("2010 - Completed"));

        let second = entry(section, 1);
        assert_eq!(second.title, "Education");
        assert_eq!(second.meta.as_deref(), Some("2022 - In Progress"));
        assert_eq!(second.body, vec![Element::Paragraph("Grade: B".to_string())]);
    }

    #[test]
    fn header_lists_only_present_contacts() {
        let model = DocumentModel {
            personal: PersonalInfo {
                first_name: Some("John".to_string()),
                last_name: Some("Smith".to_string()),
                email: Some("john@example.com".to_string()),
                phone: Some("".to_string()),
                address: Some("1 Main St".to_string()),
                city: Some("Leeds".to_string()),
                nationality: Some("British".to_string()),
                ..PersonalInfo::default()
            },
            ..DocumentModel::default()
        };

        let markup = build_markup(&model);
        assert_eq!(markup.title, "CV - John Smith");

        let header = markup.section(SectionKind::Header).unwrap();
        assert_eq!(header.elements[0], Element::Name("John Smith".to_string()));
        assert_eq!(
            header.elements[1],
            Element::InlineList(vec![
                "john@example.com".to_string(),
                "1 Main St, Leeds".to_string(),
                "British".to_string(),
            ])
        );
    }

    #[test]
    fn sections_follow_fixed_order_and_skip_empty() {
        let model = DocumentModel {
            summary: Some("Reliable welder.".to_string()),
            skills: vec![Skill::new("Welding", SkillCategory::Technical)],
            languages: vec![Language::new("German", None)],
            ..DocumentModel::default()
        };

        let markup = build_markup(&model);
        assert_eq!(
            kinds(&markup),
            vec![
                SectionKind::Header,
                SectionKind::Summary,
                SectionKind::Skills,
                SectionKind::LanguagesAndCertifications,
            ]
        );
    }

    #[test]
    fn columns_only_for_non_empty_lists() {
        let model = DocumentModel {
            languages: vec![Language::new("German", None)],
            ..DocumentModel::default()
        };
        let markup = build_markup(&model);
        let section = markup.section(SectionKind::LanguagesAndCertifications).unwrap();
        match &section.elements[0] {
            Element::Columns(columns) => {
                assert_eq!(columns.len(), 1);
                assert_eq!(columns[0].heading, "Languages");
                assert_eq!(columns[0].items[0].notes, vec![DEFAULT_LANGUAGE_LEVEL]);
            }
            other => panic!("expected columns, got {:?}", other),
        }

        let model = DocumentModel {
            certifications: vec![Certification {
                name: "CSCS Card".to_string(),
                issuer: Some("CITB".to_string()),
                ..Certification::default()
            }],
            ..DocumentModel::default()
        };
        let markup = build_markup(&model);
        let section = markup.section(SectionKind::LanguagesAndCertifications).unwrap();
        match &section.elements[0] {
            Element::Columns(columns) => {
                assert_eq!(columns.len(), 1);
                assert_eq!(columns[0].heading, "Certifications");
                assert_eq!(columns[0].items[0].notes, vec!["CITB".to_string()]);
            }
            other => panic!("expected columns, got {:?}", other),
        }
    }

    #[test]
    fn empty_model_has_only_header() {
        let markup = build_markup(&DocumentModel::default());
        assert_eq!(kinds(&markup), vec![SectionKind::Header]);
        assert_eq!(markup.title, "CV");
    }
}
