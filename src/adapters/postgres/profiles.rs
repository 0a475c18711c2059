//! PostgreSQL implementation of ProfileRepository.
//!
//! The profile row holds the work-info scalars plus languages and
//! certifications as JSONB. Skills, work experience and education live in
//! child tables and are read back in insertion order.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::document::{CompletionStatus, PersistedProfile};
use crate::domain::foundation::{DomainError, ErrorCode, ProfileId, Timestamp, UserId};
use crate::domain::profile::{
    non_blank, Certification, Education, Language, Skill, SkillCategory, SkillLevel,
    WorkExperience, WorkInfo, WorkPermitStatus,
};
use crate::ports::ProfileRepository;

#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))
    }

    async fn touch(&self, id: &ProfileId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE cv_profiles SET updated_at = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(Timestamp::now().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to touch profile", e))?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }
        Ok(())
    }

    async fn load_collections(&self, profile: &mut PersistedProfile) -> Result<(), DomainError> {
        let id = *profile.id.as_uuid();

        let skills = sqlx::query(
            "SELECT name, category, level, years_of_experience FROM skills \
             WHERE profile_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch skills", e))?;

        let work = sqlx::query(
            r#"
            SELECT job_title, company_name, location, start_date, end_date, is_current_job,
                   description, responsibilities, achievements, industry, employment_type
            FROM work_experiences
            WHERE profile_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch work experience", e))?;

        let education = sqlx::query(
            r#"
            SELECT institution_name, degree, field_of_study, location, start_date, end_date,
                   is_completed, grade, description, education_type
            FROM educations
            WHERE profile_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch education", e))?;

        profile.skills = skills.iter().map(row_to_skill).collect::<Result<_, _>>()?;
        profile.work_experience = work
            .iter()
            .map(row_to_work_experience)
            .collect::<Result<_, _>>()?;
        profile.education = education
            .iter()
            .map(row_to_education)
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: &PersistedProfile) -> Result<(), DomainError> {
        let w = &profile.work_info;
        let mut tx = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO cv_profiles (
                id, user_id, summary, target_position, years_of_experience, current_job,
                industry, availability_date, salary_expectation, work_permit_status,
                driving_license, willing_to_relocate, languages, certifications,
                completion_status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(profile.user_id.as_uuid())
        .bind(non_blank(&profile.summary))
        .bind(non_blank(&w.target_position))
        .bind(w.years_of_experience.map(to_db_int))
        .bind(non_blank(&w.current_job))
        .bind(non_blank(&w.industry))
        .bind(non_blank(&w.availability_date))
        .bind(non_blank(&w.salary_expectation))
        .bind(w.work_permit_status.as_ref().map(|s| s.as_str()))
        .bind(w.driving_license)
        .bind(w.willing_to_relocate)
        .bind(Json(&profile.languages))
        .bind(Json(&profile.certifications))
        .bind(profile.completion_status.as_str())
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert profile", e))?;

        insert_skills(&mut tx, &profile.id, &profile.skills).await?;
        insert_work_experience(&mut tx, &profile.id, &profile.work_experience).await?;
        insert_education(&mut tx, &profile.id, &profile.education).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit profile", e))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<PersistedProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, summary, target_position, years_of_experience, current_job,
                   industry, availability_date, salary_expectation, work_permit_status,
                   driving_license, willing_to_relocate, languages, certifications,
                   completion_status, created_at, updated_at
            FROM cv_profiles
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch profile", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut profile = row_to_profile(&row)?;
        self.load_collections(&mut profile).await?;
        Ok(Some(profile))
    }

    async fn update_work_info(&self, id: &ProfileId, info: &WorkInfo) -> Result<(), DomainError> {
        // NULL parameters keep the stored value.
        let result = sqlx::query(
            r#"
            UPDATE cv_profiles SET
                target_position     = COALESCE($2, target_position),
                years_of_experience = COALESCE($3, years_of_experience),
                current_job         = COALESCE($4, current_job),
                industry            = COALESCE($5, industry),
                availability_date   = COALESCE($6, availability_date),
                salary_expectation  = COALESCE($7, salary_expectation),
                work_permit_status  = COALESCE($8, work_permit_status),
                driving_license     = COALESCE($9, driving_license),
                willing_to_relocate = COALESCE($10, willing_to_relocate),
                updated_at          = $11
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(non_blank(&info.target_position))
        .bind(info.years_of_experience.map(to_db_int))
        .bind(non_blank(&info.current_job))
        .bind(non_blank(&info.industry))
        .bind(non_blank(&info.availability_date))
        .bind(non_blank(&info.salary_expectation))
        .bind(
            info.work_permit_status
                .as_ref()
                .map(|s| s.as_str().trim())
                .filter(|s| !s.is_empty()),
        )
        .bind(info.driving_license)
        .bind(info.willing_to_relocate)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update work info", e))?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }
        Ok(())
    }

    async fn update_summary(&self, id: &ProfileId, summary: &str) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE cv_profiles SET summary = $2, updated_at = $3 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(summary)
                .bind(Timestamp::now().as_datetime())
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to update summary", e))?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM cv_profiles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete profile", e))?;
        Ok(())
    }

    async fn bulk_insert_skills(&self, id: &ProfileId, skills: &[Skill]) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        insert_skills(&mut tx, id, skills).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit skills", e))?;
        self.touch(id).await
    }

    async fn bulk_insert_work_experience(
        &self,
        id: &ProfileId,
        entries: &[WorkExperience],
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        insert_work_experience(&mut tx, id, entries).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit work experience", e))?;
        self.touch(id).await
    }

    async fn bulk_insert_education(
        &self,
        id: &ProfileId,
        entries: &[Education],
    ) -> Result<(), DomainError> {
        let mut tx = self.begin().await?;
        insert_education(&mut tx, id, entries).await?;
        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit education", e))?;
        self.touch(id).await
    }

    async fn delete_skills(&self, id: &ProfileId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM skills WHERE profile_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete skills", e))?;
        self.touch(id).await
    }

    async fn delete_work_experience(&self, id: &ProfileId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM work_experiences WHERE profile_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete work experience", e))?;
        self.touch(id).await
    }

    async fn delete_education(&self, id: &ProfileId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM educations WHERE profile_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete education", e))?;
        self.touch(id).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Collection inserts
// ════════════════════════════════════════════════════════════════════════════

async fn insert_skills(
    tx: &mut Transaction<'static, Postgres>,
    id: &ProfileId,
    skills: &[Skill],
) -> Result<(), DomainError> {
    for skill in skills {
        sqlx::query(
            "INSERT INTO skills (profile_id, name, category, level, years_of_experience) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id.as_uuid())
        .bind(skill.name.trim())
        .bind(skill.category.as_ref().map(|c| c.as_str()))
        .bind(skill.level.as_ref().map(|l| l.as_str()))
        .bind(skill.years_of_experience.map(to_db_int))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert skill", e))?;
    }
    Ok(())
}

async fn insert_work_experience(
    tx: &mut Transaction<'static, Postgres>,
    id: &ProfileId,
    entries: &[WorkExperience],
) -> Result<(), DomainError> {
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO work_experiences (
                profile_id, job_title, company_name, location, start_date, end_date,
                is_current_job, description, responsibilities, achievements, industry,
                employment_type
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(id.as_uuid())
        .bind(non_blank(&entry.title))
        .bind(non_blank(&entry.company))
        .bind(non_blank(&entry.location))
        .bind(non_blank(&entry.start_date))
        .bind(non_blank(&entry.end_date))
        .bind(entry.is_current)
        .bind(non_blank(&entry.description))
        .bind(Json(&entry.responsibilities))
        .bind(Json(&entry.achievements))
        .bind(non_blank(&entry.industry))
        .bind(non_blank(&entry.employment_type))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert work experience", e))?;
    }
    Ok(())
}

async fn insert_education(
    tx: &mut Transaction<'static, Postgres>,
    id: &ProfileId,
    entries: &[Education],
) -> Result<(), DomainError> {
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO educations (
                profile_id, institution_name, degree, field_of_study, location, start_date,
                end_date, is_completed, grade, description, education_type
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id.as_uuid())
        .bind(non_blank(&entry.institution))
        .bind(non_blank(&entry.degree))
        .bind(non_blank(&entry.field_of_study))
        .bind(non_blank(&entry.location))
        .bind(non_blank(&entry.start_date))
        .bind(non_blank(&entry.end_date))
        .bind(entry.is_completed)
        .bind(non_blank(&entry.grade))
        .bind(non_blank(&entry.description))
        .bind(non_blank(&entry.education_type))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert education", e))?;
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════

fn read_err(e: sqlx::Error) -> DomainError {
    DomainError::database("Failed to read profile row", e)
}

fn profile_not_found(id: &ProfileId) -> DomainError {
    DomainError::new(ErrorCode::ProfileNotFound, format!("Profile not found: {}", id))
}

fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn from_db_int(value: Option<i32>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

fn row_to_profile(row: &PgRow) -> Result<PersistedProfile, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(read_err)?;
    let user_id: uuid::Uuid = row.try_get("user_id").map_err(read_err)?;
    let permit: Option<String> = row.try_get("work_permit_status").map_err(read_err)?;
    let languages: Json<Vec<Language>> = row.try_get("languages").map_err(read_err)?;
    let certifications: Json<Vec<Certification>> =
        row.try_get("certifications").map_err(read_err)?;
    let status: String = row.try_get("completion_status").map_err(read_err)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(read_err)?;
    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(read_err)?;

    let work_info = WorkInfo {
        target_position: row.try_get("target_position").map_err(read_err)?,
        years_of_experience: from_db_int(row.try_get("years_of_experience").map_err(read_err)?),
        current_job: row.try_get("current_job").map_err(read_err)?,
        industry: row.try_get("industry").map_err(read_err)?,
        availability_date: row.try_get("availability_date").map_err(read_err)?,
        salary_expectation: row.try_get("salary_expectation").map_err(read_err)?,
        work_permit_status: permit.map(WorkPermitStatus::from),
        driving_license: row.try_get("driving_license").map_err(read_err)?,
        willing_to_relocate: row.try_get("willing_to_relocate").map_err(read_err)?,
    };

    Ok(PersistedProfile {
        id: ProfileId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        summary: row.try_get("summary").map_err(read_err)?,
        work_info,
        skills: Vec::new(),
        work_experience: Vec::new(),
        education: Vec::new(),
        languages: languages.0,
        certifications: certifications.0,
        completion_status: CompletionStatus::parse(&status),
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

fn row_to_skill(row: &PgRow) -> Result<Skill, DomainError> {
    let category: Option<String> = row.try_get("category").map_err(read_err)?;
    let level: Option<String> = row.try_get("level").map_err(read_err)?;

    Ok(Skill {
        name: row.try_get("name").map_err(read_err)?,
        category: category.map(SkillCategory::from),
        level: level.map(SkillLevel::from),
        years_of_experience: from_db_int(row.try_get("years_of_experience").map_err(read_err)?),
    })
}

fn row_to_work_experience(row: &PgRow) -> Result<WorkExperience, DomainError> {
    let responsibilities: Json<Vec<String>> =
        row.try_get("responsibilities").map_err(read_err)?;
    let achievements: Json<Vec<String>> = row.try_get("achievements").map_err(read_err)?;

    Ok(WorkExperience {
        title: row.try_get("job_title").map_err(read_err)?,
        company: row.try_get("company_name").map_err(read_err)?,
        location: row.try_get("location").map_err(read_err)?,
        start_date: row.try_get("start_date").map_err(read_err)?,
        end_date: row.try_get("end_date").map_err(read_err)?,
        is_current: row.try_get("is_current_job").map_err(read_err)?,
        description: row.try_get("description").map_err(read_err)?,
        responsibilities: responsibilities.0,
        achievements: achievements.0,
        industry: row.try_get("industry").map_err(read_err)?,
        employment_type: row.try_get("employment_type").map_err(read_err)?,
    })
}

fn row_to_education(row: &PgRow) -> Result<Education, DomainError> {
    Ok(Education {
        institution: row.try_get("institution_name").map_err(read_err)?,
        degree: row.try_get("degree").map_err(read_err)?,
        field_of_study: row.try_get("field_of_study").map_err(read_err)?,
        location: row.try_get("location").map_err(read_err)?,
        start_date: row.try_get("start_date").map_err(read_err)?,
        end_date: row.try_get("end_date").map_err(read_err)?,
        is_completed: row.try_get("is_completed").map_err(read_err)?,
        grade: row.try_get("grade").map_err(read_err)?,
        description: row.try_get("description").map_err(read_err)?,
        education_type: row.try_get("education_type").map_err(read_err)?,
    })
}
