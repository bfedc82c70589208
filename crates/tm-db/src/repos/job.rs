//! Template matching job repository: create with ordered template associations,
//! resubmission, and expansion into `JobDetail`.

use chrono::{DateTime, Utc};

use tm_core::entities::TemplateMatchingJob;
use tm_core::generator::Submission;
use tm_core::responses::JobDetail;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_enum};
use crate::repos::document_template::templates_for_job;
use crate::repos::workspace::fetch_workspace;
use crate::service::TmService;

const SELECT_COLS: &str = "id, created_at, job_state, job_id, workspace_id";

/// Drop repeated ids, keeping the first occurrence of each.
fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn row_to_job(
    row: &libsql::Row,
    document_template_ids: Vec<i64>,
) -> Result<TemplateMatchingJob, DatabaseError> {
    Ok(TemplateMatchingJob {
        id: row.get(0)?,
        created_at: parse_datetime(&row.get::<String>(1)?)?,
        job_state: parse_optional_enum(get_opt_string(row, 2)?.as_deref())?,
        job_id: get_opt_string(row, 3)?,
        workspace_id: row.get::<Option<i64>>(4)?,
        document_template_ids,
    })
}

async fn exists(
    conn: &libsql::Connection,
    table: &str,
    id: i64,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id])
        .await?;
    Ok(rows.next().await?.is_some())
}

async fn template_ids_for(
    conn: &libsql::Connection,
    job_id: i64,
) -> Result<Vec<i64>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT document_template_id FROM template_matching_job_templates
             WHERE template_matching_job_id = ?1 ORDER BY position",
            [job_id],
        )
        .await?;

    let mut ids = Vec::new();
    while let Some(row) = rows.next().await? {
        ids.push(row.get::<i64>(0)?);
    }
    Ok(ids)
}

async fn fetch_job(
    conn: &libsql::Connection,
    id: i64,
) -> Result<TemplateMatchingJob, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM template_matching_jobs WHERE id = ?1"),
            [id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("TemplateMatchingJob", id))?;
    let template_ids = template_ids_for(conn, id).await?;
    row_to_job(&row, template_ids)
}

async fn fetch_jobs(conn: &libsql::Connection) -> Result<Vec<TemplateMatchingJob>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM template_matching_jobs ORDER BY id"),
            (),
        )
        .await?;

    let mut jobs = Vec::new();
    while let Some(row) = rows.next().await? {
        let id: i64 = row.get(0)?;
        let template_ids = template_ids_for(conn, id).await?;
        jobs.push(row_to_job(&row, template_ids)?);
    }
    Ok(jobs)
}

/// A workspace deleted since the job was created expands to `None`.
async fn expand(
    conn: &libsql::Connection,
    job: TemplateMatchingJob,
) -> Result<JobDetail, DatabaseError> {
    let workspace = match job.workspace_id {
        Some(workspace_id) => match fetch_workspace(conn, workspace_id).await {
            Ok(workspace) => Some(workspace),
            Err(DatabaseError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        },
        None => None,
    };
    let templates = templates_for_job(conn, job.id).await?;
    Ok(JobDetail::new(job, workspace, templates))
}

/// Verify references and insert the job with its ordered associations.
async fn insert_job(
    conn: &libsql::Connection,
    workspace_id: i64,
    template_ids: &[i64],
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<i64, DatabaseError> {
    if !exists(conn, "workspaces", workspace_id).await? {
        return Err(DatabaseError::not_found("Workspace", workspace_id));
    }
    for &template_id in template_ids {
        if !exists(conn, "document_templates", template_id).await? {
            return Err(DatabaseError::not_found("DocumentTemplate", template_id));
        }
    }

    let mut rows = conn
        .query(
            "INSERT INTO template_matching_jobs (created_at, job_state, job_id, workspace_id)
             VALUES (?1, ?2, ?3, ?4) RETURNING id",
            libsql::params![
                now.to_rfc3339(),
                submission.job_state.as_str(),
                submission.job_id.as_str(),
                workspace_id
            ],
        )
        .await?;
    let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
    drop(rows);

    for (position, template_id) in (0_i64..).zip(template_ids) {
        conn.execute(
            "INSERT INTO template_matching_job_templates
             (template_matching_job_id, document_template_id, position)
             VALUES (?1, ?2, ?3)",
            libsql::params![id, *template_id, position],
        )
        .await?;
    }
    Ok(id)
}

impl TmService {
    /// Create a job bound to a workspace and an ordered template list, and
    /// record its first submission.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` if the workspace or any template does not exist.
    /// Nothing is written in that case.
    pub async fn create_job(
        &self,
        workspace_id: i64,
        document_template_ids: &[i64],
        submission: &Submission,
    ) -> Result<TemplateMatchingJob, DatabaseError> {
        let template_ids = dedup_ids(document_template_ids);
        let now = Utc::now();

        let _gate = self.gate().await;
        let tx = self.db().conn().transaction().await?;
        let inserted = insert_job(&tx, workspace_id, &template_ids, submission, now).await;
        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };
        tx.commit().await?;

        tracing::info!(
            id,
            workspace_id,
            templates = template_ids.len(),
            job_state = %submission.job_state,
            "template matching job created"
        );
        Ok(TemplateMatchingJob {
            id,
            created_at: now,
            job_state: Some(submission.job_state),
            job_id: Some(submission.job_id.clone()),
            workspace_id: Some(workspace_id),
            document_template_ids: template_ids,
        })
    }

    pub async fn get_job(&self, id: i64) -> Result<TemplateMatchingJob, DatabaseError> {
        let _gate = self.gate().await;
        fetch_job(self.db().conn(), id).await
    }

    pub async fn list_jobs(&self) -> Result<Vec<TemplateMatchingJob>, DatabaseError> {
        let _gate = self.gate().await;
        fetch_jobs(self.db().conn()).await
    }

    /// Template ids of a job in association order.
    pub async fn job_template_ids(&self, job_id: i64) -> Result<Vec<i64>, DatabaseError> {
        let _gate = self.gate().await;
        template_ids_for(self.db().conn(), job_id).await
    }

    /// Record a resubmission: overwrite the job token and state.
    pub async fn submit_job(
        &self,
        id: i64,
        submission: &Submission,
    ) -> Result<(), DatabaseError> {
        let _gate = self.gate().await;
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE template_matching_jobs SET job_state = ?1, job_id = ?2 WHERE id = ?3",
                libsql::params![submission.job_state.as_str(), submission.job_id.as_str(), id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("TemplateMatchingJob", id));
        }
        tracing::info!(id, job_state = %submission.job_state, "template matching job resubmitted");
        Ok(())
    }

    /// Delete a job together with its template associations.
    pub async fn delete_job(&self, id: i64) -> Result<(), DatabaseError> {
        let _gate = self.gate().await;
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM template_matching_jobs WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("TemplateMatchingJob", id));
        }
        tracing::info!(id, "template matching job deleted");
        Ok(())
    }

    /// Expand a job's workspace and templates.
    pub async fn job_detail(&self, job: TemplateMatchingJob) -> Result<JobDetail, DatabaseError> {
        let _gate = self.gate().await;
        expand(self.db().conn(), job).await
    }

    pub async fn get_job_detail(&self, id: i64) -> Result<JobDetail, DatabaseError> {
        let _gate = self.gate().await;
        let conn = self.db().conn();
        let job = fetch_job(conn, id).await?;
        expand(conn, job).await
    }

    pub async fn list_job_details(&self) -> Result<Vec<JobDetail>, DatabaseError> {
        let _gate = self.gate().await;
        let conn = self.db().conn();
        let jobs = fetch_jobs(conn).await?;
        let mut details = Vec::with_capacity(jobs.len());
        for job in jobs {
            details.push(expand(conn, job).await?);
        }
        Ok(details)
    }
}
