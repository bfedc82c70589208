//! Document template repository.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use tm_core::entities::DocumentTemplate;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::TmService;

const SELECT_COLS: &str = "id, name, template_filename, template_file_type, uploaded_at, created_at";

/// Fields supplied when registering a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDocumentTemplate {
    pub name: String,
    pub template_filename: String,
    pub template_file_type: String,
    pub uploaded_at: DateTime<Utc>,
}

fn row_to_template(row: &libsql::Row) -> Result<DocumentTemplate, DatabaseError> {
    Ok(DocumentTemplate {
        id: row.get(0)?,
        name: row.get(1)?,
        template_filename: row.get(2)?,
        template_file_type: row.get(3)?,
        uploaded_at: parse_datetime(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Templates associated with a job, in association order.
pub(crate) async fn templates_for_job(
    conn: &libsql::Connection,
    job_id: i64,
) -> Result<Vec<DocumentTemplate>, DatabaseError> {
    let cols = SELECT_COLS
        .split(", ")
        .map(|c| format!("t.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut rows = conn
        .query(
            &format!(
                "SELECT {cols} FROM document_templates t
                 JOIN template_matching_job_templates jt ON jt.document_template_id = t.id
                 WHERE jt.template_matching_job_id = ?1
                 ORDER BY jt.position"
            ),
            [job_id],
        )
        .await?;

    let mut templates = Vec::new();
    while let Some(row) = rows.next().await? {
        templates.push(row_to_template(&row)?);
    }
    Ok(templates)
}

impl TmService {
    pub async fn create_document_template(
        &self,
        new: &NewDocumentTemplate,
    ) -> Result<DocumentTemplate, DatabaseError> {
        let now = Utc::now();

        let _gate = self.gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO document_templates
                 (name, template_filename, template_file_type, uploaded_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
                libsql::params![
                    new.name.as_str(),
                    new.template_filename.as_str(),
                    new.template_file_type.as_str(),
                    new.uploaded_at.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;

        tracing::info!(id, name = %new.name, "document template created");
        Ok(DocumentTemplate {
            id,
            name: new.name.clone(),
            template_filename: new.template_filename.clone(),
            template_file_type: new.template_file_type.clone(),
            uploaded_at: new.uploaded_at,
            created_at: now,
        })
    }

    pub async fn get_document_template(&self, id: i64) -> Result<DocumentTemplate, DatabaseError> {
        let _gate = self.gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM document_templates WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("DocumentTemplate", id))?;
        row_to_template(&row)
    }

    pub async fn list_document_templates(&self) -> Result<Vec<DocumentTemplate>, DatabaseError> {
        let _gate = self.gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM document_templates ORDER BY id"),
                (),
            )
            .await?;

        let mut templates = Vec::new();
        while let Some(row) = rows.next().await? {
            templates.push(row_to_template(&row)?);
        }
        Ok(templates)
    }

    /// Templates associated with a job, in association order.
    pub async fn document_templates_for_job(
        &self,
        job_id: i64,
    ) -> Result<Vec<DocumentTemplate>, DatabaseError> {
        let _gate = self.gate().await;
        templates_for_job(self.db().conn(), job_id).await
    }

    /// Delete a template. Its job associations are removed by cascade.
    pub async fn delete_document_template(&self, id: i64) -> Result<(), DatabaseError> {
        let _gate = self.gate().await;
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM document_templates WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("DocumentTemplate", id));
        }
        tracing::info!(id, "document template deleted");
        Ok(())
    }
}
