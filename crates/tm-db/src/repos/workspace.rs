//! Workspace repository: CRUD over workspaces and their stored data specification.

use chrono::Utc;

use tm_core::data_spec::DataSpecification;
use tm_core::entities::Workspace;

use crate::error::DatabaseError;
use crate::helpers::{data_spec_to_json, parse_data_spec, parse_datetime};
use crate::service::TmService;
use crate::updates::workspace::WorkspaceUpdate;

const SELECT_COLS: &str = "id, name, data_specification, created_at";

pub(crate) fn row_to_workspace(row: &libsql::Row) -> Result<Workspace, DatabaseError> {
    Ok(Workspace {
        id: row.get(0)?,
        name: row.get(1)?,
        data_specification: parse_data_spec(&row.get::<String>(2)?)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

pub(crate) async fn fetch_workspace(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Workspace, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM workspaces WHERE id = ?1"),
            [id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("Workspace", id))?;
    row_to_workspace(&row)
}

impl TmService {
    pub async fn create_workspace(
        &self,
        name: &str,
        data_specification: &DataSpecification,
    ) -> Result<Workspace, DatabaseError> {
        let now = Utc::now();
        let spec_json = data_spec_to_json(data_specification)?;
        let _gate = self.gate().await;

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO workspaces (name, data_specification, created_at)
                 VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![name, spec_json, now.to_rfc3339()],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;

        tracing::info!(id, name, "workspace created");
        Ok(Workspace {
            id,
            name: name.to_string(),
            data_specification: *data_specification,
            created_at: now,
        })
    }

    pub async fn get_workspace(&self, id: i64) -> Result<Workspace, DatabaseError> {
        let _gate = self.gate().await;
        fetch_workspace(self.db().conn(), id).await
    }

    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, DatabaseError> {
        let _gate = self.gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM workspaces ORDER BY id"),
                (),
            )
            .await?;

        let mut workspaces = Vec::new();
        while let Some(row) = rows.next().await? {
            workspaces.push(row_to_workspace(&row)?);
        }
        Ok(workspaces)
    }

    /// Data specification of a workspace, or the unfiltered default when the
    /// job has no workspace.
    pub async fn data_specification_for(
        &self,
        workspace_id: Option<i64>,
    ) -> Result<DataSpecification, DatabaseError> {
        let Some(id) = workspace_id else {
            return Ok(DataSpecification::default());
        };
        let _gate = self.gate().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT data_specification FROM workspaces WHERE id = ?1",
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => parse_data_spec(&row.get::<String>(0)?),
            None => Ok(DataSpecification::default()),
        }
    }

    pub async fn update_workspace(
        &self,
        id: i64,
        update: WorkspaceUpdate,
    ) -> Result<Workspace, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref spec) = update.data_specification {
            sets.push(format!("data_specification = ?{idx}"));
            params.push(data_spec_to_json(spec)?.into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_workspace(id).await;
        }

        params.push(id.into());
        let _gate = self.gate().await;
        let sql = format!(
            "UPDATE workspaces SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Workspace", id));
        }

        tracing::info!(id, "workspace updated");
        fetch_workspace(self.db().conn(), id).await
    }

    /// Delete a workspace. Jobs that referenced it keep existing with no workspace.
    pub async fn delete_workspace(&self, id: i64) -> Result<(), DatabaseError> {
        let _gate = self.gate().await;
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM workspaces WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::not_found("Workspace", id));
        }
        tracing::info!(id, "workspace deleted");
        Ok(())
    }
}
