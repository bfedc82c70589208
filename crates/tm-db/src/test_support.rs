//! Shared test utilities for tm-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::Utc;
    use tm_core::data_spec::DataSpecification;
    use tm_core::entities::{DocumentTemplate, Workspace};

    use crate::TmDb;
    use crate::repos::document_template::NewDocumentTemplate;
    use crate::service::TmService;

    /// Create an in-memory TmService.
    pub async fn test_service() -> TmService {
        let db = TmDb::open_local(":memory:").await.unwrap();
        TmService::from_db(db)
    }

    /// Insert a workspace with no data specification filter.
    pub async fn seed_workspace(svc: &TmService, name: &str) -> Workspace {
        svc.create_workspace(name, &DataSpecification::default())
            .await
            .unwrap()
    }

    /// Insert a PDF template named after `name`.
    pub async fn seed_template(svc: &TmService, name: &str) -> DocumentTemplate {
        svc.create_document_template(&NewDocumentTemplate {
            name: name.to_string(),
            template_filename: format!("{name}.pdf"),
            template_file_type: "PDF".to_string(),
            uploaded_at: Utc::now(),
        })
        .await
        .unwrap()
    }
}
