use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CustomerDoc {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

/// `id` is accepted and ignored.
#[derive(ToSchema)]
pub struct CustomerInputDoc {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct ValidationErrorDoc {
    pub error: String,
    pub message: String,
    pub fields: Vec<FieldErrorDoc>,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::customers::list,
        crate::routes::customers::create,
        crate::routes::customers::get,
        crate::routes::customers::update,
        crate::routes::customers::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CustomerDoc,
            CustomerInputDoc,
            FieldErrorDoc,
            ValidationErrorDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "customers")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_customer_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/customers"));
        assert!(doc.paths.paths.contains_key("/api/customers/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
