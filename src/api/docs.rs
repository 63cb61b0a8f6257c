//! OpenAPI description of the student endpoints.
//!
//! The document is assembled once from the `#[utoipa::path]` annotations on
//! the handlers. It never looks at the live store.

use utoipa::openapi::server::ServerBuilder;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, ErrorResponse, MessageResponse};
use crate::registry::{Student, StudentPayload};

/// Path serving the Swagger UI.
pub const DOCS_PATH: &str = "/api-docs";
/// Path serving the raw OpenAPI JSON.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Static API description.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Management API",
        version = "1.0.0",
        description = "API to manage students information"
    ),
    paths(
        handlers::list_students,
        handlers::get_student,
        handlers::create_student,
        handlers::update_student,
        handlers::delete_student
    ),
    components(schemas(Student, StudentPayload, MessageResponse, ErrorResponse)),
    tags((name = "students", description = "Student registry operations"))
)]
pub struct ApiDoc;

/// Build the document with a development server entry for `port`.
pub fn openapi(port: u16) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![ServerBuilder::new()
        .url(format!("http://localhost:{}", port))
        .description(Some("Development server"))
        .build()]);
    doc
}

/// Swagger UI serving `doc`.
pub fn swagger_ui(doc: utoipa::openapi::OpenApi) -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn document_json(port: u16) -> Value {
        serde_json::to_value(openapi(port)).unwrap()
    }

    #[test]
    fn document_lists_every_student_operation() {
        let doc = document_json(3000);
        let paths = &doc["paths"];

        assert!(paths["/students"]["get"].is_object());
        assert!(paths["/students"]["post"].is_object());
        assert!(paths["/students/{id}"]["get"].is_object());
        assert!(paths["/students/{id}"]["put"].is_object());
        assert!(paths["/students/{id}"]["delete"].is_object());
        assert_eq!(paths.as_object().unwrap().len(), 2);
    }

    #[test]
    fn id_parameter_is_documented_in_path() {
        let doc = document_json(3000);
        let param = &doc["paths"]["/students/{id}"]["get"]["parameters"][0];

        assert_eq!(param["name"], "id");
        assert_eq!(param["in"], "path");
        assert_eq!(param["required"], true);
    }

    #[test]
    fn id_parameter_has_minimum_of_one() {
        let doc = document_json(3000);
        for method in ["get", "put", "delete"] {
            let param = &doc["paths"]["/students/{id}"][method]["parameters"][0];
            assert_eq!(param["schema"]["minimum"].as_f64(), Some(1.0), "{}", method);
        }
    }

    #[test]
    fn document_carries_info_and_server() {
        let doc = document_json(4321);
        assert_eq!(doc["info"]["title"], "Student Management API");
        assert_eq!(doc["info"]["version"], "1.0.0");
        assert_eq!(doc["servers"][0]["url"], "http://localhost:4321");
        assert_eq!(doc["servers"][0]["description"], "Development server");
    }

    #[test]
    fn document_registers_schemas() {
        let doc = document_json(3000);
        let schemas = &doc["components"]["schemas"];
        for name in ["Student", "StudentPayload", "MessageResponse", "ErrorResponse"] {
            assert!(schemas[name].is_object(), "missing schema {}", name);
        }
    }
}
