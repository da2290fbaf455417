//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request, response and error payload schemas. The document backs
//! Swagger UI in debug builds and is printed by the `openapi_dump` binary for
//! external tooling.

use utoipa::OpenApi;

use crate::domain::ports::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::inbound::http::response::ErrorBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo backend API",
        description = "CRUD interface for todo items plus store health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::hello,
        crate::inbound::http::health::health,
        crate::inbound::http::todos::create_todo,
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::get_todo,
        crate::inbound::http::todos::update_todo,
        crate::inbound::http::todos::delete_todo,
    ),
    components(schemas(CreateTodoRequest, UpdateTodoRequest, TodoResponse, ErrorBody)),
    tags(
        (name = "todos", description = "Todo item operations"),
        (name = "health", description = "Banner and store health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("TodoResponse", &["id", "title", "completed", "user_id", "created_at", "updated_at"])]
    #[case("CreateTodoRequest", &["title", "user_id"])]
    #[case("UpdateTodoRequest", &["title", "completed"])]
    #[case("ErrorBody", &["error"])]
    fn schemas_expose_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn todo_paths_are_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/todos", "/todos/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
        let item = doc.paths.paths.get("/todos/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }
}
