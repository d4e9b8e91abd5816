use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vending API",
        description = r#"
# Vending Machine Inventory API

Tracks campus vending machines, the locations hosting them and the items they sell.

## Error Handling

Failed requests return the matching HTTP status and a single message:

```json
{ "error": "Machine not found." }
```

Request bodies are parsed as JSON whatever the declared `Content-Type`.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "machines", description = "Machine management endpoints"),
        (name = "locations", description = "Location management endpoints"),
        (name = "items", description = "Item catalogue and machine stock endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        // Machines
        crate::handlers::machines::list_machines,
        crate::handlers::machines::get_machine,
        crate::handlers::machines::list_working_machines,
        crate::handlers::machines::list_brbs_machines,
        crate::handlers::machines::create_machine,
        crate::handlers::machines::delete_machine,
        crate::handlers::machines::update_machine_status,

        // Locations
        crate::handlers::locations::create_location,
        crate::handlers::locations::list_locations,
        crate::handlers::locations::get_location,
        crate::handlers::locations::delete_location,

        // Items
        crate::handlers::items::create_item,
        crate::handlers::items::list_items,
        crate::handlers::items::machines_selling_item,
        crate::handlers::items::delete_item,
        crate::handlers::items::update_machine_items,

        crate::health::health_check,
    ),
    components(
        schemas(
            crate::dto::CreateMachineRequest,
            crate::dto::UpdateMachineStatusRequest,
            crate::dto::UpdateMachineItemsRequest,
            crate::dto::ItemAction,
            crate::dto::MachineSummary,
            crate::dto::MachineResponse,
            crate::dto::MachineList,

            crate::dto::CreateLocationRequest,
            crate::dto::LocationSummary,
            crate::dto::LocationResponse,
            crate::dto::LocationList,

            crate::dto::CreateItemRequest,
            crate::dto::ItemSummary,
            crate::dto::ItemResponse,
            crate::dto::ItemList,

            crate::health::HealthInfo,
            crate::health::HealthDetail,
            crate::health::HealthStatus,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
