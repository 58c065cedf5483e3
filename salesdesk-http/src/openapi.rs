use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salesdesk API",
        version = "0.1.0",
        description = "Sales entry intake. Entries are appended to a Google Sheet, or to a bounded local backup file when the sheet is unavailable.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::sales::submit_sale,
        crate::handlers::sales::list_sales,
    ),
    components(
        schemas(
            crate::dto::SubmitSaleRequest,
            crate::dto::SubmitSaleResponse,
            crate::dto::ListSalesResponse,
            crate::dto::HealthResponse,
            salesdesk::SalesRecord,
            salesdesk::Backend,
            salesdesk::AppendReceipt,
        )
    ),
    tags(
        (name = "sales", description = "Submit and list sales entries"),
        (name = "health", description = "Service and backend status")
    )
)]
pub struct ApiDoc;
