use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Sales Dashboard API</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .endpoint { background: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 5px; }
        .method { color: #007bff; font-weight: bold; }
    </style>
</head>
<body>
    <h1>Sales Dashboard API</h1>
    <p>Sales entry intake service.</p>

    <h2>Available Endpoints:</h2>
    <div class="endpoint"><span class="method">POST</span> /api/sales<br>Submit new sales entry</div>
    <div class="endpoint"><span class="method">GET</span> /api/sales<br>Get all sales entries</div>
    <div class="endpoint"><span class="method">GET</span> /api/health<br>Check service health</div>
    <div class="endpoint"><span class="method">GET</span> /swagger-ui<br>OpenAPI explorer</div>

    <h2>Setup Instructions:</h2>
    <ol>
        <li>Place the Google service-account key at the path given by <code>GOOGLE_CREDENTIALS_FILE</code> (default <code>credentials.json</code>)</li>
        <li>Set <code>GOOGLE_SHEET_ID</code> to the target spreadsheet id and share the sheet with the service account</li>
        <li>Run <code>salesdesk check</code> to verify the setup</li>
        <li>Run <code>salesdesk</code> to start the server</li>
    </ol>
    <p>Without a spreadsheet, entries are kept in the local backup file (newest 100).</p>
</body>
</html>
"#;

/// API landing page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
