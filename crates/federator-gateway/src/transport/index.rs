use axum::response::Html;

const INDEX_HTML: &str = r#"<html>
<head><title>Remote Federator</title></head>
<body>
<h1>Remote Federator</h1>
<p><a href='/federate'>Federate</a></p>
<p><a href='/metrics'>Metrics</a></p>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
