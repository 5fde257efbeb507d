use anyhow::{Context, Result};
use axum::{
    extract::Multipart,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use minijinja::Environment;
use std::net::SocketAddr;
use tracing::{info, warn};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

async fn index_handler() -> Result<Html<String>, Html<String>> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)
        .and_then(|_| env.get_template("index.html"))
        .and_then(|tmpl| {
            tmpl.render(minijinja::context! {
                title => "Stride Running Coach",
            })
        })
        .map(Html)
        .map_err(|e| {
            warn!("failed to render form page: {e}");
            Html(format!("Internal Server Error: {e}"))
        })
}

// The form endpoint only acknowledges what was uploaded; it does not contact
// the remote model. The interactive CLI is the integrated path.
async fn evaluate_handler(mut multipart: Multipart) -> Result<String, StatusCode> {
    let mut image = None;
    let mut metrics = None;
    let mut note = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                image = field
                    .file_name()
                    .map(|s| s.to_string())
                    .filter(|s| !s.is_empty());
            }
            "metrics" => {
                metrics = field
                    .file_name()
                    .map(|s| s.to_string())
                    .filter(|s| !s.is_empty());
            }
            "note" => {
                note = field.text().await.ok().filter(|s| !s.trim().is_empty());
            }
            _ => {}
        }
    }

    Ok(format!(
        "Processed {} + {} + notes: {}",
        image.as_deref().unwrap_or("no image"),
        metrics.as_deref().unwrap_or("no metrics file"),
        note.as_deref().unwrap_or("(none)"),
    ))
}

pub async fn serve(port: u16) -> Result<()> {
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/evaluate", post(evaluate_handler));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("web form listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("failed to bind to address {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("web server failed")?;

    Ok(())
}
