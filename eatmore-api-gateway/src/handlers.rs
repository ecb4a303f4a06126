use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, Json},
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::instrument;

use crate::error::ApiError;
use crate::graphql::EatMoreSchema;

#[derive(Clone)]
pub struct AppState {
    pub schema: EatMoreSchema,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[instrument(skip_all)]
async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphiQL playground, served only to browsers.
async fn graphiql(headers: HeaderMap) -> Result<Html<String>, ApiError> {
    let accepts_html = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"));

    if !accepts_html {
        return Err(ApiError::MethodNotAllowed(
            "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json".to_string(),
        ));
    }

    Ok(Html(GraphiQLSource::build().endpoint("/graphql").finish()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
