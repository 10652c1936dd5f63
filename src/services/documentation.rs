use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Rival Snake Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::leaderboard::list_scores,
        crate::routes::leaderboard::submit_score,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::leaderboard::ScoreEntry,
            crate::dto::leaderboard::SubmitScoreRequest,
            crate::dto::leaderboard::SubmitScoreResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "leaderboard", description = "Top scores listing and submission"),
    )
)]
pub struct ApiDoc;
