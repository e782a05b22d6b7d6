use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/labourer", labourer_routes())
        .nest("/owner", owner_routes())
        .nest("/analysis", analysis_routes())
}

fn labourer_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::labourer::list_pending_submissions))
        .routes(routes!(handlers::labourer::history))
        .routes(routes!(handlers::labourer::submit_analysis))
}

fn owner_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::owner::list_pending_verifications))
        .routes(routes!(handlers::owner::verify_analysis))
}

fn analysis_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::analysis::create_analysis))
        .routes(routes!(
            handlers::analysis::get_analysis,
            handlers::analysis::delete_analysis
        ))
}
