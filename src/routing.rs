//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    api::{create_detail, delete_detail, list_details, update_detail, wipe_details},
    endpoints,
    entry::{
        create_entry_endpoint, delete_entry_endpoint, edit_entry_endpoint, get_edit_entry_page,
        get_ledger_page, get_new_entry_page, wipe_entries_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .route(endpoints::NEW_ENTRY_VIEW, get(get_new_entry_page))
        .route(endpoints::EDIT_ENTRY_VIEW, get(get_edit_entry_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // The htmx endpoints behind the ledger page's forms and buttons.
    let form_routes = Router::new()
        .route(
            endpoints::ENTRIES,
            post(create_entry_endpoint).delete(wipe_entries_endpoint),
        )
        .route(
            endpoints::ENTRY,
            put(edit_entry_endpoint).delete(delete_entry_endpoint),
        );

    let api_routes = Router::new()
        .route(
            endpoints::API_DETAILS,
            get(list_details).post(create_detail).delete(wipe_details),
        )
        .route(
            endpoints::API_DETAIL,
            put(update_detail).delete(delete_detail),
        );

    page_routes
        .merge(form_routes)
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the ledger page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::LEDGER_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_ledger() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::LEDGER_VIEW);
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_not_found() {
        use axum_test::TestServer;
        use rusqlite::Connection;

        use crate::{AppState, build_router};

        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn, Default::default()).unwrap();
        let server = TestServer::try_new(build_router(state)).unwrap();

        let response = server.get("/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
