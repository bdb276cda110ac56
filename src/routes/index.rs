use axum::response::Redirect;

///The whole app is one screen, so the root just forwards to it.
pub async fn get_index_route() -> Redirect {
    Redirect::to("/students")
}
