use axum::{
    routing::{get, post},
    Router,
};

pub mod files;
pub mod images;
pub mod items;
pub mod login;
pub mod models;
pub mod offers;
pub mod system;
pub mod uploads;
pub mod users;
pub mod variants;

/// Router for every public endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/items/", get(items::list_items).post(items::create_item))
        .route("/items/:item_id", get(items::read_item).put(items::update_item))
        .route("/models/:model_name", get(models::get_model))
        .route("/files/", post(uploads::create_file))
        .route("/files/*file_path", get(files::read_file))
        .route("/uploadfile/", post(uploads::create_upload_file))
        .route("/users/:user_id/items/:item_id", get(users::read_user_item))
        .route("/images/multiple/", post(images::create_multiple_images))
        .route("/offers/", post(offers::create_offer))
        .route("/login/", post(login::login))
        .nest("/variants", variants::router())
}
