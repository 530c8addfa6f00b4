//! HTTP handlers and route configuration.

mod health;
mod posts;
mod tournaments;
mod upload;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/upload-image", web::post().to(upload::upload_image))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    // Registered before `/{id}` so it is not taken for an id.
                    .route("/slug/{slug}", web::get().to(posts::by_slug))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/tournaments")
                    .route("", web::get().to(tournaments::list))
                    .route("", web::post().to(tournaments::create))
                    .route("/{id}", web::get().to(tournaments::get))
                    .route("/{id}", web::put().to(tournaments::update))
                    .route("/{id}", web::delete().to(tournaments::delete)),
            ),
    );
}
