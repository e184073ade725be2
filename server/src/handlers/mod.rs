pub mod assets;
pub mod bulk;
pub mod health;
pub mod switches;

use actix_web::{
    http::{header, Method},
    middleware::DefaultHeaders,
    web,
};

pub use assets::{client_script, index};
pub use bulk::make_switches;
pub use health::health_check;

/// Register every route. Fixed paths come before the `/{id}` catch-all.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(client_script)
        .service(health_check)
        .service(make_switches)
        .service(
            web::resource("/{id}")
                .route(web::get().to(switches::get_state))
                .route(web::put().to(switches::toggle))
                .route(web::post().to(switches::create))
                .route(web::method(Method::OPTIONS).to(switches::preflight))
                .wrap(
                    DefaultHeaders::new()
                        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,PUT")),
                ),
        );
}
