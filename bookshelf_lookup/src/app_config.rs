use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api").service(
                web::scope("/book")
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::get_book_without_isbn)),
                    )
                    .service(
                        web::resource("/{isbn:.*}").route(web::get().to(handlers::get_book)),
                    ),
            ),
        );
}
