use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use neonbite_engine::{AuthApi, CartApi, CatalogApi, OrderFlowApi, ReviewApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    mailer::SmtpMailer,
    routes::{
        health,
        CheckoutRoute,
        ListCartsRoute,
        ListProductsRoute,
        ListReviewsRoute,
        LoginRoute,
        SaveCartRoute,
        SignupRoute,
        SubmitReviewRoute,
    },
    sweeper::start_fulfilment_sweeper,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("🚀️ Environment: {}", config.environment);
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let mailer = SmtpMailer::from_config(&config.smtp);
    if config.sweeper_enabled {
        let _sweeper =
            start_fulfilment_sweeper(db.clone(), mailer.clone(), config.sweep_interval, config.stalled_after);
    } else {
        warn!("🧹️ The fulfilment sweeper is disabled. Stalled checkouts will not be retried until a restart.");
    }
    let srv = create_server_instance(config, db, mailer)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    mailer: SmtpMailer,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let cart_api = CartApi::new(db.clone());
        let order_flow_api = OrderFlowApi::new(db.clone(), mailer.clone());
        let review_api = ReviewApi::new(db.clone());
        let auth_api = AuthApi::new(db.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("neonbite::access_log"))
            // The spa is served from whatever origin its host hands out, so the API accepts all of them.
            .wrap(Cors::permissive())
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(order_flow_api))
            .app_data(web::Data::new(review_api))
            .app_data(web::Data::new(auth_api));
        // Deployed frontends reach the server through a platform path rewrite that prepends /api; local ones
        // talk to it directly. Both prefixes serve the same routes.
        let api_scope = web::scope("/api")
            .service(ListProductsRoute::<SqliteDatabase>::new())
            .service(SaveCartRoute::<SqliteDatabase>::new())
            .service(ListCartsRoute::<SqliteDatabase>::new())
            .service(CheckoutRoute::<SqliteDatabase>::new())
            .service(ListReviewsRoute::<SqliteDatabase>::new())
            .service(SubmitReviewRoute::<SqliteDatabase>::new())
            .service(SignupRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new());
        app.service(health)
            .service(api_scope)
            .service(ListProductsRoute::<SqliteDatabase>::new())
            .service(SaveCartRoute::<SqliteDatabase>::new())
            .service(ListCartsRoute::<SqliteDatabase>::new())
            .service(CheckoutRoute::<SqliteDatabase>::new())
            .service(ListReviewsRoute::<SqliteDatabase>::new())
            .service(SubmitReviewRoute::<SqliteDatabase>::new())
            .service(SignupRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
