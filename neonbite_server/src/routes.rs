//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will
//! cause the current worker to stop processing new requests. Every handler in this module awaits its engine call
//! rather than blocking on it.

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use neonbite_engine::{
    db_types::{LineItem, NewCartSnapshot, NewReview},
    traits::{CartManagement, CatalogManagement, ReviewManagement, StorefrontDatabase, UserManagement},
    AuthApi,
    CartApi,
    CatalogApi,
    CheckoutRequest,
    OrderFlowApi,
    ReviewApi,
};
use serde_json::json;

use crate::{
    data_objects::{CartPayload, CheckoutPayload, LoginPayload, ReviewPayload, SignupPayload},
    errors::ServerError,
    mailer::SmtpMailer,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ---------------------------------------------   Catalog  ----------------------------------------------------
route!(list_products => Get "/products" impl CatalogManagement);
/// Route handler for the products endpoint
pub async fn list_products<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received request for the product catalogue");
    let products = api.products().await?;
    Ok(HttpResponse::Ok().json(products))
}

// ----------------------------------------------   Carts  -----------------------------------------------------
route!(save_cart => Post "/cart" impl CartManagement);
/// Route handler for saving a cart snapshot
pub async fn save_cart<B: CartManagement>(
    api: web::Data<CartApi<B>>,
    body: web::Json<CartPayload>,
) -> Result<HttpResponse, ServerError> {
    let payload = body.into_inner();
    debug!("💻️ Received a cart snapshot with {} items", payload.items.len());
    let id = api.save_cart(NewCartSnapshot { user_id: payload.user_id, items: payload.items }).await?;
    Ok(HttpResponse::Ok().json(json!({"message": "Cart saved", "carritoId": id})))
}

route!(list_carts => Get "/cart" impl CartManagement);
/// Route handler for listing cart snapshots, newest first
pub async fn list_carts<B: CartManagement>(api: web::Data<CartApi<B>>) -> Result<HttpResponse, ServerError> {
    let carts = api.carts().await?;
    Ok(HttpResponse::Ok().json(carts))
}

// ---------------------------------------------   Checkout  ---------------------------------------------------
route!(checkout => Post "/orders" impl StorefrontDatabase);
/// Route handler for checkout.
///
/// The client is told "Order received" as soon as the order row exists. Cart cleanup and the confirmation email
/// are soft steps: their failures are logged, persisted on the fulfilment record, and retried by the sweeper, but
/// they never turn a placed order into an error response.
pub async fn checkout<B: StorefrontDatabase>(
    api: web::Data<OrderFlowApi<B, SmtpMailer>>,
    body: web::Json<CheckoutPayload>,
) -> Result<HttpResponse, ServerError> {
    let payload = body.into_inner();
    let items = match payload.items {
        Some(items) if items.is_array() => serde_json::from_value::<Vec<LineItem>>(items)
            .map_err(|_| ServerError::ValidationError("invalid items".to_string()))?,
        _ => return Err(ServerError::ValidationError("invalid items".to_string())),
    };
    debug!("💻️ Received a checkout request with {} items", items.len());
    let request = CheckoutRequest { items, cart_id: payload.carrito_id, email: payload.user_email };
    let placed = api.place_order(request).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Order received",
        "orderId": placed.order_id,
    })))
}

// ---------------------------------------------   Reviews  ----------------------------------------------------
route!(list_reviews => Get "/reviews" impl ReviewManagement);
/// Route handler for listing reviews, newest first
pub async fn list_reviews<B: ReviewManagement>(api: web::Data<ReviewApi<B>>) -> Result<HttpResponse, ServerError> {
    let reviews = api.reviews().await?;
    Ok(HttpResponse::Ok().json(reviews))
}

route!(submit_review => Post "/reviews" impl ReviewManagement);
/// Route handler for submitting a review
pub async fn submit_review<B: ReviewManagement>(
    api: web::Data<ReviewApi<B>>,
    body: web::Json<ReviewPayload>,
) -> Result<HttpResponse, ServerError> {
    let payload = body.into_inner();
    let (Some(user_name), Some(rating), Some(comment)) = (payload.user_name, payload.rating, payload.comment) else {
        return Err(ServerError::ValidationError("Required review fields are missing".to_string()));
    };
    let review = api.submit(NewReview { user_name, rating, comment }).await?;
    Ok(HttpResponse::Ok().json(review))
}

// ----------------------------------------------   Users  -----------------------------------------------------
route!(signup => Post "/users/signup" impl UserManagement);
/// Route handler for account creation
pub async fn signup<B: UserManagement>(
    api: web::Data<AuthApi<B>>,
    body: web::Json<SignupPayload>,
) -> Result<HttpResponse, ServerError> {
    let payload = body.into_inner();
    let (Some(name), Some(email), Some(password)) =
        (non_blank(payload.name), non_blank(payload.email), non_blank(payload.password))
    else {
        return Err(ServerError::ValidationError("Name, email and password are required".to_string()));
    };
    api.signup(name, email, &password).await?;
    Ok(HttpResponse::Ok().json(json!({"message": "Account created"})))
}

route!(login => Post "/users/login" impl UserManagement);
/// Route handler for password login
pub async fn login<B: UserManagement>(
    api: web::Data<AuthApi<B>>,
    body: web::Json<LoginPayload>,
) -> Result<HttpResponse, ServerError> {
    let payload = body.into_inner();
    let (Some(email), Some(password)) = (non_blank(payload.email), non_blank(payload.password)) else {
        return Err(ServerError::ValidationError("Email and password are required".to_string()));
    };
    let user = api.login(&email, &password).await?;
    Ok(HttpResponse::Ok().json(json!({"message": "Login successful", "user": user})))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
