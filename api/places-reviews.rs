use vercel_runtime::{run, Body, Error, Request, Response};
use widget_functions::{config, handlers, logging};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    config::shared();
    run(handler).await
}

/// GET /api/places-reviews?placeId=..&sort=..: Up to five Places reviews.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    handlers::places::handle(req, config::shared()).await
}
