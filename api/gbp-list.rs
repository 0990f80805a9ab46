use vercel_runtime::{run, Body, Error, Request, Response};
use widget_functions::{config, handlers, logging};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    config::shared();
    run(handler).await
}

/// GET /api/gbp-list: Business Profile accounts with their locations.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    handlers::accounts::handle(req, config::shared()).await
}
