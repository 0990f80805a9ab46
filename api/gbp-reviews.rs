use vercel_runtime::{run, Body, Error, Request, Response};
use widget_functions::{config, handlers, logging};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    config::shared();
    run(handler).await
}

/// GET /api/gbp-reviews?accountId=..&locationId=..&max=..: Location reviews with average rating.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    handlers::reviews::handle(req, config::shared()).await
}
