use vercel_runtime::{run, Body, Error, Request, Response};
use widget_functions::{config, handlers, logging};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();
    config::shared();
    run(handler).await
}

/// POST /api/send-quiz-gmail: Email a quiz result through the Gmail API.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    handlers::leads::handle_gmail(req, config::shared()).await
}
