use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use request_core::{http::JsonRequester, RequestController, RequestOptions, Requester};
use serde::Serialize;
use serde_json::Value;

#[derive(Parser, Debug)]
struct Args {
    /// Endpoint answering GET with a `{ "data": ... }` envelope.
    #[arg(long)]
    url: String,
    /// Message shown when a failure carries nothing usable.
    #[arg(long)]
    fallback_message: Option<String>,
}

#[derive(Debug, Serialize)]
struct NoParams {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut options = RequestOptions::new(Value::Null)
        .with_on_success(|data: &Value| println!("on_success fired with {data}"));
    if let Some(message) = args.fallback_message {
        options = options.with_error_message(message);
    }

    let requester: Arc<dyn Requester<NoParams, Value>> = Arc::new(JsonRequester::get(args.url));
    let controller = RequestController::new_with_options(requester, options);

    match controller.execute(NoParams {}).await {
        Ok(data) => println!("data: {}", serde_json::to_string_pretty(&data)?),
        Err(failure) => println!("request failed: {failure}"),
    }

    let state = controller.snapshot().await;
    println!("state: loading={} error={:?}", state.loading, state.error);

    controller.reset().await;
    let state = controller.snapshot().await;
    println!(
        "after reset: loading={} error={:?}",
        state.loading, state.error
    );

    Ok(())
}
