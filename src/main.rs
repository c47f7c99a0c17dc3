use kms_trail_alert::{
    aws::{S3Store, SnsNotifier},
    AlertHandler, Notification,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let sdk_config = aws_config::load_from_env().await;
    let handler = AlertHandler::new(S3Store::new(&sdk_config), SnsNotifier::new(&sdk_config));
    let handler = &handler;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<Notification>| async move {
            // Settings are read anew for every invocation
            let summary = handler
                .invoke(|name| std::env::var(name).ok(), &event.payload)
                .await?;
            Ok::<_, Error>(summary)
        },
    ))
    .await
}
