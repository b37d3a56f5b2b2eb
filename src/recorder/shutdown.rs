use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Turns Ctrl-C into cancellation of `cancellation`. Every wait point of the application
/// selects on that token.
pub async fn detect_shutdown(cancellation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt");
            cancellation.cancel();
        },
        _ = cancellation.cancelled() => (),
    };
}
