use tokio::select;
use tokio_util::sync::CancellationToken;

/// Detects signals sent to the process. This works with limmited success.
///
/// On Windows detached processes can't detect signals sent to them, so this should be enhanced in the future to
/// support another way of sending signals.
#[cfg(unix)]
pub async fn detect_shutdown(cancelation: CancellationToken) {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            select! {
                _ = tokio::signal::ctrl_c() => (),
                _ = terminate.recv() => (),
            };
        }
        Err(e) => {
            tracing::error!("Failed to install SIGTERM handler {e:?}");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
    cancelation.cancel();
}

#[cfg(not(unix))]
pub async fn detect_shutdown(cancelation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            cancelation.cancel();
        },
    };
}
