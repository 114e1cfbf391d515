//! Polling loop: transport in, router, transport out.

use std::future::Future;
use std::time::Duration;

use stockbot_infra::InventoryStore;

use crate::router::CommandRouter;
use crate::transport::ChatTransport;

/// Pause after a failed poll before trying again.
pub const POLL_BACKOFF: Duration = Duration::from_secs(3);

/// Serve messages until `shutdown` resolves, then close the store.
///
/// Messages are handled one at a time in arrival order. Transport failures
/// are logged and retried after `POLL_BACKOFF`; they never stop the loop.
pub async fn run<S, T, F>(router: &CommandRouter<S>, transport: &mut T, shutdown: F)
where
    S: InventoryStore,
    T: ChatTransport,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    tracing::info!("polling for messages");

    loop {
        let polled = tokio::select! {
            _ = &mut shutdown => break,
            polled = transport.poll() => polled,
        };

        let messages = match polled {
            Ok(messages) => messages,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "poll failed; backing off");
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(POLL_BACKOFF) => continue,
                }
            }
        };

        for message in messages {
            let reply = router.handle(message.sender, &message.text).await;
            if let Err(err) = transport.send(message.chat_id, &reply).await {
                tracing::error!(
                    chat_id = message.chat_id,
                    error = %format!("{err:#}"),
                    "failed to deliver reply"
                );
            }
        }
    }

    tracing::info!("shutting down");
    router.context().store().close().await;
}
