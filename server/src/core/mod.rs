pub mod breach;
pub mod checksum;
pub mod encryption;
pub mod password;

/// Runs CPU-bound tool work off the async executor.
pub(crate) async fn blocking<T, F>(f: F) -> eyre::Result<T>
where
    F: FnOnce() -> eyre::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
