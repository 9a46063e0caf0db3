//! Report source port: where raw report lines come from.

use std::future::Future;

use tokio::sync::mpsc;

/// Yields raw report lines sent by the greenhouse controller.
///
/// Waiting for the next line is the ingestion loop's idle state; a source
/// with nothing to deliver simply keeps the future pending.
pub trait ReportSource {
    /// Wait for the next line, without its terminator.
    ///
    /// Returns `None` once the source is closed and no further line will arrive.
    fn next_line(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// Lines pushed into a channel by a transport reader (or a test).
impl ReportSource for mpsc::Receiver<String> {
    fn next_line(&mut self) -> impl Future<Output = Option<String>> + Send {
        self.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_yield_lines_in_order_then_close() {
        let (tx, mut rx) = mpsc::channel(4);
        tx.send("first".to_string()).await.unwrap();
        tx.send("second".to_string()).await.unwrap();
        drop(tx);

        assert_eq!(rx.next_line().await.as_deref(), Some("first"));
        assert_eq!(rx.next_line().await.as_deref(), Some("second"));
        assert_eq!(rx.next_line().await, None);
    }
}
