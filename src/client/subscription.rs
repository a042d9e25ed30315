//! Cancellable subscriptions to a remote task's event stream.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{A2AError, A2AResult};
use crate::types::StreamResponse;

/// Channel capacity used for subscriptions backed by a reader task.
#[cfg_attr(not(feature = "client"), allow(dead_code))]
pub(crate) const SUBSCRIPTION_BUFFER: usize = 64;

/// A live stream of events for one `message/stream` call.
///
/// Events are produced by a background reader (for HTTP, the SSE parser)
/// and delivered in order through a bounded channel. Supports both
/// pull-based (`next()`) and push-based (`Stream` trait) consumption.
///
/// Dropping or [`close`](Self::close)-ing the subscription aborts the reader,
/// which releases the underlying connection.
///
/// # Example
///
/// ```no_run
/// # async fn example(mut sub: a2a_host::client::TaskSubscription) {
/// while let Some(event) = sub.next().await {
///     match event {
///         Ok(response) => println!("Got event: {:?}", response),
///         Err(e) => eprintln!("Stream error: {}", e),
///     }
/// }
/// # }
/// ```
pub struct TaskSubscription {
    receiver: mpsc::Receiver<A2AResult<StreamResponse>>,
    reader: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for TaskSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSubscription")
            .field("has_reader", &self.reader.is_some())
            .finish_non_exhaustive()
    }
}

impl TaskSubscription {
    /// Wrap a receiver fed by some other producer.
    ///
    /// Closing the subscription only closes the channel; the producer sees
    /// send failures and is expected to stop on its own.
    pub fn from_channel(receiver: mpsc::Receiver<A2AResult<StreamResponse>>) -> Self {
        Self {
            receiver,
            reader: None,
        }
    }

    /// Wrap a receiver together with the task that feeds it.
    #[cfg_attr(not(feature = "client"), allow(dead_code))]
    pub(crate) fn with_reader(
        receiver: mpsc::Receiver<A2AResult<StreamResponse>>,
        reader: JoinHandle<()>,
    ) -> Self {
        Self {
            receiver,
            reader: Some(reader),
        }
    }

    /// A subscription that replays a fixed list of events, then ends.
    ///
    /// Useful for in-process endpoints and tests.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = A2AResult<StreamResponse>>,
    {
        let events: Vec<_> = events.into_iter().collect();
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Capacity matches the event count, so this never fails.
            let _ = tx.try_send(event);
        }
        Self::from_channel(rx)
    }

    /// Get the next event from the stream.
    ///
    /// Returns `None` when the stream is exhausted (the agent closed the
    /// connection or the subscription was closed). Returns `Some(Err(...))`
    /// on parse or transport errors.
    pub async fn next(&mut self) -> Option<A2AResult<StreamResponse>> {
        self.receiver.recv().await
    }

    /// Like [`next`](Self::next), but give up after `idle` without an event.
    ///
    /// A timeout is reported as `Some(Err(A2AError::Timeout(..)))` so callers
    /// can propagate it like any other stream failure.
    pub async fn next_timeout(&mut self, idle: Duration) -> Option<A2AResult<StreamResponse>> {
        match tokio::time::timeout(idle, self.receiver.recv()).await {
            Ok(event) => event,
            Err(_) => Some(Err(A2AError::Timeout(format!(
                "no stream event within {}ms",
                idle.as_millis()
            )))),
        }
    }

    /// Stop receiving events and abort the background reader, if any.
    pub fn close(&mut self) {
        self.receiver.close();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }

    /// Whether the subscription has been closed.
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Stream for TaskSubscription {
    type Item = A2AResult<StreamResponse>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for TaskSubscription {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}
