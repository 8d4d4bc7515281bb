//! Synthetic event sources for unit tests.

use std::io::Cursor;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncRead;
use tokio::io::AsyncWriteExt;
use tokio::io::ReadBuf;

use crate::Event;
use crate::EventSource;
use crate::EventStream;
use crate::EventsOptions;
use crate::Result;
use crate::SubscribeError;

fn encode_line(event: &Event) -> Vec<u8> {
    let mut line = serde_json::to_vec(event).expect("event is serializable");
    line.push(b'\n');
    line
}

/// Streams the scripted events as newline-delimited JSON through a pipe,
/// pacing them one millisecond apart, then closes the stream.
pub struct FakeEventSource {
    pub events: Vec<Event>,
}

#[async_trait]
impl EventSource for FakeEventSource {
    async fn events(
        &self,
        _options: &EventsOptions,
    ) -> Result<EventStream> {
        let (mut writer, reader) = tokio::io::duplex(4096);
        let events = self.events.clone();

        tokio::spawn(async move {
            for event in &events {
                if writer.write_all(&encode_line(event)).await.is_err() {
                    // Reader side closed; stop writing.
                    return;
                }
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            // Dropping the writer is the clean end-of-stream.
        });

        Ok(Box::new(reader))
    }
}

/// Emits the given well-formed events followed by a record that is valid
/// JSON but not an object, which the decoder must reject.
pub struct CorruptEventSource {
    pub preceding: Vec<Event>,
}

#[async_trait]
impl EventSource for CorruptEventSource {
    async fn events(
        &self,
        _options: &EventsOptions,
    ) -> Result<EventStream> {
        let mut buf = Vec::new();
        for event in &self.preceding {
            buf.extend_from_slice(&encode_line(event));
        }
        buf.extend_from_slice(b"\"\"\n");

        Ok(Box::new(Cursor::new(buf)))
    }
}

/// Always refuses the subscription.
pub struct FailingEventSource;

#[async_trait]
impl EventSource for FailingEventSource {
    async fn events(
        &self,
        _options: &EventsOptions,
    ) -> Result<EventStream> {
        Err(SubscribeError::Unreachable("test daemon is down".to_string()).into())
    }
}

/// Subscribes successfully but never yields a byte; used to exercise
/// cancellation while a read is in flight.
pub struct PendingEventSource;

struct PendingStream;

impl AsyncRead for PendingStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        // Never ready; the surrounding select's cancellation branch is
        // responsible for waking the task.
        Poll::Pending
    }
}

#[async_trait]
impl EventSource for PendingEventSource {
    async fn events(
        &self,
        _options: &EventsOptions,
    ) -> Result<EventStream> {
        Ok(Box::new(PendingStream))
    }
}
