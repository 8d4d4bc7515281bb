//! Incremental decode loop for the daemon event stream.
//!
//! The wire format is one JSON object per line. Records are pulled off the
//! stream one at a time and handed to a processing closure in arrival
//! order; the closure decides whether a bad record is fatal.

use std::future::Future;

use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncRead;
use tokio::io::BufReader;

use crate::metrics::EVENTS_DECODED_TOTAL;
use crate::DecodeError;
use crate::Event;
use crate::Result;

/// Decode self-delimited event records off `input` until end-of-stream.
///
/// For every record position, `process` receives either the parsed
/// [`Event`] or the parse/read error for that position. Returning `Err`
/// from `process` stops decoding immediately and propagates that error to
/// the caller; clean end-of-input returns `Ok(())`.
///
/// No resynchronization is attempted past a corrupt record unless the
/// processing closure explicitly swallows the error.
pub async fn decode_events<R, F, Fut>(
    input: R,
    mut process: F,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(std::result::Result<Event, DecodeError>) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut lines = BufReader::new(input).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }

                let record = serde_json::from_str::<Event>(&line)
                    .map_err(DecodeError::Malformed);
                if record.is_ok() {
                    EVENTS_DECODED_TOTAL.inc();
                }

                process(record).await?;
            }
            // Clean end-of-stream
            Ok(None) => break,
            Err(e) => {
                process(Err(DecodeError::Read(e))).await?;
            }
        }
    }

    Ok(())
}
