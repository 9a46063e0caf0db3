//! Reader thread feeding report lines to the ingestion loop.

use std::io::{self, Read};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;

use crate::framer::LineFramer;

const READ_BUF_LEN: usize = 256;

/// Spawn the blocking reader thread.
///
/// A read timeout is treated as a poll: the thread checks whether the
/// receiver is still alive and reads again. The thread exits when the
/// receiver is dropped, at end of stream, or on any other I/O error.
///
/// # Errors
///
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn<R>(port: R, tx: mpsc::Sender<String>) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("serial-reader".to_string())
        .spawn(move || read_lines(port, &tx))
}

fn read_lines<R: Read>(mut port: R, tx: &mpsc::Sender<String>) {
    let mut framer = LineFramer::new();
    let mut buf = [0u8; READ_BUF_LEN];

    loop {
        if tx.is_closed() {
            tracing::debug!("line receiver dropped, serial reader stopped");
            return;
        }
        match port.read(&mut buf) {
            Ok(0) => {
                tracing::warn!("serial stream ended");
                return;
            }
            Ok(n) => {
                for line in framer.push(&buf[..n]) {
                    if tx.blocking_send(line).is_err() {
                        tracing::debug!("line receiver dropped, serial reader stopped");
                        return;
                    }
                }
            }
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
                ) => {}
            Err(err) => {
                tracing::error!(error = %err, "serial read failed, reader stopped");
                return;
            }
        }
    }
}
