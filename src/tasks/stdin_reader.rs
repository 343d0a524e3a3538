//! Stdin command reader

use std::{io::BufRead, thread};

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Read stdin lines on a dedicated thread and forward them to the returned
/// channel.
///
/// A plain thread is used because a blocking stdin read cannot be
/// cancelled; the thread must not hold up process exit. The channel closes
/// on EOF.
pub fn spawn_stdin_reader(capacity: usize) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(capacity.max(1));

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin reader finished");
    });

    rx
}
