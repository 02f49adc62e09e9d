// ntagi2c/src/demo/read_loop.rs
//! Background read cycles that run until stopped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::demo::{Demo, ReadReport};
use crate::{Error, Result};

/// Background read loop owning a `Demo` until stopped.
///
/// Cancellation is cooperative: the flag is checked before every cycle,
/// between handshake attempts and after the handshake, so a stop takes
/// effect within one transport call plus one interval.
#[derive(Debug)]
pub struct ReadLoop {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<Demo>>,
}

impl ReadLoop {
    pub(crate) fn spawn<F>(mut demo: Demo, mut on_report: F) -> Self
    where
        F: FnMut(Result<ReadReport>) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let interval = demo.config().read_loop.interval;

        let handle = thread::spawn(move || {
            log::debug!("read loop started");
            while !flag.load(Ordering::Relaxed) {
                match demo.read_cycle(&flag) {
                    Ok(Some(report)) => on_report(Ok(report)),
                    Ok(None) => break,
                    Err(e) => {
                        log::warn!("read loop stopped: {}", e);
                        on_report(Err(e));
                        break;
                    }
                }
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                thread::sleep(interval);
            }
            log::debug!("read loop finished");
            demo
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Flag checked by the loop; setting it has the same effect as `stop`
    /// minus the join.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// True once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Signal the loop, wait for the thread and take the demo back.
    pub fn stop(mut self) -> Result<Demo> {
        self.stop.store(true, Ordering::Relaxed);
        let handle = self
            .handle
            .take()
            .ok_or_else(|| Error::Transport("read loop already joined".into()))?;
        handle
            .join()
            .map_err(|_| Error::Transport("read loop thread panicked".into()))
    }
}

impl Drop for ReadLoop {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
