use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use arboard::Clipboard;

use crate::clipboard_history::ClipboardHistory;

/// Source of the current system clipboard text.
pub trait ClipboardReader: Send {
    fn read_text(&mut self) -> Result<Option<String>, String>;
}

/// Reads the OS clipboard through `arboard`. A clipboard holding no text
/// reads as `None`; a missing display server or a busy clipboard is an error.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardReader for SystemClipboard {
    fn read_text(&mut self) -> Result<Option<String>, String> {
        // Opened per read: the handle is not `Send` on every platform.
        let mut clipboard = Clipboard::new().map_err(|error| error.to_string())?;
        match clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(error) => Err(error.to_string()),
        }
    }
}

/// Owns the polling thread. Dropping the handle stops the thread.
pub struct ClipboardPoller {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ClipboardPoller {
    /// Seeds the history with the clipboard's current text, then polls every
    /// `interval` on a dedicated thread. Ticks run strictly one after another.
    pub fn spawn(
        history: Arc<ClipboardHistory>,
        mut reader: Box<dyn ClipboardReader>,
        interval: Duration,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread = std::thread::Builder::new()
            .name("clipboard-poll".to_string())
            .spawn(move || {
                match reader.read_text() {
                    Ok(Some(text)) => history.observe_baseline(&text),
                    Ok(None) => {}
                    Err(error) => log::debug!("initial clipboard read failed: {error}"),
                }

                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            poll_once(&history, reader.as_mut());
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::debug!("clipboard poller stopped");
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("clipboard poller thread panicked");
            }
        }
    }
}

impl Drop for ClipboardPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One read-compare-maybe-push cycle. Returns whether an item was captured.
pub fn poll_once(history: &ClipboardHistory, reader: &mut dyn ClipboardReader) -> bool {
    match reader.read_text() {
        Ok(Some(text)) => match history.detect_change(&text) {
            Some(item) => {
                log::debug!("captured clipboard item id={}", item.id);
                true
            }
            None => false,
        },
        Ok(None) => false,
        Err(error) => {
            log::debug!("clipboard read failed: {error}");
            false
        }
    }
}
