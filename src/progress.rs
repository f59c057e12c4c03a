//! Progress bar display for downloads

use std::io::Read;

use indicatif::{ProgressBar, ProgressBarIter, ProgressStyle};

/// Progress display for a single file transfer
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress display; falls back to a spinner when the server
    /// doesn't report a content length
    pub fn new(total_bytes: Option<u64>, label: &str) -> Self {
        let pb = match total_bytes {
            Some(len) => {
                let style = ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap()
                    .progress_chars("#>-");
                let pb = ProgressBar::new(len);
                pb.set_style(style);
                pb
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("{spinner} {bytes} {msg}")
                    .unwrap();
                let pb = ProgressBar::new_spinner();
                pb.set_style(style);
                pb
            }
        };
        pb.set_message(label.to_string());
        Self { pb }
    }

    /// Wrap a reader so every read advances the bar
    pub fn wrap_read<R: Read>(&self, reader: R) -> ProgressBarIter<R> {
        self.pb.wrap_read(reader)
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error, leaving the bar visible
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
