//! Terminal progress bars for scans

use crate::scanner::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

/// Reports scan progress on stderr
pub struct ProgressBarSink {
    bar: ProgressBar,
}

impl ProgressBarSink {
    pub fn new() -> Self {
        let bar = ProgressBar::hidden();
        if let Ok(style) =
            ProgressStyle::with_template("{msg:32} [{bar:40}] {pos}/{len}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl Default for ProgressBarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressBarSink {
    fn start(&self, total: usize, message: &str) {
        self.bar.reset();
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.bar.set_length(total as u64);
        self.bar.set_message(message.to_string());
    }

    fn advance(&self, item: &str) {
        tracing::trace!("Processing {}", item);
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
