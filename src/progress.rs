//! Progress tracker and reporter (spec.md §4.E, §9 "Progress tracker").
//!
//! [`ProgressTracker`] is a source-side `Read` decorator: it must not alter
//! returned byte counts, end-of-stream semantics, or error propagation, so
//! it only ever counts and forwards. The throttling clock lives in the
//! [`Reporter`], not the tracker, per spec.md §9.

use std::io::{self, Read};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// The rendering target a [`ProgressTracker`] reports to.
pub trait Reporter {
    /// Called after every non-empty read with the running byte count and,
    /// if known, the total expected byte count.
    fn update(&mut self, processed: u64, total: Option<u64>);

    /// Forces a final render and, for terminal reporters, clears the
    /// progress line.
    fn complete(&mut self);
}

/// The no-op reporter, used whenever spec.md §4.E's selection rule decides
/// progress should not be shown.
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn update(&mut self, _processed: u64, _total: Option<u64>) {}
    fn complete(&mut self) {}
}

/// Renders a throttled progress bar to standard error.
pub struct TerminalReporter {
    bar: ProgressBar,
    last_render: Option<Instant>,
}

impl TerminalReporter {
    pub fn new(total: Option<u64>) -> Self {
        let bar = match total {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, eta {eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{bytes} read ({bytes_per_sec})")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        TerminalReporter {
            bar,
            last_render: None,
        }
    }
}

impl Reporter for TerminalReporter {
    fn update(&mut self, processed: u64, _total: Option<u64>) {
        let should_render = match self.last_render {
            Some(last) => last.elapsed() >= RENDER_INTERVAL,
            None => true,
        };
        if should_render {
            self.bar.set_position(processed);
            self.last_render = Some(Instant::now());
        }
    }

    fn complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Chooses which [`Reporter`] implementation to use (spec.md §4.E
/// "Selection rule").
pub fn select_reporter(
    progress_requested: bool,
    sink_is_stdout: bool,
    stderr_is_terminal: bool,
    total: Option<u64>,
) -> Box<dyn Reporter> {
    if !progress_requested || sink_is_stdout || !stderr_is_terminal {
        Box::new(SilentReporter)
    } else {
        Box::new(TerminalReporter::new(total))
    }
}

/// A source-side `Read` wrapper that accumulates a running byte count and
/// forwards it to a [`Reporter`] after every non-empty read.
///
/// MUST NOT alter returned byte counts, end-of-stream semantics, or error
/// propagation (spec.md §4.E) — `read` is a pure pass-through plus a side
/// effect.
pub struct ProgressTracker<R> {
    inner: R,
    reporter: Box<dyn Reporter>,
    total: Option<u64>,
    processed: u64,
}

impl<R: Read> ProgressTracker<R> {
    pub fn new(inner: R, reporter: Box<dyn Reporter>, total: Option<u64>) -> Self {
        ProgressTracker {
            inner,
            reporter,
            total,
            processed: 0,
        }
    }

    /// Forces a final render; call once the wrapped source has been fully
    /// consumed.
    pub fn finish(&mut self) {
        self.reporter.complete();
    }
}

impl<R: Read> Read for ProgressTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.processed += n as u64;
            self.reporter.update(self.processed, self.total);
        }
        Ok(n)
    }
}
