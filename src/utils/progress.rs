//! Spinner shown while the account is scanned.
//!
//! Wraps indicatif so commands get a consistent look. indicatif draws to
//! stderr and hides itself when stderr is not a terminal.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress indicator for scans whose total is not known up front
pub struct ProgressBar {
    bar: IndicatifBar,
}

impl ProgressBar {
    /// Create a spinner labelled with `label`
    pub fn new_spinner(label: &str) -> Self {
        let bar = IndicatifBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg} {spinner} {pos} users ({elapsed})")
                .expect("Invalid spinner template"),
        );
        bar.set_message(label.to_string());

        Self { bar }
    }

    /// A spinner that never draws, for library callers and tests
    pub fn hidden() -> Self {
        Self {
            bar: IndicatifBar::hidden(),
        }
    }

    /// Increment progress by 1
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Remove the spinner from the terminal
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }

    /// Print a message above the spinner without disturbing it
    pub fn println<S: AsRef<str>>(&self, msg: S) {
        if self.bar.is_hidden() {
            eprintln!("{}", msg.as_ref());
        } else {
            self.bar.println(msg.as_ref());
        }
    }
}
