//! Spinner for long build phases; a no-op when the `progress` feature is disabled

#[cfg(feature = "progress")]
pub use self::bar::Spinner;

#[cfg(not(feature = "progress"))]
pub use self::noop::Spinner;

#[cfg(feature = "progress")]
mod bar {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    /// Terminal spinner shown while a build phase runs
    pub struct Spinner(ProgressBar);

    impl Spinner {
        pub fn start(message: &'static str) -> Self {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(message);
            spinner.enable_steady_tick(Duration::from_millis(80));
            Self(spinner)
        }

        pub fn finish(self, message: String) {
            self.0.finish_with_message(message);
        }
    }
}

#[cfg(not(feature = "progress"))]
mod noop {
    pub struct Spinner;

    impl Spinner {
        pub fn start(_message: &'static str) -> Self {
            Spinner
        }

        pub fn finish(self, _message: String) {}
    }
}
