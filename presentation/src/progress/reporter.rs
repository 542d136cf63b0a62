//! Progress reporting for the resource fetch

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use navigator_application::LoadProgress;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while the catalog is being fetched
pub struct FetchSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl FetchSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for FetchSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadProgress for FetchSpinner {
    fn on_fetch_start(&self, source: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Loading resources");
        pb.set_message(source.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_fetch_complete(&self, count: usize, error: Option<&str>) {
        let Some(pb) = self.bar.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        match error {
            None => pb.finish_with_message(format!("{} {} resources", "v".green(), count)),
            Some(e) => pb.finish_with_message(format!("{} {}", "x".red(), e)),
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl LoadProgress for SimpleProgress {
    fn on_fetch_start(&self, source: &str) {
        eprintln!("{} {} {}", "->".cyan(), "Loading resources".bold(), source);
    }

    fn on_fetch_complete(&self, count: usize, error: Option<&str>) {
        match error {
            None => eprintln!("  {} {} resources", "v".green(), count),
            Some(e) => eprintln!("  {} {}", "x".red(), e),
        }
    }
}
