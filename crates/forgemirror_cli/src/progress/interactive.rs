use std::sync::Mutex;
use std::time::Duration;

use console::style;
use forgemirror::sync::SyncProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Counters for the operation currently on screen.
#[derive(Default)]
struct ProgressState {
    bar: Option<ProgressBar>,
    total: usize,
    done: usize,
}

/// Interactive progress reporter using indicatif.
///
/// Operations run one at a time, so a single spinner is live at any moment.
/// Per-item failures and warnings are printed above it.
pub struct InteractiveReporter {
    multi: MultiProgress,
    state: Mutex<ProgressState>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            state: Mutex::new(ProgressState::default()),
        }
    }

    /// A reporter that draws nothing.
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            state: Mutex::new(ProgressState::default()),
        }
    }

    pub fn handle(&self, event: SyncProgress) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        match event {
            SyncProgress::SyncStarted { kind, from, to } => {
                let bar = self.start_spinner(&mut state, kind.plural());
                bar.set_message(format!("{from} → {to}: fetching..."));
            }

            SyncProgress::MirrorStarted { from, to, repo } => {
                let bar = self.start_spinner(&mut state, "code");
                bar.set_message(format!("{from} → {to}: preparing {repo}..."));
            }

            SyncProgress::FetchedSource { count, .. } | SyncProgress::BranchesFound { count } => {
                state.total = count;
                state.done = 0;
                if let Some(bar) = &state.bar {
                    bar.set_message(format!("0/{count}"));
                }
            }

            SyncProgress::Cloning { path } => {
                if let Some(bar) = &state.bar {
                    bar.set_message(format!("cloning into {path}..."));
                }
            }

            SyncProgress::Created { name, .. }
            | SyncProgress::WouldCreate { name, .. }
            | SyncProgress::AlreadyPresent { name, .. }
            | SyncProgress::Skipped { name, .. }
            | SyncProgress::BranchPushed { branch: name }
            | SyncProgress::BranchWouldPush { branch: name } => {
                state.done += 1;
                if let Some(bar) = &state.bar {
                    bar.set_message(format!("{}/{} {}", state.done, state.total, name));
                }
            }

            SyncProgress::Failed { name, error, .. }
            | SyncProgress::BranchFailed {
                branch: name,
                error,
            } => {
                state.done += 1;
                self.println(format!(
                    "  {} {}: {}",
                    style("✗").red(),
                    name,
                    style(error).dim()
                ));
            }

            SyncProgress::SyncComplete {
                from,
                to,
                created,
                already_present,
                skipped,
                failed,
                ..
            } => {
                let summary = format!(
                    "{from} → {to}: {created} created, {already_present} already present, \
                     {skipped} skipped, {failed} failed"
                );
                Self::finish_bar(&mut state, failed == 0, summary);
            }

            SyncProgress::MirrorComplete {
                from,
                to,
                pushed,
                failed,
            } => {
                let summary = format!("{from} → {to}: {pushed} pushed, {failed} failed");
                Self::finish_bar(&mut state, failed == 0, summary);
            }

            SyncProgress::SyncAborted { error, .. } | SyncProgress::MirrorAborted { error, .. } => {
                Self::finish_bar(&mut state, false, format!("aborted: {error}"));
            }

            SyncProgress::Warning { message } => {
                self.println(format!("  {} {}", style("!").yellow(), message));
            }

            _ => {}
        }
    }

    pub fn finish(&self) {
        if let Ok(mut state) = self.state.lock()
            && let Some(bar) = state.bar.take()
        {
            bar.finish();
        }
    }

    fn start_spinner(&self, state: &mut ProgressState, prefix: &str) -> ProgressBar {
        if let Some(previous) = state.bar.take() {
            previous.finish();
        }
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(Self::spinner_style());
        bar.set_prefix(format!("{prefix:10}"));
        bar.enable_steady_tick(Duration::from_millis(100));
        state.bar = Some(bar.clone());
        state.total = 0;
        state.done = 0;
        bar
    }

    fn finish_bar(state: &mut ProgressState, ok: bool, summary: String) {
        if let Some(bar) = state.bar.take() {
            let mark = if ok {
                style("✓").green()
            } else {
                style("✗").red()
            };
            bar.set_style(Self::done_style());
            bar.finish_with_message(format!("{mark} {summary}"));
        }
    }

    fn println(&self, line: String) {
        let _ = self.multi.println(line);
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.green} {msg}")
            .expect("Invalid template")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn done_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.cyan} {msg}")
            .expect("Invalid template")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
