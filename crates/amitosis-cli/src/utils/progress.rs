use amitosis::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// What the bar is currently showing.
#[derive(Default)]
struct BarLabel {
    phase: String,
    status: Option<String>,
}

impl BarLabel {
    fn text(&self) -> String {
        match &self.status {
            Some(status) => format!("{} ({})", self.phase, status),
            None => self.phase.clone(),
        }
    }
}

/// Draws workflow phases as spinners and the generation loop as a bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
    label: Arc<Mutex<BarLabel>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::drawing_to(ProgressDrawTarget::stderr())
    }

    /// Accepts every event but never draws.
    pub fn hidden() -> Self {
        Self::drawing_to(ProgressDrawTarget::hidden())
    }

    fn drawing_to(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target)
            .with_style(Self::phase_style())
            .with_message("Starting...");
        bar.finish_and_clear();

        Self {
            bar,
            label: Arc::new(Mutex::new(BarLabel::default())),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        let label = self.label.clone();

        Box::new(move |event: Progress| {
            let Ok(mut label) = label.lock() else {
                warn!("Progress label mutex was poisoned; dropping event.");
                return;
            };
            Self::handle(&bar, &mut label, event);
        })
    }

    fn handle(bar: &ProgressBar, label: &mut BarLabel, event: Progress) {
        match event {
            Progress::PhaseStart { name } => {
                label.phase = name.to_string();
                label.status = None;
                bar.reset();
                bar.set_length(0);
                bar.set_style(Self::phase_style());
                bar.set_message(label.text());
                bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::TaskStart { total_steps } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_style(Self::generation_style());
                bar.set_length(total_steps);
                bar.set_message(label.text());
            }
            Progress::TaskIncrement => bar.inc(1),
            Progress::StatusUpdate { text } => {
                label.status = Some(text);
                bar.set_message(label.text());
            }
            Progress::TaskFinish => {
                if let Some(len) = bar.length() {
                    bar.set_position(len);
                }
            }
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                bar.finish_with_message(format!("✓ {}", label.phase));
            }
            Progress::Message(msg) if bar.is_finished() => bar.set_message(msg),
            Progress::Message(msg) => bar.println(format!("  {}", msg)),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("static spinner template is valid")
    }

    fn generation_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg:<40} [{bar:40.cyan/blue}] gen {pos}/{len} ({elapsed_secs}, eta {eta_secs})",
        )
        .expect("static generation template is valid")
        .with_key("elapsed_secs", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.elapsed().as_secs_f64());
        })
        .with_key("eta_secs", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("=> ")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
