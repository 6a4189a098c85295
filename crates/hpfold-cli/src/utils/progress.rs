use hpfold::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct BarState {
    pb: ProgressBar,
    best: Option<u32>,
    optimal: Option<u32>,
}

impl BarState {
    fn best_message(&self, energy: u32) -> String {
        match self.optimal {
            Some(optimal) => format!("best {}/{}", energy, optimal),
            None => format!("best {}", energy),
        }
    }

    /// Tracks the best energy of the evolution phase and prints a line whenever it improves.
    fn on_generation(&mut self, generation: usize, energy: u32) {
        let improved = self.best.is_some_and(|best| energy > best);
        if self.best.is_none() || improved {
            self.best = Some(energy);
            self.pb.set_message(self.best_message(energy));
        }
        if improved {
            self.pb
                .println(format!("  gen {:>5}: new best energy {}", generation, energy));
        }
    }
}

/// Draws the generation bar on stderr and logs each improvement of the best energy.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState {
                pb,
                best: None,
                optimal: None,
            })),
        }
    }

    /// Shows the best energy against a known optimum, as for benchmark sequences.
    pub fn with_optimal_score(self, optimal: Option<u32>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.optimal = optimal;
        }
        self
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = Arc::clone(&self.state);

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    state.best = None;
                    let pb = &state.pb;
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(name);
                }
                Progress::PhaseFinish => {
                    let summary = match state.best {
                        Some(best) => format!("✓ Done, {}", state.best_message(best)),
                        None => "✓ Done".to_string(),
                    };
                    state.pb.disable_steady_tick();
                    state.pb.finish_with_message(summary);
                }
                Progress::TaskStart { total_steps } => {
                    let pb = &state.pb;
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total_steps);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                }
                Progress::TaskIncrement => state.pb.inc(1),
                Progress::TaskFinish => {
                    let length = state.pb.length().unwrap_or(0);
                    if state.pb.position() < length {
                        state.pb.set_position(length);
                    }
                    state.pb.finish();
                }
                Progress::GenerationComplete {
                    generation,
                    best_energy,
                } => state.on_generation(generation, best_energy),
                Progress::Message(msg) => {
                    if !state.pb.is_finished() {
                        state.pb.println(format!("  {}", msg));
                    } else {
                        state.pb.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "gen [{bar:40.cyan/blue}] {pos}/{len} {msg:<14} {per_sec:.dim} ({eta})",
        )
        .expect("Failed to create bar style template")
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            },
        )
        .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let state = handler.state.lock().unwrap();
        assert_eq!(state.pb.length(), Some(0));
        assert!(state.pb.is_finished());
        assert_eq!(state.best, None);
    }

    #[test]
    fn generation_events_advance_the_bar_and_track_the_best_energy() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Evolution" });
        callback(Progress::TaskStart { total_steps: 3 });
        for (generation, energy) in [(1, 4), (2, 3), (3, 6)] {
            callback(Progress::GenerationComplete {
                generation,
                best_energy: energy,
            });
            callback(Progress::TaskIncrement);
        }
        {
            let state = handler.state.lock().unwrap();
            assert_eq!(state.pb.position(), 3);
            assert_eq!(state.best, Some(6));
            assert_eq!(state.pb.message(), "best 6");
        }

        callback(Progress::TaskFinish);
        callback(Progress::PhaseFinish);
        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.pb.message(), "✓ Done, best 6");
    }

    #[test]
    fn benchmark_runs_show_the_known_optimum() {
        let handler = CliProgressHandler::new().with_optimal_score(Some(9));
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Evolution" });
        callback(Progress::GenerationComplete {
            generation: 1,
            best_energy: 7,
        });
        let state = handler.state.lock().unwrap();
        assert_eq!(state.pb.message(), "best 7/9");
    }

    #[test]
    fn a_new_phase_forgets_the_previous_best() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Evolution" });
        callback(Progress::GenerationComplete {
            generation: 1,
            best_energy: 5,
        });
        callback(Progress::PhaseStart {
            name: "Initial Population",
        });
        callback(Progress::PhaseFinish);

        let state = handler.state.lock().unwrap();
        assert_eq!(state.best, None);
        assert_eq!(state.pb.message(), "✓ Done");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Initial Population",
            });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.pb.message(), "✓ Done");
    }
}
