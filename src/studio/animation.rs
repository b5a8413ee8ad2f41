use flume::Sender;
use tokio::{task::JoinHandle, time::Instant};
use tracing::debug;

use crate::{
    config::AnimationTiming,
    event::events::Event,
    studio::{
        controller::RunId,
        state::{ProcessingStep, StepStatus},
    },
};

pub const STEPS: [(&str, &str); 6] = [
    ("upload", "Analyzing images..."),
    ("depth", "Estimating room depth & geometry..."),
    ("segment", "Segmenting furniture object..."),
    ("perspective", "Calculating scale & perspective..."),
    ("lighting", "Matching lighting & shadows..."),
    ("render", "Final high-res rendering..."),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Advanced,
    Finished,
}

/// The scripted "work" shown while the real request runs. Pure; the runner
/// below owns the clock.
#[derive(Debug, Clone)]
pub struct ProcessingAnimation {
    steps: Vec<ProcessingStep>,
    index: usize,
}

impl Default for ProcessingAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingAnimation {
    pub fn new() -> Self {
        Self {
            steps: STEPS
                .iter()
                .map(|&(id, label)| ProcessingStep {
                    id,
                    label,
                    status: StepStatus::Pending,
                })
                .collect(),
            index: 0,
        }
    }

    pub fn steps(&self) -> &[ProcessingStep] {
        &self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.index > self.steps.len()
    }

    /// Completes the previous step, activates the current one. Reports
    /// `Finished` on the tick after the last step went active.
    pub fn tick(&mut self) -> Tick {
        if self.is_finished() {
            return Tick::Finished;
        }

        let current = self.index;
        if let Some(prev) = current.checked_sub(1).and_then(|i| self.steps.get_mut(i)) {
            prev.status = StepStatus::Completed;
        }
        if let Some(step) = self.steps.get_mut(current) {
            step.status = StepStatus::Active;
        }

        self.index += 1;

        if self.is_finished() {
            Tick::Finished
        } else {
            Tick::Advanced
        }
    }
}

/// Drives one animation run. Aborting the returned handle is the only way to
/// stop it, and guarantees `AnimationComplete` is never sent.
pub fn spawn(run: RunId, timing: AnimationTiming, tx: Sender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut animation = ProcessingAnimation::new();
        let _ = tx.send(Event::AnimationProgress {
            run,
            steps: animation.steps().to_vec(),
        });

        let mut interval =
            tokio::time::interval_at(Instant::now() + timing.step_interval, timing.step_interval);

        loop {
            interval.tick().await;
            let outcome = animation.tick();
            let _ = tx.send(Event::AnimationProgress {
                run,
                steps: animation.steps().to_vec(),
            });

            if outcome == Tick::Finished {
                break;
            }
        }

        tokio::time::sleep(timing.completion_delay).await;
        debug!("Processing animation {} finished", run);
        let _ = tx.send(Event::AnimationComplete { run });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn statuses(animation: &ProcessingAnimation) -> Vec<StepStatus> {
        animation.steps().iter().map(|s| s.status).collect()
    }

    #[test]
    fn starts_all_pending() {
        let animation = ProcessingAnimation::new();
        assert_eq!(animation.steps().len(), 6);
        assert!(
            statuses(&animation)
                .iter()
                .all(|s| *s == StepStatus::Pending)
        );
    }

    #[test]
    fn advances_in_order_without_regressing() {
        let mut animation = ProcessingAnimation::new();
        let mut previous = statuses(&animation);

        for tick in 1..=7 {
            let outcome = animation.tick();
            let now = statuses(&animation);

            for (before, after) in previous.iter().zip(&now) {
                assert!(after >= before, "step regressed on tick {tick}");
            }
            let active: Vec<_> = now
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == StepStatus::Active)
                .map(|(i, _)| i)
                .collect();

            if tick <= 6 {
                assert_eq!(outcome, Tick::Advanced);
                assert_eq!(active, vec![tick - 1]);
                assert!(now[..tick - 1].iter().all(|s| *s == StepStatus::Completed));
                assert!(now[tick..].iter().all(|s| *s == StepStatus::Pending));
            } else {
                assert_eq!(outcome, Tick::Finished);
                assert!(now.iter().all(|s| *s == StepStatus::Completed));
            }
            previous = now;
        }
    }

    #[test]
    fn ticking_after_finish_is_inert() {
        let mut animation = ProcessingAnimation::new();
        while animation.tick() != Tick::Finished {}
        let before = statuses(&animation);
        assert_eq!(animation.tick(), Tick::Finished);
        assert_eq!(statuses(&animation), before);
    }

    #[tokio::test(start_paused = true)]
    async fn runner_completes_exactly_once_after_full_sequence() {
        let (tx, rx) = flume::unbounded();
        let started = Instant::now();
        let handle = spawn(7, AnimationTiming::default(), tx);
        handle.await.unwrap();

        // 7 ticks of 1.2s plus the 0.5s settle.
        assert_eq!(started.elapsed(), Duration::from_millis(7 * 1200 + 500));

        let events: Vec<Event> = rx.drain().collect();
        let completions = events
            .iter()
            .filter(|e| matches!(e, Event::AnimationComplete { run: 7 }))
            .count();
        assert_eq!(completions, 1);
        assert!(matches!(events.last(), Some(Event::AnimationComplete { .. })));

        let last_progress = events.iter().rev().find_map(|e| match e {
            Event::AnimationProgress { steps, .. } => Some(steps.clone()),
            _ => None,
        });
        assert!(
            last_progress
                .unwrap()
                .iter()
                .all(|s| s.status == StepStatus::Completed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_runner_never_completes() {
        let (tx, rx) = flume::unbounded();
        let handle = spawn(1, AnimationTiming::default(), tx);

        tokio::time::sleep(Duration::from_millis(3000)).await;
        handle.abort();
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert!(
            rx.drain()
                .all(|e| !matches!(e, Event::AnimationComplete { .. }))
        );
    }
}
