//! Cancellable per-question timers.
//!
//! Each timer is a spawned tokio task that sleeps and then sends an
//! [`Event`] back to the event loop. The scheduler owns the task handles and
//! aborts them on cancel, on replacement and on drop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::trace;

use crate::game::{Effect, Event};

pub struct Scheduler {
    events: mpsc::UnboundedSender<Event>,
    deadline: Option<JoinHandle<()>>,
    advance: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(events: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            events,
            deadline: None,
            advance: None,
        }
    }

    /// Carry out a timer effect. Returns `false` for effects that are not
    /// about timers.
    pub fn apply(&mut self, effect: &Effect) -> bool {
        match *effect {
            Effect::ScheduleDeadline { question, after } => {
                self.schedule_deadline(question, after);
            }
            Effect::CancelDeadline => cancel(&mut self.deadline),
            Effect::ScheduleAdvance { question, after } => {
                self.schedule_advance(question, after);
            }
            Effect::CancelAdvance => cancel(&mut self.advance),
            Effect::PlayCue(_) => return false,
        }
        true
    }

    pub fn schedule_deadline(&mut self, question: usize, after: Duration) {
        cancel(&mut self.deadline);
        self.deadline = Some(self.send_after(after, Event::Deadline { question }));
    }

    pub fn schedule_advance(&mut self, question: usize, after: Duration) {
        cancel(&mut self.advance);
        self.advance = Some(self.send_after(after, Event::Advance { question }));
    }

    pub fn cancel_all(&mut self) {
        cancel(&mut self.deadline);
        cancel(&mut self.advance);
    }

    pub fn has_pending(&self) -> bool {
        [&self.deadline, &self.advance]
            .into_iter()
            .flatten()
            .any(|handle| !handle.is_finished())
    }

    fn send_after(&self, after: Duration, event: Event) -> JoinHandle<()> {
        let events = self.events.clone();
        tokio::spawn(async move {
            sleep(after).await;
            if events.send(event).is_err() {
                trace!("event loop gone, timer dropped");
            }
        })
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

fn cancel(slot: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = slot.take() {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Cue;

    #[tokio::test(start_paused = true)]
    async fn test_deadline_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.apply(&Effect::ScheduleDeadline {
            question: 3,
            after: Duration::from_secs(5),
        });

        tokio::time::advance(Duration::from_millis(4_900)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(Event::Deadline { question: 3 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_stale_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.schedule_deadline(0, Duration::from_secs(2));
        scheduler.schedule_advance(0, Duration::from_secs(1));
        assert!(scheduler.has_pending());

        scheduler.apply(&Effect::CancelDeadline);
        scheduler.apply(&Effect::CancelAdvance);
        assert!(!scheduler.has_pending());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_previous_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.schedule_deadline(0, Duration::from_secs(1));
        scheduler.schedule_deadline(1, Duration::from_secs(2));

        assert_eq!(rx.recv().await, Some(Event::Deadline { question: 1 }));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.schedule_advance(0, Duration::from_millis(300));
        drop(scheduler);

        // the channel closes once every sender, including the aborted task's, is gone
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_cues_are_not_timer_effects() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        assert!(!scheduler.apply(&Effect::PlayCue(Cue::Tap)));
    }
}
