//! Timed commands released into the engine as simulated time advances.

use crate::events::EngineCommand;

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledAction {
    /// Simulated time at which the command is staged [s]
    pub time_s: f64,
    pub command: EngineCommand,
}

/// Actions ordered by time. Ties keep their insertion order.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    actions: Vec<ScheduledAction>,
    next: usize,
}

impl Schedule {
    pub fn new(mut actions: Vec<ScheduledAction>) -> Self {
        actions.sort_by(|a, b| a.time_s.total_cmp(&b.time_s));
        Self { actions, next: 0 }
    }

    /// Actions whose time has been reached at `t_s`, each returned once.
    pub fn due(&mut self, t_s: f64) -> &[ScheduledAction] {
        let start = self.next;
        while self
            .actions
            .get(self.next)
            .is_some_and(|a| a.time_s <= t_s + 1e-9)
        {
            self.next += 1;
        }
        &self.actions[start..self.next]
    }

    pub fn remaining(&self) -> usize {
        self.actions.len() - self.next
    }

    /// Rewind so every action fires again.
    pub fn rewind(&mut self) {
        self.next = 0;
    }
}
