use crate::config::CountdownConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Number(u32),
    Go,
    /// Countdown over; play begins.
    Done,
}

/// Pre-play countdown ticked by the game loop. Shows `from, .., 1`, then
/// "GO!", one step apart, then finishes.
#[derive(Debug, Clone)]
pub struct Countdown {
    from: u32,
    step_seconds: f64,
    started_at: f64,
    /// Steps already emitted.
    emitted: u32,
}

impl Countdown {
    pub fn new(config: &CountdownConfig, now: f64) -> Self {
        Self {
            from: config.from,
            step_seconds: config.step_seconds,
            started_at: now,
            emitted: 0,
        }
    }

    /// Host time at which the countdown finishes.
    pub fn ends_at(&self) -> f64 {
        self.started_at + f64::from(self.from + 1) * self.step_seconds
    }

    pub fn is_done(&self) -> bool {
        self.emitted > self.from + 1
    }

    /// Steps that came due since the last call, in order.
    pub fn advance(&mut self, now: f64) -> Vec<CountdownStep> {
        let mut due = Vec::new();
        while !self.is_done() {
            let at = self.started_at + f64::from(self.emitted) * self.step_seconds;
            if now < at {
                break;
            }
            due.push(self.step(self.emitted));
            self.emitted += 1;
        }
        due
    }

    fn step(&self, index: u32) -> CountdownStep {
        if index < self.from {
            CountdownStep::Number(self.from - index)
        } else if index == self.from {
            CountdownStep::Go
        } else {
            CountdownStep::Done
        }
    }
}
