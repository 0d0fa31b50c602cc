//! Three logical periodic timers driven by an explicit time step.
//!
//! Nothing here reads a clock.  The host calls [`Scheduler::next_due`]
//! with a budget of elapsed time and gets back each firing in the order it
//! would have happened, so a test can step the game one exact interval at a
//! time.

use std::time::Duration;

/// The three periodic tasks of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    GameTick,
    EnemyFire,
    EnemyAnimation,
}

impl Task {
    pub const ALL: [Task; 3] = [Task::GameTick, Task::EnemyFire, Task::EnemyAnimation];

    fn index(self) -> usize {
        match self {
            Task::GameTick => 0,
            Task::EnemyFire => 1,
            Task::EnemyAnimation => 2,
        }
    }
}

/// Intervals for the three tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub game_tick: Duration,
    pub enemy_fire: Duration,
    pub enemy_animation: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            game_tick: Duration::from_millis(30),
            enemy_fire: Duration::from_millis(3000),
            enemy_animation: Duration::from_millis(100),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodicTimer {
    interval: Duration,
    until_next: Duration,
    running: bool,
    fired: u64,
}

impl PeriodicTimer {
    /// A stopped timer.  Zero intervals are bumped to 1 ms.
    pub fn new(interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        PeriodicTimer {
            interval,
            until_next: interval,
            running: false,
            fired: 0,
        }
    }

    /// Starts (or restarts) the countdown from a full interval.
    pub fn start(&mut self) {
        self.running = true;
        self.until_next = self.interval;
    }

    /// Prevents future firings.  A callback already running is unaffected.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How many times this timer has fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduler {
    timers: [PeriodicTimer; 3],
}

impl Scheduler {
    /// All three timers, stopped.
    pub fn new(timings: &Timings) -> Self {
        Scheduler {
            timers: [
                PeriodicTimer::new(timings.game_tick),
                PeriodicTimer::new(timings.enemy_fire),
                PeriodicTimer::new(timings.enemy_animation),
            ],
        }
    }

    pub fn timer(&self, task: Task) -> &PeriodicTimer {
        &self.timers[task.index()]
    }

    pub fn start(&mut self, task: Task) {
        self.timers[task.index()].start();
    }

    pub fn stop(&mut self, task: Task) {
        self.timers[task.index()].stop();
    }

    pub fn start_all(&mut self) {
        self.timers.iter_mut().for_each(PeriodicTimer::start);
    }

    pub fn stop_all(&mut self) {
        self.timers.iter_mut().for_each(PeriodicTimer::stop);
    }

    pub fn is_running(&self, task: Task) -> bool {
        self.timer(task).is_running()
    }

    /// True while at least one timer is running.
    pub fn any_running(&self) -> bool {
        self.timers.iter().any(PeriodicTimer::is_running)
    }

    /// Spends time from `budget` up to the next firing and returns the task
    /// that fired.  Returns `None` once no running timer is due within what
    /// is left; the leftover is then credited to every running timer and
    /// `budget` drops to zero.
    ///
    /// Timers due at the same instant fire in [`Task::ALL`] order.
    pub fn next_due(&mut self, budget: &mut Duration) -> Option<Task> {
        let next = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.running)
            .map(|(i, t)| (i, t.until_next))
            .min_by_key(|&(i, wait)| (wait, i));

        let (index, wait) = match next {
            Some((index, wait)) if wait <= *budget => (index, wait),
            _ => {
                self.elapse(*budget);
                *budget = Duration::ZERO;
                return None;
            }
        };

        self.elapse(wait);
        *budget -= wait;
        let timer = &mut self.timers[index];
        timer.until_next = timer.interval;
        timer.fired += 1;
        Some(Task::ALL[index])
    }

    fn elapse(&mut self, dt: Duration) {
        for timer in self.timers.iter_mut().filter(|t| t.running) {
            timer.until_next = timer.until_next.saturating_sub(dt);
        }
    }
}
