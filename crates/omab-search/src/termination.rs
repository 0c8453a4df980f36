use std::time::Duration;
use std::time::Instant;

/// Budget governing how many trials a planner runs before it must answer.
///
/// Planners call [`init`](Self::init) once before planning and
/// [`reached`](Self::reached) between trials, never inside one. At least one
/// trial always runs before the first check.
pub trait TerminationChecker {
    fn init(&mut self);
    fn reached(&mut self) -> bool;
}

/// Fires after a fixed number of checks, i.e. after that many trials.
#[derive(Debug, Clone)]
pub struct CountTermination {
    limit: usize,
    count: usize,
}

impl CountTermination {
    pub fn new(limit: usize) -> Self {
        Self { limit, count: 0 }
    }
}

impl TerminationChecker for CountTermination {
    fn init(&mut self) {
        self.count = 0;
    }
    fn reached(&mut self) -> bool {
        self.count += 1;
        self.count >= self.limit
    }
}

/// Fires shortly before a wall-clock limit measured from the last `init`.
///
/// Leaves a fixed 2 ms margin plus 1% of the limit so the answer is
/// returned in time.
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
    start: Instant,
}

impl TimeTermination {
    const MARGIN: Duration = Duration::from_millis(2);

    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            start: Instant::now(),
        }
    }
}

impl TerminationChecker for TimeTermination {
    fn init(&mut self) {
        self.start = Instant::now();
    }
    fn reached(&mut self) -> bool {
        self.start.elapsed() + Self::MARGIN + self.limit / 100 > self.limit
    }
}

/// Never fires; the planner's own budget decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeTermination;

impl TerminationChecker for FakeTermination {
    fn init(&mut self) {}
    fn reached(&mut self) -> bool {
        false
    }
}
