use std::cell::Cell;
use std::rc::Rc;

/// Source of the session time, in seconds, used for guide auto-hide.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Wall clock: a monotonic instant on native, `performance.now()` on the web.
#[derive(Debug)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    #[cfg(target_arch = "wasm32")]
    fn now_secs(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|perf| perf.now() / 1000.0)
            .unwrap_or(0.0)
    }
}

/// Clock advanced by hand, for deterministic timing.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self { now: Cell::new(start_secs) }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_secs(&self) -> f64 {
        (**self).now_secs()
    }
}
