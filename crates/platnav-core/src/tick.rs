/// Per-tick timing handed to the maintainer and path followers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// True on ticks that are a multiple of `interval`. An interval of zero never fires.
    pub fn every(&self, interval: u64) -> bool {
        interval != 0 && self.tick % interval == 0
    }
}
