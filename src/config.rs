use super::types::{Adr};

/// Settings for a batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Stop when the PC reaches this address.
    pub breakpoint: Option<Adr>,
    /// Call the observer after every ordinary step, not only at the end.
    pub observe_steps: bool,
    /// Give up after this many instructions. `None` runs until a stop.
    pub max_steps: Option<u64>,
    /// PC to start from. `None` keeps the current PC.
    pub start_pc: Option<Adr>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            breakpoint: None,
            observe_steps: false,
            max_steps: None,
            start_pc: None,
        }
    }
}

impl RunConfig {
    pub fn with_breakpoint(mut self, adr: Adr) -> Self {
        self.breakpoint = Some(adr);
        self
    }

    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn with_start_pc(mut self, adr: Adr) -> Self {
        self.start_pc = Some(adr);
        self
    }
}
