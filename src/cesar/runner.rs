//! Run-until-stopped loop.
//!
//! The Cpu lives behind one `Mutex` which the loop enters once per
//! instruction, so an observer on another thread only ever sees state
//! between instructions. Cancellation goes through the `running` flag and
//! takes effect after the instruction in flight.

use std::sync::{Arc, Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use log::{info};

use super::super::config::{RunConfig};
use super::super::cpu::{Cpu, ExecutionResult};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// The stopping result, or `None` when cancelled or out of steps.
    pub result: Option<ExecutionResult>,
    /// Instructions executed.
    pub steps: u64,
}

fn lock(cpu: &Mutex<Cpu>) -> MutexGuard<Cpu> {
    // A panicking observer must not make the machine unreachable.
    match cpu.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Executes instructions until HALT, BREAK_POINT, END_OF_MEMORY, the step
/// limit, or `running` going false. `running` is cleared on return.
///
/// `observer` sees the Cpu once when the run ends and, with
/// `config.observe_steps`, after every ordinary step. A run that starts on
/// the breakpoint executes that instruction instead of stopping at once.
pub fn run<F>(cpu: &Mutex<Cpu>, running: &AtomicBool, config: &RunConfig, mut observer: F) -> RunSummary
    where F: FnMut(&Cpu)
{
    {
        let mut cpu = lock(cpu);
        if let Some(pc) = config.start_pc {
            cpu.set_pc(pc);
        }
        if config.breakpoint.is_some() {
            cpu.set_breakpoint(config.breakpoint);
        }
    }

    let mut steps: u64 = 0;
    let result = loop {
        if !running.load(Ordering::SeqCst) {
            break None;
        }
        if config.max_steps.map_or(false, |max| steps >= max) {
            break None;
        }

        let mut cpu = lock(cpu);
        let result = if steps == 0 {
            cpu.execute_ignoring_breakpoint()
        } else {
            cpu.execute_next_instruction()
        };
        match result {
            ExecutionResult::Ok | ExecutionResult::Noop => {
                steps += 1;
                if config.observe_steps {
                    observer(&cpu);
                }
            },
            ExecutionResult::Halt => {
                steps += 1;
                break Some(result);
            },
            ExecutionResult::BreakPoint | ExecutionResult::EndOfMemory => {
                break Some(result);
            },
        }
    };
    running.store(false, Ordering::SeqCst);

    let cpu = lock(cpu);
    match result {
        Some(r) => info!("stopped with {:?} at {:04x} after {} steps", r, cpu.pc(), steps),
        None => info!("cancelled at {:04x} after {} steps", cpu.pc(), steps),
    }
    observer(&cpu);
    RunSummary { result, steps }
}

/// `run` on a worker thread.
pub fn spawn<F>(cpu: Arc<Mutex<Cpu>>, running: Arc<AtomicBool>, config: RunConfig, observer: F) -> JoinHandle<RunSummary>
    where F: FnMut(&Cpu) + Send + 'static
{
    thread::spawn(move || run(&cpu, &running, &config, observer))
}
