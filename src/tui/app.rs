//! Simulator application state and logic.

use crate::program::disasm::disassemble_word;
use crate::{Cpu, Word8};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Auto-run speeds in instructions per second.
const SPEEDS: &[u32] = &[1, 2, 4, 8, 16, 32];

/// Simulator application state.
pub struct SimulatorApp {
    /// The machine being simulated.
    pub cpu: Cpu,
    /// Original program, kept for reset.
    pub program: Vec<Word8>,
    /// Breakpoints (by address).
    pub breakpoints: HashSet<u8>,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
    speed_idx: usize,
    last_step: Instant,
}

impl SimulatorApp {
    /// Create a new simulator with a loaded program.
    pub fn new(program: Vec<Word8>) -> Self {
        let mut cpu = Cpu::new();
        cpu.load_program(&program);

        Self {
            cpu,
            program,
            breakpoints: HashSet::new(),
            should_quit: false,
            status: "Ready. Press 's' to step, 'r' to run, 'q' to quit.".into(),
            speed_idx: 3,
            last_step: Instant::now(),
        }
    }

    /// Current auto-run speed in instructions per second.
    pub fn speed(&self) -> u32 {
        SPEEDS[self.speed_idx]
    }

    fn step_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed()))
    }

    /// Execute one instruction and report it in the status line.
    pub fn step(&mut self) {
        if self.cpu.is_halted() {
            self.cpu.running = false;
            self.status = format!(
                "Halted after {} cycles. Press 'x' to reset.",
                self.cpu.cycles
            );
            return;
        }

        let pc = self.cpu.regs.pc;
        let word = self.cpu.mem.read(pc);
        if self.cpu.step() {
            self.status = format!("PC={:X}: {}", pc.to_u8(), disassemble_word(word));
        } else {
            self.cpu.running = false;
            self.status = format!(
                "Halted at PC={:X} on {} after {} cycles",
                pc.to_u8(),
                word,
                self.cpu.cycles
            );
        }
    }

    /// Start or pause continuous execution.
    pub fn toggle_run(&mut self) {
        if self.cpu.is_halted() {
            self.status = "CPU is halted. Press 'x' to reset.".into();
            return;
        }

        if self.cpu.running {
            self.cpu.running = false;
            self.status = "Paused.".into();
        } else {
            self.cpu.running = true;
            self.last_step = Instant::now();
            self.status = format!("Running at {} steps/s...", self.speed());
            // Standing on a breakpoint would stop us again immediately
            if self.breakpoints.contains(&self.cpu.regs.pc.to_u8()) {
                self.step();
            }
        }
    }

    /// One iteration of continuous execution, rate limited.
    pub fn tick(&mut self) {
        if !self.cpu.running {
            return;
        }

        if self.cpu.is_halted() {
            self.cpu.running = false;
            self.status = format!("Halted after {} cycles", self.cpu.cycles);
            return;
        }

        let pc = self.cpu.regs.pc.to_u8();
        if self.breakpoints.contains(&pc) {
            self.cpu.running = false;
            self.status = format!("Breakpoint at PC={:X}", pc);
            return;
        }

        if self.last_step.elapsed() >= self.step_interval() {
            self.step();
            self.last_step = Instant::now();
        }
    }

    /// Toggle a breakpoint at the current PC.
    pub fn toggle_breakpoint(&mut self) {
        let pc = self.cpu.regs.pc.to_u8();
        if self.breakpoints.contains(&pc) {
            self.breakpoints.remove(&pc);
            self.status = format!("Removed breakpoint at PC={:X}", pc);
        } else {
            self.breakpoints.insert(pc);
            self.status = format!("Set breakpoint at PC={:X}", pc);
        }
    }

    /// Raise the auto-run speed.
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEEDS.len() {
            self.speed_idx += 1;
        }
        self.status = format!("Speed: {} steps/s", self.speed());
    }

    /// Lower the auto-run speed.
    pub fn speed_down(&mut self) {
        self.speed_idx = self.speed_idx.saturating_sub(1);
        self.status = format!("Speed: {} steps/s", self.speed());
    }

    /// Reload the program and return the machine to its initial state.
    pub fn reset(&mut self) {
        self.cpu.load_program(&self.program);
        self.status = "Reset. Ready.".into();
    }

    /// Disassembly of all 16 memory cells as (address, text, is_current).
    pub fn listing(&self) -> Vec<(u8, String, bool)> {
        let pc = self.cpu.regs.pc.to_u8();
        self.cpu
            .mem
            .cells()
            .iter()
            .enumerate()
            .map(|(addr, word)| (addr as u8, disassemble_word(*word), addr as u8 == pc))
            .collect()
    }
}

/// Run the simulator with a program.
pub fn run_simulator(program: Vec<Word8>) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create app
    let mut app = SimulatorApp::new(program);

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        // Handle input. The short timeout keeps auto-run ticking.
        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('s') => {
                            app.cpu.running = false;
                            app.step();
                        }
                        KeyCode::Char('r') | KeyCode::Char(' ') => app.toggle_run(),
                        KeyCode::Char('b') => app.toggle_breakpoint(),
                        KeyCode::Char('x') => app.reset(),
                        KeyCode::Char('+') | KeyCode::Char('=') => app.speed_up(),
                        KeyCode::Char('-') => app.speed_down(),
                        _ => {}
                    }
                }
            }
        }

        // Tick for continuous running
        if app.cpu.running {
            app.tick();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
