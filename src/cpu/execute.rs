//! The TD4 execution engine.
//!
//! [`Cpu`] owns the registers and instruction memory and implements the
//! fetch, decode, execute cycle. One call to [`Cpu::step`] is one
//! instruction. Drivers (the CLI runner, the TUI, the wasm bindings)
//! call `step` in a loop and inspect its boolean result; the core never
//! schedules itself.

use crate::binary::{Nibble, Word8};
use crate::cpu::decode::{self, Instruction};
use crate::cpu::memory::{Memory, MEMORY_SIZE};
use crate::cpu::registers::Registers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuState {
    /// The machine will execute the next instruction.
    Running,
    /// The machine executed an unassigned opcode. Terminal until the
    /// next reset or program load.
    Halted,
}

/// The TD4 machine: registers plus instruction memory.
#[derive(Clone, Serialize, Deserialize)]
pub struct Cpu {
    /// Register file.
    pub regs: Registers,
    /// Instruction memory.
    pub mem: Memory,
    /// Whether the machine is running or halted.
    pub state: CpuState,
    /// Continuous-execution flag for drivers. The core never reads it;
    /// a driver sets it while auto-stepping and clears it when it
    /// stops. Reset clears it along with everything else.
    pub running: bool,
    /// Number of instructions executed since the last reset.
    pub cycles: u64,
    last_instr: Option<Instruction>,
}

impl Cpu {
    /// A fresh machine with zeroed registers and empty memory.
    pub fn new() -> Self {
        Cpu {
            regs: Registers::new(),
            mem: Memory::new(),
            state: CpuState::Running,
            running: false,
            cycles: 0,
            last_instr: None,
        }
    }

    /// Return the machine to power-on state. Memory is cleared too.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.mem.clear();
        self.state = CpuState::Running;
        self.running = false;
        self.cycles = 0;
        self.last_instr = None;
    }

    /// Reset the machine and load `program` at address 0. At most 16
    /// words are used; memory past the end of the program stays zeroed.
    pub fn load_program(&mut self, program: &[Word8]) {
        self.reset();
        self.mem.load(program);
    }

    /// Execute one instruction.
    ///
    /// Returns `true` if the machine can keep going, `false` if this
    /// step halted it or it was already halted. Stepping a halted
    /// machine changes nothing.
    pub fn step(&mut self) -> bool {
        if self.state != CpuState::Running {
            return false;
        }

        // Fetch
        let word = self.mem.read(self.regs.pc);

        // Advance PC before dispatch (wraps mod 16; jumps overwrite it)
        self.regs.advance_pc();

        // Decode and execute
        let instr = decode::decode(word);
        self.execute(instr);

        self.cycles += 1;
        self.last_instr = Some(instr);

        self.state == CpuState::Running
    }

    fn execute(&mut self, instr: Instruction) {
        match instr {
            Instruction::AddA { imm } => {
                let (sum, carry) = self.regs.a.overflowing_add(imm);
                self.regs.a = sum;
                self.regs.carry = carry;
            }
            Instruction::MovAB => self.regs.a = self.regs.b,
            Instruction::InA { imm } => self.regs.a = imm,
            Instruction::MovA { imm } => self.regs.a = imm,
            Instruction::MovBA => self.regs.b = self.regs.a,
            Instruction::AddB { imm } => {
                let (sum, carry) = self.regs.b.overflowing_add(imm);
                self.regs.b = sum;
                self.regs.carry = carry;
            }
            Instruction::InB { imm } => self.regs.b = imm,
            Instruction::MovB { imm } => self.regs.b = imm,
            Instruction::OutB => self.regs.out = self.regs.b,
            Instruction::Out { imm } => self.regs.out = imm,
            Instruction::Jnc { addr } => {
                if !self.regs.carry {
                    self.regs.jump(addr);
                }
            }
            Instruction::Jmp { addr } => self.regs.jump(addr),
            Instruction::Unknown { .. } => self.state = CpuState::Halted,
        }
    }

    /// Step the machine until it halts or `max_steps` instructions have
    /// run. Returns the number of instructions executed.
    pub fn run_limited(&mut self, max_steps: u64) -> u64 {
        let start = self.cycles;
        while self.cycles - start < max_steps {
            if !self.step() {
                break;
            }
        }
        self.cycles - start
    }

    /// Whether the machine has halted on an unassigned opcode.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// The most recently executed instruction, if any.
    pub fn last_instruction(&self) -> Option<Instruction> {
        self.last_instr
    }

    /// An immutable copy of the complete machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            a: self.regs.a,
            b: self.regs.b,
            pc: self.regs.pc,
            out: self.regs.out,
            carry: self.regs.carry,
            memory: *self.mem.cells(),
            halted: self.is_halted(),
            running: self.running,
            cycles: self.cycles,
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("state", &self.state)
            .field("cycles", &self.cycles)
            .field("regs", &self.regs)
            .field("mem", &self.mem)
            .finish()
    }
}

/// A copy of the machine state at one instant, detached from the
/// [`Cpu`] that produced it. Serializes to JSON for the CLI's `--json`
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub a: Nibble,
    pub b: Nibble,
    pub pc: Nibble,
    pub out: Nibble,
    pub carry: bool,
    pub memory: [Word8; MEMORY_SIZE],
    pub halted: bool,
    pub running: bool,
    pub cycles: u64,
}
