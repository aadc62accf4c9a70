//! WebAssembly bindings for the TD4 emulator.
//!
//! This module provides JavaScript-friendly wrappers around the core
//! emulator, so a browser front end can drive the machine and render
//! its state.

use crate::cpu::memory::MEMORY_SIZE;
use crate::program::demos;
use crate::program::disasm::disassemble_word;
use crate::program::parse_program;
use crate::{Cpu, Nibble, Word8};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly wrapper around the TD4 machine.
#[wasm_bindgen]
pub struct WasmTd4 {
    cpu: Cpu,
    program: Vec<Word8>,
}

#[wasm_bindgen]
impl WasmTd4 {
    /// Create a new machine with empty memory.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            program: Vec::new(),
        }
    }

    /// Load a program from binary text. Returns the number of parsed
    /// instruction words.
    #[wasm_bindgen]
    pub fn load_program(&mut self, source: &str) -> Result<usize, JsError> {
        let program = parse_program(source).map_err(|e| JsError::new(&format!("{}", e)))?;

        self.cpu.load_program(&program);
        let len = program.len();
        self.program = program;

        Ok(len)
    }

    /// Execute one instruction. Returns `false` once the machine is
    /// halted.
    #[wasm_bindgen]
    pub fn step(&mut self) -> bool {
        self.cpu.step()
    }

    /// Run until halt or until `max_cycles` instructions have executed.
    /// Returns the total cycle count.
    #[wasm_bindgen]
    pub fn run(&mut self, max_cycles: u32) -> u64 {
        self.cpu.run_limited(u64::from(max_cycles));
        self.cpu.cycles
    }

    /// Reset the machine and reload the current program.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.cpu.load_program(&self.program);
    }

    /// Set the continuous-execution flag. The flag is bookkeeping for
    /// the front end's scheduler; the core ignores it.
    #[wasm_bindgen]
    pub fn set_running(&mut self, running: bool) {
        self.cpu.running = running;
    }

    /// The continuous-execution flag.
    #[wasm_bindgen]
    pub fn running(&self) -> bool {
        self.cpu.running
    }

    /// Whether the machine has halted on an unassigned opcode.
    #[wasm_bindgen]
    pub fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Number of instructions executed since the last reset.
    #[wasm_bindgen]
    pub fn cycles(&self) -> u64 {
        self.cpu.cycles
    }

    /// Program counter value.
    #[wasm_bindgen]
    pub fn pc(&self) -> u8 {
        self.cpu.regs.pc.to_u8()
    }

    /// Register A value.
    #[wasm_bindgen]
    pub fn register_a(&self) -> u8 {
        self.cpu.regs.a.to_u8()
    }

    /// Register B value.
    #[wasm_bindgen]
    pub fn register_b(&self) -> u8 {
        self.cpu.regs.b.to_u8()
    }

    /// Output port value.
    #[wasm_bindgen]
    pub fn output(&self) -> u8 {
        self.cpu.regs.out.to_u8()
    }

    /// Carry flag.
    #[wasm_bindgen]
    pub fn carry(&self) -> bool {
        self.cpu.regs.carry
    }

    /// Register A as a 4-digit binary string.
    #[wasm_bindgen]
    pub fn register_a_bits(&self) -> String {
        self.cpu.regs.a.to_string()
    }

    /// Register B as a 4-digit binary string.
    #[wasm_bindgen]
    pub fn register_b_bits(&self) -> String {
        self.cpu.regs.b.to_string()
    }

    /// Program counter as a 4-digit binary string.
    #[wasm_bindgen]
    pub fn pc_bits(&self) -> String {
        self.cpu.regs.pc.to_string()
    }

    /// Output port as a 4-digit binary string.
    #[wasm_bindgen]
    pub fn output_bits(&self) -> String {
        self.cpu.regs.out.to_string()
    }

    /// Execution state as a string (`Running` or `Halted`).
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        format!("{:?}", self.cpu.state)
    }

    /// Memory cell value at `index` (0-15). Out-of-range reads return 0.
    #[wasm_bindgen]
    pub fn memory_at(&self, index: usize) -> u8 {
        if index < MEMORY_SIZE {
            self.cpu.mem.read(Nibble::from_u8(index as u8)).to_u8()
        } else {
            0
        }
    }

    /// Memory cell at `index` as an 8-digit binary string.
    #[wasm_bindgen]
    pub fn memory_bits_at(&self, index: usize) -> String {
        if index < MEMORY_SIZE {
            self.cpu.mem.read(Nibble::from_u8(index as u8)).to_string()
        } else {
            "00000000".to_string()
        }
    }

    /// Mnemonic for the memory cell at `index`.
    #[wasm_bindgen]
    pub fn disassemble_at(&self, index: usize) -> String {
        if index < MEMORY_SIZE {
            disassemble_word(self.cpu.mem.read(Nibble::from_u8(index as u8)))
        } else {
            String::new()
        }
    }

    /// All 16 memory cells as raw bytes.
    #[wasm_bindgen]
    pub fn memory_all(&self) -> Vec<u8> {
        self.cpu.mem.cells().iter().map(|w| w.to_u8()).collect()
    }

    /// Complete machine state as a JSON string.
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.cpu.snapshot()).map_err(|e| JsError::new(&format!("{}", e)))
    }
}

impl Default for WasmTd4 {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse program text and return the instruction count.
#[wasm_bindgen]
pub fn wasm_parse(source: &str) -> Result<usize, JsError> {
    let program = parse_program(source).map_err(|e| JsError::new(&format!("{}", e)))?;
    Ok(program.len())
}

/// Disassemble a single instruction word.
#[wasm_bindgen]
pub fn wasm_disassemble(bits: u8) -> String {
    disassemble_word(Word8::from_u8(bits))
}

/// Names of the built-in demo programs, for a front end's picker.
#[wasm_bindgen]
pub fn demo_names() -> js_sys::Array {
    demos::DEMOS
        .iter()
        .map(|demo| JsValue::from_str(demo.name))
        .collect()
}

/// Source text of the named demo, if there is one.
#[wasm_bindgen]
pub fn demo_source(name: &str) -> Option<String> {
    demos::find(name).map(|demo| demo.source.to_string())
}

/// Render a value as a 4-digit binary string (low nibble only).
#[wasm_bindgen]
pub fn format_nibble(value: u8) -> String {
    Nibble::from_u8(value).to_string()
}

/// Render a byte as an 8-digit binary string.
#[wasm_bindgen]
pub fn format_byte(bits: u8) -> String {
    Word8::from_u8(bits).to_string()
}
