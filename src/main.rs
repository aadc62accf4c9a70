//! TD4 Emulator - CLI Entry Point
//!
//! Commands:
//! - `td4-emu run <program>` - Run a program file (or `demo:<name>`)
//! - `td4-emu debug <program>` - Interactive TUI simulator
//! - `td4-emu disasm <program>` - Disassemble a program
//! - `td4-emu demo [name]` - List or print the built-in demos
//! - `td4-emu test` - Run the built-in self-test

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td4-emu")]
#[command(version = "0.1.0")]
#[command(about = "An emulator of the TD4, a 4-bit educational CPU")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program until it halts or the cycle limit is reached
    Run {
        /// Path to the program file, or demo:<name>
        program: String,
        /// Maximum number of cycles to run (default: 10000)
        #[arg(short, long, default_value = "10000")]
        max_cycles: u64,
        /// Show trace output
        #[arg(short, long)]
        trace: bool,
        /// Print the final machine state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive TUI simulator
    Debug {
        /// Path to the program file, or demo:<name>
        program: String,
    },
    /// Disassemble a program to readable text
    Disasm {
        /// Path to the program file, or demo:<name>
        program: String,
    },
    /// List the built-in demo programs, or print one
    Demo {
        /// Demo name to print
        name: Option<String>,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            program,
            max_cycles,
            trace,
            json,
        }) => {
            run_program(&program, max_cycles, trace, json);
        }
        Some(Commands::Debug { program }) => {
            debug_program(&program);
        }
        Some(Commands::Disasm { program }) => {
            disassemble_file(&program);
        }
        Some(Commands::Demo { name }) => {
            demo_command(name.as_deref());
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("TD4 Emulator v0.1.0");
            println!("A 4-bit educational CPU emulator");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_quickstart();
        }
    }
}

/// Load instruction words from a file path or a `demo:<name>` reference.
fn load_words(path: &str, quiet: bool) -> Vec<td4::Word8> {
    use td4::cpu::MEMORY_SIZE;
    use td4::program::{demos, parse_program};

    let source = if let Some(name) = path.strip_prefix("demo:") {
        match demos::find(name) {
            Some(demo) => demo.source.to_string(),
            None => {
                eprintln!("❌ Unknown demo '{}'. See `td4-emu demo` for the list.", name);
                std::process::exit(1);
            }
        }
    } else {
        match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("❌ Failed to read file: {}", e);
                std::process::exit(1);
            }
        }
    };

    let program = match parse_program(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("❌ Parse error: {}", e);
            std::process::exit(1);
        }
    };

    if program.is_empty() {
        eprintln!("❌ No instructions to execute");
        std::process::exit(1);
    }

    if !quiet {
        println!("📂 Loaded {} instructions", program.len());
        if program.len() > MEMORY_SIZE {
            println!(
                "⚠️  Program has {} words; only the first {} fit in memory",
                program.len(),
                MEMORY_SIZE
            );
        }
    }

    program
}

fn run_program(path: &str, max_cycles: u64, trace: bool, json: bool) {
    use td4::program::disassemble_word;
    use td4::Cpu;

    if !json {
        println!("🔧 Running: {}", path);
    }

    let program = load_words(path, json);

    let mut cpu = Cpu::new();
    cpu.load_program(&program);

    if !json {
        println!();
        println!("━━━ Execution ━━━");
    }

    let executed = if trace {
        let mut executed = 0u64;
        while !cpu.is_halted() && executed < max_cycles {
            let pc = cpu.regs.pc;
            let word = cpu.mem.read(pc);
            cpu.step();
            executed += 1;
            println!(
                "{:X}: {}  A={} B={} OUT={} C={}",
                pc.to_u8(),
                disassemble_word(word),
                cpu.regs.a.to_u8(),
                cpu.regs.b.to_u8(),
                cpu.regs.out.to_u8(),
                cpu.regs.carry as u8
            );
        }
        executed
    } else {
        cpu.run_limited(max_cycles)
    };

    if json {
        match serde_json::to_string_pretty(&cpu.snapshot()) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("❌ Failed to serialize state: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!();
    println!("━━━ Result ━━━");
    println!("Cycles: {}", executed);
    println!("State: {:?}", cpu.state);
    println!("A:   {} ({})", cpu.regs.a, cpu.regs.a.to_u8());
    println!("B:   {} ({})", cpu.regs.b, cpu.regs.b.to_u8());
    println!("PC:  {} ({})", cpu.regs.pc, cpu.regs.pc.to_u8());
    println!("OUT: {} ({})", cpu.regs.out, cpu.regs.out.to_u8());
    println!("Carry: {}", cpu.regs.carry as u8);

    if executed >= max_cycles {
        println!();
        println!(
            "⚠️  Reached max cycles limit ({}). Use --max-cycles to increase.",
            max_cycles
        );
    }
}

fn debug_program(path: &str) {
    println!("🔍 Loading: {}", path);

    let program = load_words(path, false);

    #[cfg(feature = "tui")]
    {
        println!("🚀 Launching simulator...");
        println!();

        if let Err(e) = td4::tui::run_simulator(program) {
            eprintln!("❌ Simulator error: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "tui"))]
    {
        let _ = program;
        eprintln!("❌ This build has no TUI (rebuild with the `tui` feature)");
        std::process::exit(1);
    }
}

fn disassemble_file(path: &str) {
    use td4::program::disassemble;

    println!("📖 Disassembling: {}", path);
    println!();

    let program = load_words(path, true);
    println!("{}", disassemble(&program));
}

fn demo_command(name: Option<&str>) {
    use td4::program::demos;

    match name {
        Some(name) => match demos::find(name) {
            Some(demo) => print!("{}", demo.source),
            None => {
                eprintln!("❌ Unknown demo '{}'", name);
                eprintln!();
                for demo in demos::DEMOS {
                    eprintln!("  {:<8} - {}", demo.name, demo.blurb);
                }
                std::process::exit(1);
            }
        },
        None => {
            println!("Built-in demo programs:");
            println!();
            for demo in demos::DEMOS {
                println!("  {:<8} - {}", demo.name, demo.blurb);
            }
            println!();
            println!("Print one with `td4-emu demo counter`,");
            println!("run one with `td4-emu run demo:counter`.");
        }
    }
}

fn demo_quickstart() {
    use td4::program::{demos, disassemble_word, parse_program};
    use td4::{Cpu, Word8};

    println!("━━━ TD4 Demo ━━━");
    println!();

    println!("Instruction words are 8 bits, opcode then immediate:");
    let word = Word8::from_u8(0b0000_0001);
    println!(
        "  {} = opcode {} + immediate {} = {}",
        word,
        word.opcode(),
        word.immediate(),
        disassemble_word(word)
    );
    println!();

    println!("First 12 steps of the counter demo:");
    let demo = demos::find("counter").unwrap();
    let program = parse_program(demo.source).unwrap();
    let mut cpu = Cpu::new();
    cpu.load_program(&program);

    for _ in 0..12 {
        let pc = cpu.regs.pc;
        let word = cpu.mem.read(pc);
        cpu.step();
        println!(
            "  {:X}: {:<9}  A={:<2} OUT={:<2} C={}",
            pc.to_u8(),
            disassemble_word(word),
            cpu.regs.a.to_u8(),
            cpu.regs.out.to_u8(),
            cpu.regs.carry as u8
        );
    }

    println!();
    println!("✓ Try `td4-emu debug demo:counter` for the interactive version");
}

fn run_self_test() {
    use td4::cpu::{encode, Instruction};
    use td4::program::{demos, parse_program};
    use td4::{Cpu, Nibble, Word8};

    println!("━━━ TD4 Emulator Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Nibble construction masks to 4 bits
    print!("Nibble masking... ");
    let mut ok = true;
    for value in 0..=255u8 {
        if Nibble::from_u8(value).to_u8() != value & 0xF {
            ok = false;
            break;
        }
    }
    if ok {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 2: 4-bit addition carry
    print!("4-bit addition carry... ");
    let wrap = Nibble::from_u8(15).overflowing_add(Nibble::from_u8(1));
    let plain = Nibble::from_u8(7).overflowing_add(Nibble::from_u8(8));
    if wrap == (Nibble::zero(), true) && plain == (Nibble::from_u8(15), false) {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 3: Instruction word nibble split
    print!("Instruction word split... ");
    let word = Word8::from_u8(0xE3);
    if word.opcode().to_u8() == 0xE && word.immediate().to_u8() == 0x3 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 4: Carry flag is sticky across non-ADD instructions
    print!("Sticky carry flag... ");
    let program: Vec<Word8> = [
        Instruction::MovA { imm: Nibble::from_u8(15) },
        Instruction::AddA { imm: Nibble::from_u8(1) },
        Instruction::MovB { imm: Nibble::from_u8(2) },
        Instruction::MovAB,
        Instruction::OutB,
    ]
    .iter()
    .map(encode)
    .collect();
    let mut cpu = Cpu::new();
    cpu.load_program(&program);
    cpu.run_limited(5);
    if cpu.regs.carry && cpu.regs.a.to_u8() == 2 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 5: JNC branches only when the carry is clear
    print!("JNC taken and not taken... ");
    let mut cpu = Cpu::new();
    cpu.load_program(&[encode(&Instruction::Jnc { addr: Nibble::from_u8(5) })]);
    cpu.run_limited(1);
    let taken = cpu.regs.pc.to_u8() == 5;

    let program: Vec<Word8> = [
        Instruction::MovA { imm: Nibble::from_u8(15) },
        Instruction::AddA { imm: Nibble::from_u8(1) },
        Instruction::Jnc { addr: Nibble::zero() },
    ]
    .iter()
    .map(encode)
    .collect();
    let mut cpu = Cpu::new();
    cpu.load_program(&program);
    cpu.run_limited(3);
    let not_taken = cpu.regs.pc.to_u8() == 3;

    if taken && not_taken {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 6: Unassigned opcode halts
    print!("Halt on unassigned opcode... ");
    let mut cpu = Cpu::new();
    cpu.load_program(&[encode(&Instruction::Unknown { opcode: Nibble::from_u8(0x8) })]);
    let kept_going = cpu.step();
    if !kept_going && cpu.is_halted() {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    // Test 7: Counter demo counts on the output port
    print!("Counter program output... ");
    let demo = demos::find("counter").unwrap();
    let program = parse_program(demo.source).unwrap();
    let mut cpu = Cpu::new();
    cpu.load_program(&program);
    cpu.run_limited(9);
    if cpu.regs.out.to_u8() == 1 && !cpu.is_halted() {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got OUT={})", cpu.regs.out.to_u8());
        failed += 1;
    }

    // Test 8: Parser rejects a 7-digit line
    print!("Parser rejects bad input... ");
    match parse_program("0011000") {
        Err(e) if e.line == 1 => {
            println!("✓");
            passed += 1;
        }
        _ => {
            println!("✗");
            failed += 1;
        }
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
