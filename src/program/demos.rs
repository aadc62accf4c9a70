//! Built-in example programs.
//!
//! Small programs in the binary text format, ready to run with
//! `td4-emu run demo:<name>` or to load in the TUI. They double as
//! living documentation of the instruction set.

/// A named example program.
#[derive(Debug, Clone, Copy)]
pub struct Demo {
    /// Name used to select the demo on the command line.
    pub name: &'static str,
    /// One-line description.
    pub blurb: &'static str,
    /// Program text in the binary line syntax.
    pub source: &'static str,
}

/// All built-in demos.
pub const DEMOS: &[Demo] = &[
    Demo {
        name: "counter",
        blurb: "count up on the output port, one per loop",
        source: "\
// Copy A to the output port, then increment it.
// The output runs 0, 1, 2, ... and wraps past 15.
0011 0000  // MOV A, 0
0100 0000  // MOV B, A
1001 0000  // OUT B
0000 0001  // ADD A, 1
1111 0001  // JMP 1
",
    },
    Demo {
        name: "blink",
        blurb: "toggle the output port between 0000 and 1111",
        source: "\
// Alternate the output between all-off and all-on.
1011 0000  // OUT 0
1011 1111  // OUT 15
1111 0000  // JMP 0
",
    },
    Demo {
        name: "ramp",
        blurb: "climbing output value, one step every other loop",
        source: "\
// Walk the output upwards using B as the loop variable.
0011 0001  // MOV A, 1
0100 0000  // MOV B, A
1001 0000  // OUT B
0001 0000  // MOV A, B
0000 0001  // ADD A, 1
0100 0000  // MOV B, A
1001 0000  // OUT B
1111 0010  // JMP 2
",
    },
    Demo {
        name: "carry",
        blurb: "count to 16 in a JNC loop, then hold 15 on the port",
        source: "\
// ADD is the only instruction that writes the carry flag, and JNC
// loops until the 16th increment overflows register A.
0000 0001  // ADD A, 1
1110 0000  // JNC 0
1011 1111  // OUT 15
1111 0010  // JMP 2
",
    },
];

/// Look up a demo by name.
pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::{Cpu, MEMORY_SIZE};
    use crate::program::parse_program;

    #[test]
    fn test_every_demo_parses_and_fits_in_memory() {
        for demo in DEMOS {
            let program = parse_program(demo.source)
                .unwrap_or_else(|e| panic!("demo `{}` does not parse: {}", demo.name, e));
            assert!(!program.is_empty(), "demo `{}` is empty", demo.name);
            assert!(
                program.len() <= MEMORY_SIZE,
                "demo `{}` does not fit in memory",
                demo.name
            );
        }
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(find("counter").map(|d| d.name), Some("counter"));
        assert!(find("no-such-demo").is_none());
    }

    #[test]
    fn test_counter_demo_counts() {
        let program = parse_program(find("counter").unwrap().source).unwrap();
        let mut cpu = Cpu::new();
        cpu.load_program(&program);
        cpu.run_limited(9);
        assert_eq!(cpu.regs.out.to_u8(), 1);
        cpu.run_limited(4);
        assert_eq!(cpu.regs.out.to_u8(), 2);
    }

    #[test]
    fn test_blink_demo_alternates_output() {
        let program = parse_program(find("blink").unwrap().source).unwrap();
        let mut cpu = Cpu::new();
        cpu.load_program(&program);
        cpu.run_limited(1);
        assert_eq!(cpu.regs.out.to_u8(), 0);
        cpu.run_limited(1);
        assert_eq!(cpu.regs.out.to_u8(), 15);
        cpu.run_limited(2);
        assert_eq!(cpu.regs.out.to_u8(), 0);
    }

    #[test]
    fn test_carry_demo_finishes_on_the_overflow() {
        let program = parse_program(find("carry").unwrap().source).unwrap();
        let mut cpu = Cpu::new();
        cpu.load_program(&program);
        // 16 ADD/JNC pairs, then the OUT after the loop falls through
        cpu.run_limited(33);
        assert_eq!(cpu.regs.out.to_u8(), 15);
        assert!(cpu.regs.carry);
        assert!(!cpu.is_halted());
    }
}
