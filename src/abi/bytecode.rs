//! EVM bytecode scanning.

const PUSH0: u8 = 0x5f;
const PUSH1: u8 = 0x60;
const PUSH2: u8 = 0x61;
const PUSH4: u8 = 0x63;
const PUSH32: u8 = 0x7f;
const EQ: u8 = 0x14;
const JUMPI: u8 = 0x57;

/// A decoded instruction; `operand` is empty for non-PUSH opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub opcode: u8,
    pub operand: &'a [u8],
}

/// Split bytecode into instructions, skipping PUSH operands.
///
/// A PUSH truncated by the end of the code keeps the bytes that remain.
pub fn disassemble(code: &[u8]) -> Vec<Instruction<'_>> {
    let mut instructions = Vec::new();
    let mut pc = 0;

    while pc < code.len() {
        let opcode = code[pc];
        pc += 1;

        let size = if (PUSH1..=PUSH32).contains(&opcode) { (opcode - PUSH0) as usize } else { 0 };
        let end = (pc + size).min(code.len());
        instructions.push(Instruction { opcode, operand: &code[pc..end] });
        pc = end;
    }

    instructions
}

/// Collect function selectors from a dispatcher.
///
/// Matches the `PUSH4 <selector>, EQ, PUSH2 <dest>, JUMPI` sequence emitted by
/// Solidity. Selectors are `0x`-prefixed lowercase hex, in order of first
/// appearance, without duplicates.
pub fn selectors_from_bytecode(code: &[u8]) -> Vec<String> {
    let instructions = disassemble(code);
    let mut selectors: Vec<String> = Vec::new();

    for window in instructions.windows(4) {
        let shape = [window[0].opcode, window[1].opcode, window[2].opcode, window[3].opcode];
        if shape == [PUSH4, EQ, PUSH2, JUMPI] && window[0].operand.len() == 4 {
            let selector = format!("0x{}", alloy::hex::encode(window[0].operand));
            if !selectors.contains(&selector) {
                selectors.push(selector);
            }
        }
    }

    selectors
}
