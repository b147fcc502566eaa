//! Assembly emission buffer
//!
//! Two append-only streams of rendered lines: code and data. Code
//! collects instructions as functions are lowered; data collects string
//! constants discovered along the way. Nothing is validated, removed,
//! or reordered after it is appended. The final artifact is the code
//! stream followed by the data stream.

use crate::asm::Inst;
use std::fs;
use std::io;
use std::path::Path;

/// The emission buffer for one compilation run
#[derive(Debug, Default)]
pub struct Emit {
    code: Vec<String>,
    data: Vec<String>,
}

impl Emit {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one instruction to the code stream
    pub fn emit_code(&mut self, inst: Inst) {
        self.code.push(inst.to_string());
    }

    /// Append one instruction to the data stream
    pub fn emit_data(&mut self, inst: Inst) {
        self.data.push(inst.to_string());
    }

    /// The code stream lines, in emission order
    pub fn code_lines(&self) -> &[String] {
        &self.code
    }

    /// The data stream lines, in emission order
    pub fn data_lines(&self) -> &[String] {
        &self.data
    }

    /// Render the complete program: code stream, then data stream
    pub fn program_text(&self) -> String {
        let mut text = String::new();
        for line in self.code.iter().chain(self.data.iter()) {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Write the complete program to `path`
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.program_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::DataReg;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_streams_grow_independently() {
        let mut emit = Emit::new();
        emit.emit_code(Inst::LoadImm(1, DataReg::D0));
        emit.emit_data(Inst::Label("L20".to_string()));
        emit.emit_code(Inst::Rts);

        assert_eq!(emit.code_lines().len(), 2);
        assert_eq!(emit.data_lines().len(), 1);
    }

    #[test]
    fn test_program_text_orders_code_before_data() {
        let mut emit = Emit::new();
        emit.emit_data(Inst::DefineString("hi".to_string()));
        emit.emit_code(Inst::Halt);

        assert_eq!(emit.program_text(), "\tSIMHALT\n\tDC.B\t'hi',0\n");
    }

    #[test]
    fn test_emission_order_is_preserved() {
        let mut emit = Emit::new();
        emit.emit_code(Inst::Label("a".to_string()));
        emit.emit_code(Inst::Label("b".to_string()));
        emit.emit_code(Inst::Label("c".to_string()));

        assert_eq!(emit.code_lines(), &["a:", "b:", "c:"]);
    }
}
