//! Stack frame layout
//!
//! Maps every parameter and local of the current function to its byte
//! offset from the frame pointer (A6). Every symbol occupies one
//! 4-byte word. The frame, as the prolog and the call sequence build
//! it, looks like this (offsets from A6):
//!
//! ```text
//!   +12  second parameter        (pushed by the caller)
//!    +8  first parameter         (leftmost argument, nearest the top)
//!    +4  return address          (pushed by BSR)
//!     0  saved caller FP         (pushed by the prolog)
//!    -4  first local             (reserved by the prolog)
//!    -8  second local
//! ```
//!
//! Offset 0 is the saved frame pointer itself, so no symbol ever lands
//! there; a name without an entry surfaces as a typed error rather than
//! a reserved sentinel offset.

use crate::CodegenError;
use scc_frontend::Function;
use std::collections::{HashMap, HashSet};

/// Bytes per stack slot: every SubC value is one longword
pub const WORD_BYTES: i32 = 4;

/// Offset of the first (leftmost) parameter, past the saved FP and the
/// return address
const PARAM_BASE: i32 = 2 * WORD_BYTES;

/// Built-in I/O routines, callable without a declared definition
const INTRINSICS: [&str; 3] = ["sayn", "sayl", "says"];

/// What kind of symbol occupies a frame slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Param,
    Local,
}

/// One frame slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub offset: i32,
    pub kind: SymbolKind,
}

/// Frame layout table for the function currently being lowered
///
/// Slots are rebuilt from scratch for each function; the intrinsic set
/// is seeded once per run and survives rebuilds.
#[derive(Debug, Default)]
pub struct Layout {
    slots: HashMap<(String, String), Slot>,
    frame_bytes: i32,
    intrinsics: HashSet<String>,
}

impl Layout {
    /// Create an empty layout table
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute offsets for every parameter and local of `fun`,
    /// replacing the previous function's entries
    pub fn build(&mut self, fun: &Function) {
        self.slots.clear();

        for (index, param) in fun.params.iter().enumerate() {
            self.slots.insert(
                (fun.name.clone(), param.clone()),
                Slot {
                    offset: PARAM_BASE + WORD_BYTES * index as i32,
                    kind: SymbolKind::Param,
                },
            );
        }

        for (index, local) in fun.locals.iter().enumerate() {
            self.slots.insert(
                (fun.name.clone(), local.clone()),
                Slot {
                    offset: -WORD_BYTES * (index as i32 + 1),
                    kind: SymbolKind::Local,
                },
            );
        }

        self.frame_bytes = WORD_BYTES * fun.locals.len() as i32;
    }

    /// Look up the slot of `symbol` inside `function`
    pub fn lookup(&self, function: &str, symbol: &str) -> Result<Slot, CodegenError> {
        self.slots
            .get(&(function.to_string(), symbol.to_string()))
            .copied()
            .ok_or_else(|| CodegenError::UnknownSymbol {
                function: function.to_string(),
                symbol: symbol.to_string(),
            })
    }

    /// Total bytes of local-variable space in the current frame
    pub fn frame_bytes(&self) -> i32 {
        self.frame_bytes
    }

    /// Register the built-in I/O routines (`sayn`, `sayl`, `says`) so
    /// calls to them resolve like calls to any other function, without
    /// needing declared frames
    pub fn seed_intrinsics(&mut self) {
        for name in INTRINSICS {
            self.intrinsics.insert(name.to_string());
        }
    }

    /// True if `name` is a seeded built-in routine
    pub fn is_intrinsic(&self, name: &str) -> bool {
        self.intrinsics.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_function() -> Function {
        Function {
            name: "add2".to_string(),
            params: vec!["a".to_string(), "b".to_string()],
            locals: vec!["s".to_string(), "t".to_string()],
            body: Vec::new(),
        }
    }

    #[test]
    fn test_params_positive_locals_negative() {
        let mut layout = Layout::new();
        layout.build(&sample_function());

        assert_eq!(
            layout.lookup("add2", "a").unwrap(),
            Slot {
                offset: 8,
                kind: SymbolKind::Param
            }
        );
        assert_eq!(
            layout.lookup("add2", "b").unwrap(),
            Slot {
                offset: 12,
                kind: SymbolKind::Param
            }
        );
        assert_eq!(
            layout.lookup("add2", "s").unwrap(),
            Slot {
                offset: -4,
                kind: SymbolKind::Local
            }
        );
        assert_eq!(
            layout.lookup("add2", "t").unwrap(),
            Slot {
                offset: -8,
                kind: SymbolKind::Local
            }
        );
    }

    #[test]
    fn test_offsets_unique_and_nonzero() {
        let mut layout = Layout::new();
        let fun = Function {
            name: "f".to_string(),
            params: (0..5).map(|i| format!("p{i}")).collect(),
            locals: (0..5).map(|i| format!("v{i}")).collect(),
            body: Vec::new(),
        };
        layout.build(&fun);

        let mut offsets = Vec::new();
        for name in fun.params.iter().chain(fun.locals.iter()) {
            let slot = layout.lookup("f", name).unwrap();
            assert_ne!(slot.offset, 0);
            offsets.push(slot.offset);
        }

        offsets.sort_unstable();
        offsets.dedup();
        assert_eq!(offsets.len(), 10);
    }

    #[test]
    fn test_unknown_symbol_reports_function_and_name() {
        let mut layout = Layout::new();
        layout.build(&sample_function());

        let err = layout.lookup("add2", "z").unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnknownSymbol {
                function: "add2".to_string(),
                symbol: "z".to_string(),
            }
        );
        let message = err.to_string();
        assert!(message.contains("add2"));
        assert!(message.contains('z'));
    }

    #[test]
    fn test_build_replaces_previous_function() {
        let mut layout = Layout::new();
        layout.build(&sample_function());

        let next = Function {
            name: "main".to_string(),
            params: Vec::new(),
            locals: vec!["mx".to_string()],
            body: Vec::new(),
        };
        layout.build(&next);

        assert!(layout.lookup("add2", "a").is_err());
        assert_eq!(layout.lookup("main", "mx").unwrap().offset, -4);
        assert_eq!(layout.frame_bytes(), 4);
    }

    #[test]
    fn test_intrinsics_survive_rebuilds() {
        let mut layout = Layout::new();
        layout.seed_intrinsics();
        layout.build(&sample_function());

        assert!(layout.is_intrinsic("sayn"));
        assert!(layout.is_intrinsic("sayl"));
        assert!(layout.is_intrinsic("says"));
        assert!(!layout.is_intrinsic("add2"));
    }

    #[test]
    fn test_frame_bytes_counts_locals_only() {
        let mut layout = Layout::new();
        layout.build(&sample_function());
        assert_eq!(layout.frame_bytes(), 8);
    }
}
