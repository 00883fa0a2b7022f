//! `#include` index for the exported glyph set.
//!
//! The firmware builds its lookup table from the X-macro:
//!
//! ```c
//! #define X(s, id) glyphs[s] = {id##_bits, id##_width, id##_height};
//! HANGEUL_GLYPHS(X)
//! #undef X
//! ```

use std::fmt::Write as _;

use crate::{config::SOURCE_EXTENSION, export::ExportedGlyph};

pub const COUNT_MACRO: &str = "HANGEUL_GLYPH_COUNT";
pub const LIST_MACRO: &str = "HANGEUL_GLYPHS";

pub fn index_header(glyphs: &[ExportedGlyph]) -> String {
    let mut out = String::new();

    out.push_str("// Generated by hangeul-glyphs. Do not edit.\n");
    out.push_str("#pragma once\n\n");

    for glyph in glyphs {
        let _ = writeln!(out, "#include \"{}.{SOURCE_EXTENSION}\"", glyph.identifier);
    }

    let _ = writeln!(out, "\n#define {COUNT_MACRO} {}\n", glyphs.len());
    let _ = writeln!(out, "#define {LIST_MACRO}(X) \\");
    for glyph in glyphs {
        let literal = c_string_literal(glyph.character);
        let _ = writeln!(out, "  X({literal}, {}) \\", glyph.identifier);
    }
    // Terminates the line continuation above.
    out.push('\n');

    out
}

/// Quotes `character` for C. Non-ASCII text stays raw UTF-8.
fn c_string_literal(character: char) -> String {
    let mut out = String::from('"');
    match character {
        '"' | '\\' => {
            out.push('\\');
            out.push(character);
        }
        // Octal escapes stop after three digits, unlike `\x`.
        c if c.is_ascii_control() => {
            let _ = write!(out, "\\{:03o}", u32::from(c));
        }
        c => out.push(c),
    }
    out.push('"');
    out
}
