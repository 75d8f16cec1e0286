//! Implementation of `utk-build --show-config`.

use std::fmt::Write;

use crate::core::platform::{Generator, PlatformId};
use crate::core::Document;

fn mark(b: bool) -> char {
    if b {
        '✓'
    } else {
        '✗'
    }
}

/// Render the document for humans. `host` is what `auto` resolves to here and
/// `generator` is the advisory default for it.
pub fn render(doc: &Document, host: &PlatformId, generator: Generator) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Build configuration:");
    let _ = writeln!(out, "  platform:   {} (detected: {})", doc.platform, host);
    let _ = writeln!(out, "  build type: {}", doc.build_type);
    let _ = writeln!(
        out,
        "  generator:  {} (CMake default unless --generator is given)",
        generator
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Modules:");
    if doc.modules.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (name, module) in &doc.modules {
        let _ = writeln!(
            out,
            "  {}: {} (tests: {}, examples: {})",
            name,
            mark(module.enabled),
            mark(module.tests),
            mark(module.examples)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Third-party libraries:");
    if doc.third_party.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (name, dep) in &doc.third_party {
        let _ = writeln!(out, "  {}: {}", name, mark(dep.enabled));
    }

    out
}
