use super::Host;
use crate::targets::TargetRegistry;
use std::io::Write;

/// Print the names of the available targets, one per line
pub fn list_targets<H: Host>(host: &mut H) {
    for name in TargetRegistry::builtin().names() {
        let _ = writeln!(host.output(), "{name}");
    }
}
