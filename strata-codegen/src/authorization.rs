//! Authorization rule compiler.

use strata_ir::{AccessTable, AuthRule};

/// Compile an ordered rule list into a per-operation access table.
///
/// Every operation starts with no allowed principal modes. Each rule adds
/// its principal mode to the operations it covers, so the result does not
/// depend on rule order and repeated rules change nothing.
pub fn compile(rules: &[AuthRule]) -> AccessTable {
    let mut table = AccessTable::deny_all();
    for rule in rules {
        for operation in rule.covered() {
            table.grant(operation, rule.principal.clone());
        }
    }
    table
}
