//! Name classification against the pattern tables

use crate::pattern::{DEMO_PATTERNS, PatternSet};

/// True when any built-in demo-indicator rule matches the name
pub fn is_demo(name: &str) -> bool {
    DEMO_PATTERNS.iter().any(|p| p.is_match(name))
}

/// True when any rule of the loaded exclusion set matches the name
pub fn is_excluded(name: &str, patterns: &PatternSet) -> bool {
    patterns.exclusion_rules().iter().any(|p| p.is_match(name))
}

/// Display text of every demo rule that matches the name
pub fn matched_demo_patterns(name: &str) -> Vec<String> {
    DEMO_PATTERNS
        .iter()
        .filter(|p| p.is_match(name))
        .map(|p| p.display_source())
        .collect()
}
