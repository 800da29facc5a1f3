//! Demo-indicator and exclusion pattern tables
//!
//! Built-in tables are compiled once per process. User exclusion patterns
//! come from a line-oriented text file that is re-read on every load so an
//! edited list takes effect on the next operation.

use once_cell::sync::Lazy;
use fancy_regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name fragments that suggest a resource group was created for a demo,
/// a test or an event.
const DEMO_SOURCES: &[&str] = &[
    "demo",
    "test",
    "temp",
    "tmp",
    "scratch",
    "playground",
    "sandbox",
    "trial",
    "poc",
    "prototype",
    "experiment",
    "ignite",
    "build",
    "msbuild",
    "reinvent",
    "summit",
    "conference",
    "workshop",
    "hackathon",
    "meetup",
    "devday",
    "techready",
    "teched",
    "connect",
    "evolve",
    "inspire",
    "orlando",
    "seattle",
    "vegas",
    "austin",
    "chicago",
    "boston",
    "atlanta",
    "denver",
    "portland",
    "sanfrancisco",
    "losangeles",
    "newyork",
    "london",
    "paris",
    "berlin",
    "sydney",
    "singapore",
    "tokyo",
    "amsterdam",
];

/// Provider-managed or sensitive resource groups that are never deletable.
const BUILTIN_EXCLUDE_SOURCES: &[&str] = &[
    "^DefaultResourceGroup",
    "^NetworkWatcherRG$",
    "^cloud-shell-storage-",
    "_managed$",
    "^MC_",
    "^AzureBackupRG_",
    "^databricks-rg-",
];

pub static DEMO_PATTERNS: Lazy<Vec<PatternRule>> =
    Lazy::new(|| compile_builtin(DEMO_SOURCES, PatternKind::Demo));

pub static BUILTIN_EXCLUDE_PATTERNS: Lazy<Vec<PatternRule>> =
    Lazy::new(|| compile_builtin(BUILTIN_EXCLUDE_SOURCES, PatternKind::Exclude));

fn compile_builtin(sources: &[&str], kind: PatternKind) -> Vec<PatternRule> {
    sources
        .iter()
        .map(|source| {
            PatternRule::compile(source, kind).expect("built-in pattern must be a valid regex")
        })
        .collect()
}

/// What a rule classifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Demo,
    Exclude,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::Demo => write!(f, "demo"),
            PatternKind::Exclude => write!(f, "exclude"),
        }
    }
}

/// A case-insensitive regex rule together with its original text
///
/// Lookaround and backreferences are supported so lists written for
/// JavaScript regexes keep working.
#[derive(Debug, Clone)]
pub struct PatternRule {
    source: String,
    kind: PatternKind,
    regex: Regex,
}

impl PatternRule {
    pub fn compile(source: &str, kind: PatternKind) -> Result<Self, fancy_regex::Error> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Self {
            source: source.to_string(),
            kind,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Unanchored search, so plain words match anywhere in the name
    ///
    /// A match that exceeds the backtracking limit counts as a match for
    /// exclusion rules and as no match for demo rules.
    pub fn is_match(&self, name: &str) -> bool {
        match self.regex.is_match(name) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!("Pattern {:?} failed on {:?}: {}", self.source, name, e);
                self.kind == PatternKind::Exclude
            }
        }
    }

    /// Source with escaping backslashes removed, for diagnostics
    pub fn display_source(&self) -> String {
        self.source.replace('\\', "")
    }
}

/// Exclusion rules active for one engine operation
///
/// Built-ins come first, user rules are appended. Order never changes the
/// outcome because matching is an OR over every rule.
#[derive(Debug, Clone)]
pub struct PatternSet {
    exclude: Vec<PatternRule>,
    user_count: usize,
}

impl PatternSet {
    /// Only the built-in exclusion rules
    pub fn builtin() -> Self {
        Self {
            exclude: BUILTIN_EXCLUDE_PATTERNS.clone(),
            user_count: 0,
        }
    }

    /// Built-ins plus every user line that compiles; invalid lines are dropped
    pub fn with_user_patterns<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::builtin();
        for line in lines {
            let line = line.as_ref();
            match PatternRule::compile(line, PatternKind::Exclude) {
                Ok(rule) => {
                    set.exclude.push(rule);
                    set.user_count += 1;
                }
                Err(e) => {
                    tracing::warn!("Ignoring invalid exclusion pattern {:?}: {}", line, e);
                }
            }
        }
        set
    }

    /// Parse the contents of an exclusion list file
    pub fn from_list_text(content: &str) -> Self {
        Self::with_user_patterns(parse_exclusion_lines(content))
    }

    pub fn exclusion_rules(&self) -> &[PatternRule] {
        &self.exclude
    }

    /// Number of user-supplied rules that compiled
    pub fn user_rule_count(&self) -> usize {
        self.user_count
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Candidate pattern lines: trimmed, without blanks and `#` comments
pub fn parse_exclusion_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// The user-maintained exclusion list on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionList {
    path: PathBuf,
}

impl ExclusionList {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pattern lines as written in the file, including ones that will not
    /// compile. A missing or unreadable file yields no lines.
    pub async fn read_lines(&self) -> Vec<String> {
        if !self.path.exists() {
            tracing::debug!("Exclusion list not found: {}", self.path.display());
            return Vec::new();
        }

        match fs::read_to_string(&self.path).await {
            Ok(content) => parse_exclusion_lines(&content),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable exclusion list {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Built-in rules plus the file's valid rules, read fresh on every call
    pub async fn load(&self) -> PatternSet {
        let lines = self.read_lines().await;
        let set = PatternSet::with_user_patterns(&lines);
        tracing::debug!(
            "Loaded {} exclusion rules ({} from {})",
            set.exclusion_rules().len(),
            set.user_rule_count(),
            self.path.display()
        );
        set
    }
}
