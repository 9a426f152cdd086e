//! Generated identifier names.
//!
//! Source identifiers are Arabic, so every entity is renamed before it reaches
//! the output. A [`NamingOracle`] proposes a readable candidate for an original
//! name; the [`NameTable`] sanitizes it, falls back to `var_N` and keeps every
//! entity's name unique.

use crate::compiler::entity::EntityId;
use crate::compiler::error::CompileError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

/// Proposes a target-language name for an original identifier.
///
/// Returning `None` is never an error: the caller falls back to a counter.
pub trait NamingOracle {
    fn name_for(&mut self, original: &str) -> Option<String>;
}

/// Never proposes anything, so every name comes from the counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOracle;

impl NamingOracle for NoOracle {
    fn name_for(&mut self, _original: &str) -> Option<String> {
        None
    }
}

/// Looks names up in a fixed table, typically loaded from a TOML file:
///
/// ```toml
/// [names]
/// "عدد" = "number"
/// ```
#[derive(Debug, Default, Clone)]
pub struct DictionaryOracle {
    names: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    names: HashMap<String, String>,
}

impl DictionaryOracle {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: DictionaryFile = toml::from_str(content)?;
        Ok(Self::new(file.names))
    }

    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| CompileError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NamingOracle for DictionaryOracle {
    fn name_for(&mut self, original: &str) -> Option<String> {
        self.names.get(original).cloned()
    }
}

/// Asks an external program, e.g. a translation client, for each name.
///
/// The program is run with the original identifier appended to `argv`; the
/// first line of its standard output is the candidate. Failures, non-zero
/// exits and lookups slower than the timeout all yield `None`.
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    runtime: tokio::runtime::Runtime,
}

impl CommandOracle {
    pub fn new(argv: Vec<String>, timeout: Duration) -> Result<Self, CompileError> {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .ok_or_else(|| CompileError::Config("namer command is empty".to_string()))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CompileError::Config(format!("cannot start namer runtime: {}", e)))?;

        Ok(Self {
            program,
            args: argv.collect(),
            timeout,
            runtime,
        })
    }

    async fn lookup(&self, original: &str) -> Option<String> {
        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.args)
            .arg(original)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::warn!(program = %self.program, error = %e, "namer command failed");
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    program = %self.program,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "namer command timed out"
                );
                return None;
            }
        };

        if !output.status.success() {
            tracing::warn!(program = %self.program, status = %output.status, "namer command failed");
            return None;
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
    }
}

impl NamingOracle for CommandOracle {
    fn name_for(&mut self, original: &str) -> Option<String> {
        self.runtime.block_on(self.lookup(original))
    }
}

/// Turns a proposed name into a safe identifier, or rejects it.
///
/// The result is lower-case ASCII made of letters, digits and `_`, and does
/// not start with a digit. Whitespace and `-` become `_`.
pub fn sanitize(candidate: &str) -> Option<String> {
    let mut name = String::new();

    for ch in candidate.trim().chars() {
        match ch.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9' | '_') => name.push(c),
            c if c.is_whitespace() || c == '-' => name.push('_'),
            _ => return None,
        }
    }

    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(name)
}

/// Words a generated name must never be.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "console", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in", "instanceof", "interface",
    "let", "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// Name allocation for one generator pass.
pub struct NameTable {
    oracle: Box<dyn NamingOracle>,
    /// original text -> candidate; each original is proposed at most once
    candidates: HashMap<String, String>,
    counter: usize,
    entities: HashMap<EntityId, String>,
    used: HashSet<String>,
    fields: HashMap<String, String>,
    used_fields: HashSet<String>,
}

impl NameTable {
    pub fn new(oracle: Box<dyn NamingOracle>) -> Self {
        Self {
            oracle,
            candidates: HashMap::new(),
            counter: 0,
            entities: HashMap::new(),
            used: RESERVED.iter().map(|word| word.to_string()).collect(),
            fields: HashMap::new(),
            used_fields: HashSet::new(),
        }
    }

    /// The generated name of an entity; the same entity always gets the same name.
    pub fn entity(&mut self, id: EntityId, original: &str) -> String {
        if let Some(name) = self.entities.get(&id) {
            return name.clone();
        }

        let candidate = self.candidate(original);
        let name = unique(&candidate, &mut self.used);
        tracing::debug!(original, entity = %id, name = %name, "allocated name");

        self.entities.insert(id, name.clone());
        name
    }

    /// The generated name of a field; fields are keyed by their original text.
    pub fn field(&mut self, original: &str) -> String {
        if let Some(name) = self.fields.get(original) {
            return name.clone();
        }

        let candidate = self.candidate(original);
        let name = unique(&candidate, &mut self.used_fields);
        tracing::debug!(original, name = %name, "allocated field name");

        self.fields.insert(original.to_string(), name.clone());
        name
    }

    fn candidate(&mut self, original: &str) -> String {
        if let Some(candidate) = self.candidates.get(original) {
            return candidate.clone();
        }

        let proposed = self.oracle.name_for(original);
        let candidate = match proposed.as_deref().and_then(sanitize) {
            Some(candidate) => candidate,
            None => {
                if let Some(rejected) = &proposed {
                    tracing::debug!(original, rejected = %rejected, "discarded unusable name");
                }
                self.counter += 1;
                format!("var_{}", self.counter)
            }
        };

        self.candidates
            .insert(original.to_string(), candidate.clone());
        candidate
    }
}

/// `base`, or the first of `base_1`, `base_2`, ... not in `used`; marks it used.
fn unique(base: &str, used: &mut HashSet<String>) -> String {
    let mut name = base.to_string();
    let mut suffix = 0;
    while used.contains(&name) {
        suffix += 1;
        name = format!("{}_{}", base, suffix);
    }
    used.insert(name.clone());
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dictionary(pairs: &[(&str, &str)]) -> Box<dyn NamingOracle> {
        Box::new(DictionaryOracle::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    /// Counts how often each original is proposed.
    struct Counting(Rc<RefCell<HashMap<String, usize>>>);

    impl NamingOracle for Counting {
        fn name_for(&mut self, original: &str) -> Option<String> {
            *self.0.borrow_mut().entry(original.to_string()).or_default() += 1;
            None
        }
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Number"), Some("number".to_string()));
        assert_eq!(sanitize(" count down "), Some("count_down".to_string()));
        assert_eq!(sanitize("blast-off"), Some("blast_off".to_string()));
        assert_eq!(sanitize("3d"), None);
        assert_eq!(sanitize("عدد"), None);
        assert_eq!(sanitize("it's"), None);
        assert_eq!(sanitize(""), None);
    }

    #[test]
    fn test_counter_fallback_and_suffixes() {
        let mut table = NameTable::new(dictionary(&[("عدد", "number"), ("رقم", "Number")]));
        let names: Vec<String> = ["عدد", "ت", "م", "رقم", "ة"]
            .iter()
            .enumerate()
            .map(|(i, original)| table.entity(EntityId(i as u32), original))
            .collect();
        assert_eq!(names, vec!["number", "var_1", "var_2", "number_1", "var_3"]);
    }

    #[test]
    fn test_same_entity_same_name() {
        let mut table = NameTable::new(Box::new(NoOracle));
        let first = table.entity(EntityId(0), "س");
        assert_eq!(table.entity(EntityId(0), "س"), first);
    }

    #[test]
    fn test_distinct_entities_with_same_original_get_distinct_names() {
        let mut table = NameTable::new(Box::new(NoOracle));
        let a = table.entity(EntityId(0), "x");
        let b = table.entity(EntityId(1), "x");
        assert_eq!(a, "var_1");
        assert_eq!(b, "var_1_1");
    }

    #[test]
    fn test_reserved_words_are_suffixed() {
        let mut table = NameTable::new(dictionary(&[("تبديل_", "switch"), ("وحدة", "console")]));
        assert_eq!(table.entity(EntityId(0), "تبديل_"), "switch_1");
        assert_eq!(table.entity(EntityId(1), "وحدة"), "console_1");
    }

    #[test]
    fn test_fields_have_their_own_namespace() {
        let mut table = NameTable::new(dictionary(&[("اسم", "noun")]));
        assert_eq!(table.entity(EntityId(0), "اسم"), "noun");
        assert_eq!(table.field("اسم"), "noun");
        assert_eq!(table.field("اسم"), "noun");
    }

    #[test]
    fn test_oracle_queried_once_per_original() {
        let calls = Rc::new(RefCell::new(HashMap::new()));
        let mut table = NameTable::new(Box::new(Counting(Rc::clone(&calls))));
        table.entity(EntityId(0), "س");
        table.entity(EntityId(1), "س");
        table.field("س");
        table.entity(EntityId(2), "ص");

        let calls = calls.borrow();
        assert_eq!(calls.get("س"), Some(&1));
        assert_eq!(calls.get("ص"), Some(&1));
    }

    #[test]
    fn test_dictionary_from_toml() {
        let oracle = DictionaryOracle::from_toml_str("[names]\n\"عدد\" = \"number\"\n").unwrap();
        assert_eq!(oracle.len(), 1);
        let mut oracle = oracle;
        assert_eq!(oracle.name_for("عدد"), Some("number".to_string()));
        assert_eq!(oracle.name_for("غير"), None);
    }

    #[test]
    fn test_dictionary_rejects_bad_toml() {
        assert!(DictionaryOracle::from_toml_str("[names\n").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_oracle() {
        let argv = ["sh", "-c", "echo Count Down", "sh"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut oracle = CommandOracle::new(argv, Duration::from_secs(5)).unwrap();
        assert_eq!(oracle.name_for("عدد"), Some("Count Down".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_oracle_receives_original() {
        let argv = ["sh", "-c", "echo \"$1\"", "sh"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut oracle = CommandOracle::new(argv, Duration::from_secs(5)).unwrap();
        assert_eq!(oracle.name_for("hello"), Some("hello".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_oracle_failures_fall_back() {
        let argv = |script: &str| {
            vec![
                "sh".to_string(),
                "-c".to_string(),
                script.to_string(),
                "sh".to_string(),
            ]
        };

        let mut failing = CommandOracle::new(argv("exit 3"), Duration::from_secs(5)).unwrap();
        assert_eq!(failing.name_for("س"), None);

        let mut slow = CommandOracle::new(argv("sleep 5"), Duration::from_millis(50)).unwrap();
        assert_eq!(slow.name_for("س"), None);

        let mut missing = CommandOracle::new(
            vec!["arabscript-no-such-namer".to_string()],
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(missing.name_for("س"), None);
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(CommandOracle::new(Vec::new(), Duration::from_secs(1)).is_err());
    }
}
