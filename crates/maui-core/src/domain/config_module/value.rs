//! In-memory model of an evaluated configuration literal.

use indexmap::IndexMap;

/// Ordered map of config keys. Insertion order drives output order.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A value recovered from an object literal.
///
/// Everything is plain data except [`ConfigValue::Call`], which stands in for
/// a recognised helper call whose real value depends on the workspace.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
    Array(Vec<ConfigValue>),
    Object(ConfigMap),
    Call(PlaceholderCall),
}

impl ConfigValue {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Scalars are rendered inline by the serializer.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::Number(_) | Self::Bool(_) | Self::Null
        )
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<PlaceholderCall> for ConfigValue {
    fn from(call: PlaceholderCall) -> Self {
        Self::Call(call)
    }
}

/// A recognised call expression carried through verbatim.
///
/// `arguments` is the exact source text between the parentheses (trimmed),
/// so `join(__dirname, 'src/**/*.ts')` re-emits byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderCall {
    pub callee: String,
    pub arguments: String,
    /// Written as `...callee(args)` inside an array.
    pub spread: bool,
}

impl PlaceholderCall {
    pub fn new(callee: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            callee: callee.into(),
            arguments: arguments.into(),
            spread: false,
        }
    }

    pub fn spread(mut self) -> Self {
        self.spread = true;
        self
    }

    /// The call as it appears in source.
    pub fn call_text(&self) -> String {
        let prefix = if self.spread { "..." } else { "" };
        format!("{prefix}{}({})", self.callee, self.arguments)
    }
}

/// Callee names the evaluator captures instead of rejecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownCallables {
    names: Vec<String>,
}

impl KnownCallables {
    pub const DEFAULT: [&'static str; 4] = [
        "createGlobPatternsForDependencies",
        "join",
        "path.join",
        "require",
    ];

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, callee: &str) -> bool {
        self.names.iter().any(|n| n == callee)
    }
}

impl Default for KnownCallables {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}
