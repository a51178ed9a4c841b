use serde::{Deserialize, Serialize};

/// One hit of a documentation query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMatch {
    pub qualified_name: String,
    /// The index considers this an unambiguous canonical hit
    #[serde(default)]
    pub exact: bool,
}

impl QueryMatch {
    pub fn new(qualified_name: impl Into<String>, exact: bool) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            exact,
        }
    }

    pub fn fuzzy(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, false)
    }

    pub fn exact(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, true)
    }
}

/// Block tag of a documented element (`@param`, `@return`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    pub value: String,
}

/// A documented element as the index stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocElement {
    pub qualified_name: String,
    #[serde(default)]
    pub declaration: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<DocTag>,
}

/// An element plus the loader it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedElement {
    pub element: DocElement,
    /// Loader name or documentation base URL
    pub origin: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Declaration and summary only
    #[default]
    Short,
    /// Also the long description
    Long,
}

impl DisplayMode {
    pub fn as_word(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }

    /// `long` means long, anything else short
    pub fn from_word(word: &str) -> Self {
        if word == "long" {
            Self::Long
        } else {
            Self::Short
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplyOptions {
    pub display: DisplayMode,
    pub omit_tags: bool,
}

impl ReplyOptions {
    pub fn new(display: DisplayMode, omit_tags: bool) -> Self {
        Self { display, omit_tags }
    }
}

/// A pressable choice; `payload` is sent back as a follow-up action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub payload: String,
}

/// What the chat platform should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Element {
        element: DocElement,
        origin: String,
        options: ReplyOptions,
    },
    Choices {
        prompt: String,
        rows: Vec<Vec<Choice>>,
    },
    Preview {
        prompt: String,
        names: Vec<String>,
    },
    Notice(String),
}

impl Reply {
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice(text.into())
    }
}
