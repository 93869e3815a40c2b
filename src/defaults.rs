use std::collections::HashSet;
use std::fmt;

/// The closed set of configuration areas that `finalize` back-fills when the
/// caller has not touched them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultCategory {
    Plugins,
    IgnoreWatch,
    Entry,
    PathAlias,
    Rules,
    Fallbacks,
    SassRule,
    LessRule,
    JsRule,
    FileUrlRule,
}

impl DefaultCategory {
    /// Fixed order in which unapplied defaults are populated.
    pub const ORDER: [DefaultCategory; 10] = [
        DefaultCategory::Plugins,
        DefaultCategory::IgnoreWatch,
        DefaultCategory::Entry,
        DefaultCategory::PathAlias,
        DefaultCategory::Rules,
        DefaultCategory::Fallbacks,
        DefaultCategory::SassRule,
        DefaultCategory::LessRule,
        DefaultCategory::JsRule,
        DefaultCategory::FileUrlRule,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DefaultCategory::Plugins => "plugins",
            DefaultCategory::IgnoreWatch => "ignore-watch",
            DefaultCategory::Entry => "entry",
            DefaultCategory::PathAlias => "path-alias",
            DefaultCategory::Rules => "default-rules",
            DefaultCategory::Fallbacks => "fallbacks",
            DefaultCategory::SassRule => "sass-rule",
            DefaultCategory::LessRule => "less-rule",
            DefaultCategory::JsRule => "js-rule",
            DefaultCategory::FileUrlRule => "file-url-rule",
        }
    }
}

impl fmt::Display for DefaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-session registry of which default categories have been applied.
///
/// Each session owns exactly one registry; it is never shared across
/// sessions.
#[derive(Debug, Default)]
pub struct DefaultRegistry {
    applied: HashSet<DefaultCategory>,
}

impl DefaultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a category as applied. Returns `false` if it was already
    /// marked; re-marking never changes the registry.
    pub fn mark(&mut self, category: DefaultCategory) -> bool {
        self.applied.insert(category)
    }

    pub fn is_applied(&self, category: DefaultCategory) -> bool {
        self.applied.contains(&category)
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}
