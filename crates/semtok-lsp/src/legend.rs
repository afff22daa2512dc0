//! Legend resolution: numeric token type codes → semantic categories.
//!
//! A server may advertise a legend (an ordered list of token type names) in its
//! `initialize` capabilities. When one is present, type codes index into it and the name
//! decides the category. When none is present - or a code falls outside the legend - a
//! fixed numeric table from the legacy fixed-code scheme applies. Resolution is total:
//! every code yields a category or `None` (unclassified, dropped before output); a
//! malformed or evolving payload must never abort highlighting.

use semtok_core::SemanticCategory;
use serde_json::Value;

/// Category for an advertised legend name. Unknown names are unclassified.
fn category_for_name(name: &str) -> Option<SemanticCategory> {
    match name {
        "variable" => Some(SemanticCategory::Variable),
        "parameter" => Some(SemanticCategory::Parameter),
        "function" => Some(SemanticCategory::Function),
        "property" => Some(SemanticCategory::Field),
        "class" => Some(SemanticCategory::Struct),
        "enum" => Some(SemanticCategory::Enum),
        "enumMember" => Some(SemanticCategory::EnumMember),
        "type" => Some(SemanticCategory::TypeAlias),
        "macro" => Some(SemanticCategory::Macro),
        _ => None,
    }
}

/// Category for a raw code under the legacy fixed-code scheme (no legend advertised).
fn category_for_fixed_code(code: u32) -> Option<SemanticCategory> {
    match code {
        1 => Some(SemanticCategory::Variable),
        2 => Some(SemanticCategory::Parameter),
        3 => Some(SemanticCategory::Function),
        6 => Some(SemanticCategory::Field),
        8 => Some(SemanticCategory::Struct),
        9 => Some(SemanticCategory::Enum),
        10 => Some(SemanticCategory::EnumMember),
        17 => Some(SemanticCategory::TypeAlias),
        18 => Some(SemanticCategory::Macro),
        _ => None,
    }
}

/// Session-scoped resolver from numeric type codes to semantic categories.
///
/// Built once per analysis session from the advertised legend (or its absence) and
/// cached for the session's lifetime; rebuild it when a new legend is announced.
#[derive(Debug, Clone, Default)]
pub struct CategoryResolver {
    /// Pre-resolved category per legend index. `None` = no legend advertised.
    by_index: Option<Vec<Option<SemanticCategory>>>,
}

impl CategoryResolver {
    /// Resolver for a session without an advertised legend (fixed-code scheme only).
    pub fn fallback() -> Self {
        Self { by_index: None }
    }

    /// Build a resolver from an advertised legend (ordered token type names).
    pub fn from_legend<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            by_index: Some(
                names
                    .iter()
                    .map(|name| category_for_name(name.as_ref()))
                    .collect(),
            ),
        }
    }

    /// Build a resolver from a server `initialize` capabilities payload.
    ///
    /// Reads `semanticTokensProvider.legend.tokenTypes`; anything missing or malformed
    /// yields the fallback resolver.
    pub fn from_capabilities(capabilities: &Value) -> Self {
        let token_types = capabilities
            .get("semanticTokensProvider")
            .and_then(|p| p.get("legend"))
            .and_then(|legend| legend.get("tokenTypes"))
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(category_for_name)
                    .collect::<Vec<_>>()
            });

        Self {
            by_index: token_types,
        }
    }

    /// `true` when this resolver was built from an advertised legend.
    pub fn has_legend(&self) -> bool {
        self.by_index.is_some()
    }

    /// Resolve a raw type code. Total: never fails, unclassified codes yield `None`.
    ///
    /// A code inside the legend resolves through the legend exclusively, even when the
    /// name is unknown; a code outside the legend (or any code when no legend exists)
    /// falls back to the fixed numeric table.
    pub fn resolve(&self, type_code: u32) -> Option<SemanticCategory> {
        if let Some(by_index) = &self.by_index
            && let Some(entry) = by_index.get(type_code as usize)
        {
            return *entry;
        }
        category_for_fixed_code(type_code)
    }
}
