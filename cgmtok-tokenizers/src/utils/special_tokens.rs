use crate::config::{SpecialToken, SpecialTokenAssignment};
use crate::consts::UNRESOLVED_SPECIAL_TOKEN_ID;
use crate::vocab::Vocabulary;

pub const UNK_ALIASES: &[&str] = &["<unk>", "<UNK>", "[UNK]"];
pub const CLS_ALIASES: &[&str] = &["<cls>", "<CLS>", "[CLS]"];
pub const PAD_ALIASES: &[&str] = &["<pad>", "<PAD>", "[PAD]"];

///
/// Ordered alias spellings for each special-token role. The first alias present in a
/// vocabulary wins.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialTokenAliases {
    pub unk: Vec<String>,
    pub cls: Vec<String>,
    pub pad: Vec<String>,
}

impl Default for SpecialTokenAliases {
    fn default() -> Self {
        SpecialTokenAliases {
            unk: UNK_ALIASES.iter().map(|s| s.to_string()).collect(),
            cls: CLS_ALIASES.iter().map(|s| s.to_string()).collect(),
            pad: PAD_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SpecialTokenAliases {
    pub fn for_role(&self, role: SpecialToken) -> &[String] {
        match role {
            SpecialToken::Unk => &self.unk,
            SpecialToken::Cls => &self.cls,
            SpecialToken::Pad => &self.pad,
        }
    }

    fn for_role_mut(&mut self, role: SpecialToken) -> &mut Vec<String> {
        match role {
            SpecialToken::Unk => &mut self.unk,
            SpecialToken::Cls => &mut self.cls,
            SpecialToken::Pad => &mut self.pad,
        }
    }
}

impl From<Vec<SpecialTokenAssignment>> for SpecialTokenAliases {
    fn from(value: Vec<SpecialTokenAssignment>) -> Self {
        let mut aliases = SpecialTokenAliases::default();

        for assignment in value {
            let current = aliases.for_role_mut(assignment.name);
            let custom = assignment.aliases;
            let builtin: Vec<String> = current.drain(..).filter(|a| !custom.contains(a)).collect();
            *current = custom.into_iter().chain(builtin).collect();
        }

        aliases
    }
}

///
/// The outcome of looking up one role: the alias that matched, if any, and the id in use.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedToken {
    pub role: SpecialToken,
    pub alias: Option<String>,
    pub id: u32,
}

impl ResolvedToken {
    pub fn is_resolved(&self) -> bool {
        self.alias.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpecialTokens {
    pub unk: ResolvedToken,
    pub cls: ResolvedToken,
    pub pad: ResolvedToken,
}

impl SpecialTokens {
    ///
    /// Resolve every role against a vocabulary. Roles with no matching alias fall back to
    /// [`UNRESOLVED_SPECIAL_TOKEN_ID`]; callers decide whether that is acceptable.
    ///
    pub fn resolve(vocab: &Vocabulary, aliases: &SpecialTokenAliases) -> Self {
        let resolve_role = |role: SpecialToken| match vocab.find_alias(aliases.for_role(role)) {
            Some((alias, id)) => ResolvedToken {
                role,
                alias: Some(alias.to_string()),
                id,
            },
            None => ResolvedToken {
                role,
                alias: None,
                id: UNRESOLVED_SPECIAL_TOKEN_ID,
            },
        };

        SpecialTokens {
            unk: resolve_role(SpecialToken::Unk),
            cls: resolve_role(SpecialToken::Cls),
            pad: resolve_role(SpecialToken::Pad),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedToken> {
        [&self.unk, &self.cls, &self.pad].into_iter()
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.iter().filter(|t| !t.is_resolved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::vocab::VocabKey;

    fn vocab(entries: &[(&str, u32)]) -> Vocabulary {
        Vocabulary::from_entries(
            entries
                .iter()
                .map(|(k, v)| (VocabKey::Text(k.to_string()), *v)),
        )
    }

    #[rstest]
    fn test_resolve_default_aliases() {
        let vocab = vocab(&[("<unk>", 0), ("[CLS]", 4), ("<PAD>", 9)]);
        let tokens = SpecialTokens::resolve(&vocab, &SpecialTokenAliases::default());

        assert_eq!(tokens.unk.id, 0);
        assert_eq!(tokens.cls.id, 4);
        assert_eq!(tokens.cls.alias.as_deref(), Some("[CLS]"));
        assert_eq!(tokens.pad.id, 9);
        assert_eq!(tokens.unresolved().count(), 0);
    }

    #[rstest]
    fn test_unresolved_role_defaults_to_zero() {
        let vocab = vocab(&[("<unk>", 3), ("<cls>", 4)]);
        let tokens = SpecialTokens::resolve(&vocab, &SpecialTokenAliases::default());

        assert_eq!(tokens.pad.id, 0);
        assert_eq!(tokens.pad.is_resolved(), false);
        let unresolved: Vec<SpecialToken> = tokens.unresolved().map(|t| t.role).collect();
        assert_eq!(unresolved, vec![SpecialToken::Pad]);
    }

    #[rstest]
    fn test_custom_aliases_take_priority() {
        let aliases = SpecialTokenAliases::from(vec![SpecialTokenAssignment {
            name: SpecialToken::Unk,
            aliases: vec!["<UNKNOWN>".to_string(), "<unk>".to_string()],
        }]);
        assert_eq!(aliases.unk, vec!["<UNKNOWN>", "<unk>", "<UNK>", "[UNK]"]);
        assert_eq!(aliases.cls, SpecialTokenAliases::default().cls);

        let vocab = vocab(&[("<unk>", 0), ("<UNKNOWN>", 7)]);
        let tokens = SpecialTokens::resolve(&vocab, &aliases);
        assert_eq!(tokens.unk.id, 7);
    }
}
