//!
//! This module contains utility functions for tokenizers. Vocabulary preparation and special
//! token handling are done here.
//!
use std::path::Path;

use log::{info, warn};

use special_tokens::{SpecialTokenAliases, SpecialTokens};

use super::TokenizerError;
use super::config::SpecialToken;
use super::vocab::Vocabulary;

pub mod special_tokens;

///
/// Prepare the vocabulary and special tokens. This function loads the vocabulary table and
/// resolves every special-token role against it.
///
/// Doing these together is necessary, because the special tokens are entries of the vocab.
///
/// # Arguments:
/// - vocab_file: path to the vocabulary table
/// - aliases: the alias spellings to try for each role
/// - strict: fail when the `unk` or `cls` role cannot be resolved
///
pub fn prepare_vocab_and_special_tokens<P: AsRef<Path>>(
    vocab_file: P,
    aliases: &SpecialTokenAliases,
    strict: bool,
) -> Result<(Vocabulary, SpecialTokens), TokenizerError> {
    let vocab = Vocabulary::from_path(vocab_file.as_ref())?;
    info!(
        "loaded vocabulary from {:?} ({} entries)",
        vocab_file.as_ref(),
        vocab.len()
    );

    let special_tokens = check_special_tokens(&vocab, aliases, strict)?;
    Ok((vocab, special_tokens))
}

///
/// Resolve the special-token roles and apply the strictness policy.
///
/// `pad` is never required because the encoder does not emit it. An unresolved role always
/// logs a warning since id 0 may collide with a real value token.
///
pub fn check_special_tokens(
    vocab: &Vocabulary,
    aliases: &SpecialTokenAliases,
    strict: bool,
) -> Result<SpecialTokens, TokenizerError> {
    let special_tokens = SpecialTokens::resolve(vocab, aliases);

    for token in special_tokens.unresolved() {
        let required = matches!(token.role, SpecialToken::Unk | SpecialToken::Cls);
        if strict && required {
            return Err(TokenizerError::UnresolvedSpecialToken {
                role: token.role,
                aliases: aliases.for_role(token.role).to_vec(),
            });
        }
        warn!(
            "no {} token found in vocabulary (tried {:?}), falling back to id {}",
            token.role,
            aliases.for_role(token.role),
            token.id
        );
    }

    for token in special_tokens.iter().filter(|t| t.is_resolved()) {
        info!(
            "{} token: {:?} -> id {}",
            token.role,
            token.alias.as_deref().unwrap_or_default(),
            token.id
        );
    }

    Ok(special_tokens)
}
