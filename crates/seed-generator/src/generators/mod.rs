//! Entity generators, one module per entity family.
//!
//! Each generator takes the already-generated parent rows it references and
//! returns new rows that only point at those parents.

pub mod comments;
pub mod custom_fields;
pub mod organization;
pub mod projects;
pub mod tags;
pub mod tasks;
pub mod vocab;

use crate::error::GeneratorError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick a parent row uniformly, failing if there is none to pick.
pub(crate) fn choose_parent<'a, T, R: Rng>(
    rng: &mut R,
    parents: &'a [T],
    child: &'static str,
    parent: &'static str,
) -> Result<&'a T, GeneratorError> {
    parents
        .choose(rng)
        .ok_or(GeneratorError::MissingParents { child, parent })
}

/// Pick a vocabulary entry uniformly.
pub(crate) fn pick<R: Rng>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Name for the `index`-th entity drawn from a cycling vocabulary.
///
/// The first pass uses the words as-is; later passes go through `suffix`
/// so every name stays distinct.
pub(crate) fn cycled_name(
    words: &[&str],
    index: usize,
    suffix: impl Fn(&str, usize) -> String,
) -> String {
    if words.is_empty() {
        return suffix("item", index);
    }
    let word = words[index % words.len()];
    if index < words.len() {
        word.to_string()
    } else {
        suffix(word, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycled_name() {
        let words = ["alpha", "beta"];
        let names: Vec<String> = (0..5)
            .map(|i| cycled_name(&words, i, |w, i| format!("{w}-{i}")))
            .collect();
        assert_eq!(names, vec!["alpha", "beta", "alpha-2", "beta-3", "alpha-4"]);
    }
}
