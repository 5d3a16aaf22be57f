//! The supported languages and their rule tables.
//!
//! Each submodule defines one language of the blitzbasic.com family as a
//! static, lazily built [`StateTable`] plus registration metadata (display
//! name, aliases, filename patterns, MIME types). The definitions are pure
//! data; all matching behavior lives in [`crate::lexer`].
//!
//! ## Structure
//!
//! - `blitzmax.rs` - BlitzMax (`*.bmx`)
//! - `blitzbasic.rs` - BlitzBasic (`*.bb`, `*.decls`)
//! - `monkey.rs` - Monkey (`*.monkey`)
//!
//! ## Usage
//!
//! ```rust
//! use blitzlight::languages;
//!
//! let lang = languages::find_by_alias("bmax").unwrap();
//! for token in lang.tokenize("Local x:Int = 5") {
//!     println!("{} {:?}", token.kind, token.text);
//! }
//! ```

mod blitzbasic;
mod blitzmax;
mod monkey;

pub use blitzbasic::BLITZBASIC;
pub use blitzmax::BLITZMAX;
pub use monkey::MONKEY;

use crate::lexer::{StateTable, TokenStream};

/// One registered language: metadata plus its compiled rule table.
pub struct Language {
    /// Display name, e.g. `"BlitzMax"`
    pub name: &'static str,
    /// Short names accepted by [`find_by_alias`], lowercase
    pub aliases: &'static [&'static str],
    /// Filename patterns of the form `*.ext`
    pub filenames: &'static [&'static str],
    /// MIME types announcing this language
    pub mimetypes: &'static [&'static str],
    pub(crate) table: StateTable,
}

impl Language {
    /// The language's rule table, for callers that need direct engine
    /// access (e.g. [`StateTable::tokenize_from`]).
    pub fn table(&self) -> &StateTable {
        &self.table
    }

    /// Tokenizes `source` from the initial state.
    pub fn tokenize<'t, 's>(&'t self, source: &'s str) -> TokenStream<'t, 's> {
        self.table.tokenize(source)
    }

    /// Returns true if `filename` matches one of this language's patterns.
    pub fn matches_filename(&self, filename: &str) -> bool {
        self.filenames.iter().any(|pattern| {
            match pattern.strip_prefix('*') {
                Some(suffix) => filename.ends_with(suffix),
                None => filename == *pattern,
            }
        })
    }
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// All registered languages.
pub fn all() -> [&'static Language; 3] {
    [&*BLITZMAX, &*BLITZBASIC, &*MONKEY]
}

/// Looks a language up by alias, case-insensitively.
pub fn find_by_alias(alias: &str) -> Option<&'static Language> {
    all().into_iter().find(|lang| {
        lang.aliases
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(alias))
    })
}

/// Looks a language up by filename, e.g. `"game.bmx"`.
pub fn find_by_filename(filename: &str) -> Option<&'static Language> {
    all().into_iter().find(|lang| lang.matches_filename(filename))
}

/// Looks a language up by declared MIME type.
pub fn find_by_mimetype(mimetype: &str) -> Option<&'static Language> {
    all()
        .into_iter()
        .find(|lang| lang.mimetypes.contains(&mimetype))
}

/// Builds `\b(?:a|b|c)\b` from a word list, for keyword vocabularies.
pub(crate) fn words(items: &[&str]) -> String {
    format!(r"\b(?:{})\b", items.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_three_languages() {
        let names: Vec<_> = all().iter().map(|lang| lang.name).collect();
        assert_eq!(names, vec!["BlitzMax", "BlitzBasic", "Monkey"]);
    }

    #[test]
    fn test_find_by_alias_is_case_insensitive() {
        assert_eq!(find_by_alias("bmax").map(|l| l.name), Some("BlitzMax"));
        assert_eq!(find_by_alias("BlitzMax").map(|l| l.name), Some("BlitzMax"));
        assert_eq!(find_by_alias("B3D").map(|l| l.name), Some("BlitzBasic"));
        assert_eq!(find_by_alias("monkey").map(|l| l.name), Some("Monkey"));
        assert!(find_by_alias("qbasic").is_none());
    }

    #[test]
    fn test_find_by_filename() {
        assert_eq!(find_by_filename("game.bmx").map(|l| l.name), Some("BlitzMax"));
        assert_eq!(find_by_filename("old.bb").map(|l| l.name), Some("BlitzBasic"));
        assert_eq!(
            find_by_filename("userlib.decls").map(|l| l.name),
            Some("BlitzBasic")
        );
        assert_eq!(
            find_by_filename("player.monkey").map(|l| l.name),
            Some("Monkey")
        );
        assert!(find_by_filename("main.rs").is_none());
    }

    #[test]
    fn test_find_by_mimetype() {
        assert_eq!(
            find_by_mimetype("text/x-bmx").map(|l| l.name),
            Some("BlitzMax")
        );
        assert_eq!(find_by_mimetype("text/x-bb").map(|l| l.name), Some("BlitzBasic"));
        assert_eq!(
            find_by_mimetype("text/x-monkey").map(|l| l.name),
            Some("Monkey")
        );
        assert!(find_by_mimetype("text/plain").is_none());
    }

    #[test]
    fn test_words_builds_bounded_alternation() {
        assert_eq!(words(&["If", "Then"]), r"\b(?:If|Then)\b");
    }
}
