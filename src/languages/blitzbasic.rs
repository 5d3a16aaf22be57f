//! BlitzBasic (Blitz3D / BlitzPlus).
//!
//! Close kin of BlitzMax, but declarations annotate with `.Type` suffixes
//! instead of colons, and a handful of built-in functions double as word
//! operators.

use std::sync::LazyLock;

use super::{words, Language};
use crate::lexer::StateOp::{Pop, Push};
use crate::lexer::{StateTable, TableError};
use crate::token::TokenKind::*;

/// The BlitzBasic language definition.
pub static BLITZBASIC: LazyLock<Language> = LazyLock::new(|| Language {
    name: "BlitzBasic",
    aliases: &["blitzbasic", "b3d", "bplus"],
    filenames: &["*.bb", "*.decls"],
    mimetypes: &["text/x-bb"],
    table: table().expect("BlitzBasic table is validated by its tests"),
});

const NAME: &str = r"[a-z]\w*";
const SHORTHAND_TYPE: &str = r"@{1,2}|[#$%]";

// A name with an optional type annotation: sigil shorthand or `.Type`.
fn var_pattern() -> std::string::String {
    format!(r"({NAME})(?:([ \t]*)({SHORTHAND_TYPE})|([ \t]*)([.])([ \t]*)(?:({NAME})))?")
}

fn table() -> Result<StateTable, TableError> {
    let var_kinds = [
        NameVariable,
        Text,
        KeywordType,
        Text,
        Punctuation,
        Text,
        NameClass,
    ];

    StateTable::builder("root")
        .case_insensitive(true)
        .state("root", |s| {
            // Text
            s.rule(r"[ \t]+", Text);
            // Comments
            s.rule(r";.*?\n", CommentSingle);
            // Data types
            s.rule_to("\"", StringDouble, Push("string"));
            // Numbers
            s.rule(r"[0-9]+\.[0-9]*(?!\.)", NumberFloat);
            s.rule(r"\.[0-9]+(?!\.)", NumberFloat);
            s.rule(r"[0-9]+", NumberInteger);
            s.rule(r"\$[0-9a-f]+", NumberHex);
            s.rule(r"%[10]+", NumberBin);
            // Other
            s.rule(
                words(&[
                    "Shl", "Shr", "Sar", "Mod", "Or", "And", "Not", "Abs", "Sgn", "Handle", "Int",
                    "Float", "Str", "First", "Last", "Before", "After",
                ]),
                Operator,
            );
            s.rule(r"([+\-*/~=<>^])", Operator);
            s.rule(r"[(),:\[\]\\]", Punctuation);
            s.rule(format!(r"\.([ \t]*)({NAME})"), NameLabel);
            // Identifiers
            s.groups(
                format!(r"\b(New)\b([ \t]+)({NAME})"),
                &[KeywordReserved, Text, NameClass],
            );
            s.groups(
                format!(r"\b(Gosub|Goto)\b([ \t]+)({NAME})"),
                &[KeywordReserved, Text, NameLabel],
            );
            s.groups(
                format!(r"\b(Object)\b([ \t]*)([.])([ \t]*)({NAME})\b"),
                &[Operator, Text, Punctuation, Text, NameClass],
            );
            {
                let mut call_kinds = vec![NameFunction];
                call_kinds.extend(&var_kinds[1..]);
                call_kinds.extend([Text, Punctuation]);
                s.groups(format!(r"\b{}\b([ \t]*)(\()", var_pattern()), &call_kinds);
            }
            {
                let mut decl_kinds = vec![KeywordReserved, Text, NameFunction];
                decl_kinds.extend(&var_kinds[1..]);
                s.groups(
                    format!(r"\b(Function)\b([ \t]+){}", var_pattern()),
                    &decl_kinds,
                );
            }
            s.groups(
                format!(r"\b(Type)([ \t]+)({NAME})"),
                &[KeywordReserved, Text, NameClass],
            );
            // Keywords
            s.rule(r"\b(Pi|True|False|Null)\b", KeywordConstant);
            s.rule(r"\b(Local|Global|Const|Field|Dim)\b", KeywordDeclaration);
            s.rule(
                words(&[
                    "End", "Return", "Exit", "Chr", "Len", "Asc", "New", "Delete", "Insert",
                    "Include", "Function", "Type", "If", "Then", "Else", "ElseIf", "EndIf", "For",
                    "To", "Next", "Step", "Each", "While", "Wend", "Repeat", "Until", "Forever",
                    "Select", "Case", "Default", "Goto", "Gosub", "Data", "Read", "Restore",
                ]),
                KeywordReserved,
            );
            // Final resolve (for variable names and such)
            s.groups(var_pattern(), &var_kinds);
        })
        .state("string", |s| {
            s.rule(r#""""#, StringDouble);
            s.rule_to(r#""C?"#, StringDouble, Pop(1));
            s.rule(r#"[^"]+"#, StringDouble);
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn lex(source: &str) -> Vec<(TokenKind, &str)> {
        BLITZBASIC.tokenize(source).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_table_builds() {
        assert!(table().is_ok());
    }

    #[test]
    fn test_declaration_with_sigil() {
        assert_eq!(
            lex("Local n% = 10"),
            vec![
                (KeywordDeclaration, "Local"),
                (Text, " "),
                (NameVariable, "n"),
                (KeywordType, "%"),
                (Text, " "),
                (Operator, "="),
                (Text, " "),
                (NumberInteger, "10"),
            ]
        );
    }

    #[test]
    fn test_dotted_type_annotation() {
        assert_eq!(
            lex("p.Player"),
            vec![
                (NameVariable, "p"),
                (Punctuation, "."),
                (NameClass, "Player"),
            ]
        );
    }

    #[test]
    fn test_semicolon_comment() {
        assert_eq!(
            lex("; init\nx"),
            vec![(CommentSingle, "; init\n"), (NameVariable, "x")]
        );
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(lex("$ff"), vec![(NumberHex, "$ff")]);
        assert_eq!(lex("%1100"), vec![(NumberBin, "%1100")]);
        assert_eq!(lex(".5")[0].0, NumberFloat);
    }

    #[test]
    fn test_builtin_word_operators() {
        assert_eq!(lex("Handle")[0].0, Operator);
        assert_eq!(lex("Sgn")[0].0, Operator);
    }

    #[test]
    fn test_goto_and_label() {
        assert_eq!(
            lex("Goto start"),
            vec![
                (KeywordReserved, "Goto"),
                (Text, " "),
                (NameLabel, "start"),
            ]
        );
        assert_eq!(lex(".start"), vec![(NameLabel, ".start")]);
    }

    #[test]
    fn test_object_cast() {
        assert_eq!(
            lex("Object.Enemy"),
            vec![
                (Operator, "Object"),
                (Punctuation, "."),
                (NameClass, "Enemy"),
            ]
        );
    }

    #[test]
    fn test_function_call_and_declaration() {
        assert_eq!(
            lex("dist(a)"),
            vec![
                (NameFunction, "dist"),
                (Punctuation, "("),
                (NameVariable, "a"),
                (Punctuation, ")"),
            ]
        );
        assert_eq!(
            lex("Function update()"),
            vec![
                (KeywordReserved, "Function"),
                (Text, " "),
                (NameFunction, "update"),
                (Punctuation, "("),
                (Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            lex("\"abc"),
            vec![(StringDouble, "\""), (StringDouble, "abc")]
        );
    }
}
