//! Monkey.
//!
//! Unlike the Blitz dialects this grammar is case-sensitive (individual
//! rules opt into folding with inline `(?i)` groups) and leans on
//! auxiliary states: `funcname`/`classname`/`variables` classify
//! declaration heads, `classname` re-enters itself per `<` to track
//! nested generics, and `#rem` block comments nest by re-pushing the
//! comment state.

use std::sync::LazyLock;

use super::Language;
use crate::lexer::StateOp::{Pop, Push};
use crate::lexer::{StateTable, TableError};
use crate::token::TokenKind::*;

/// The Monkey language definition.
pub static MONKEY: LazyLock<Language> = LazyLock::new(|| Language {
    name: "Monkey",
    aliases: &["monkey"],
    filenames: &["*.monkey"],
    mimetypes: &["text/x-monkey"],
    table: table().expect("Monkey table is validated by its tests"),
});

const NAME_VARIABLE: &str = r"[a-z_]\w*";
const NAME_FUNCTION: &str = r"[A-Z]\w*";
const NAME_CONSTANT: &str = r"[A-Z_][A-Z0-9_]*";
const NAME_CLASS: &str = r"[A-Z]\w*";
const NAME_MODULE: &str = r"[a-z0-9_]*";

const KEYWORD_TYPE: &str = r"(?:Int|Float|String|Bool|Object|Array|Void)";
// ? == Bool // % == Int // # == Float // $ == String
const KEYWORD_TYPE_SPECIAL: &str = r"[?%#$]";

fn table() -> Result<StateTable, TableError> {
    StateTable::builder("root")
        .state("root", |s| {
            // Text
            s.rule(r"\s+", Text);
            // Comments
            s.rule(r"'.*", Comment);
            s.rule_to(r"(?i)^#rem\b", CommentMultiline, Push("comment"));
            // preprocessor directives
            s.rule(
                r"(?i)^(?:#If|#ElseIf|#Else|#EndIf|#End|#Print|#Error)\b",
                CommentPreproc,
            );
            // preprocessor variable (any line starting with '#' that is not a directive)
            s.rule_to(r"^#", CommentPreproc, Push("variables"));
            // String
            s.rule_to("\"", StringDouble, Push("string"));
            // Numbers
            s.rule(r"[0-9]+\.[0-9]*(?!\.)", NumberFloat);
            s.rule(r"\.[0-9]+(?!\.)", NumberFloat);
            s.rule(r"[0-9]+", NumberInteger);
            s.rule(r"\$[0-9a-fA-Z]+", NumberHex);
            s.rule(r"%[10]+", NumberBin);
            // Native data types
            s.rule(format!(r"\b{KEYWORD_TYPE}\b"), KeywordType);
            // Exception handling
            s.rule(r"(?i)\b(?:Try|Catch|Throw)\b", KeywordReserved);
            s.rule("Throwable", NameException);
            // Builtins
            s.rule(r"(?i)\b(?:Null|True|False)\b", NameBuiltin);
            s.rule(r"(?i)\b(?:Self|Super)\b", NameBuiltinPseudo);
            s.rule(r"\b(?:HOST|LANG|TARGET|CONFIG)\b", NameConstant);
            // Keywords
            s.groups(
                r"(?i)^(Import)(\s+)(.*)(\n)",
                &[KeywordNamespace, Text, NameNamespace, Text],
            );
            s.rule(r"(?i)^Strict\b.*\n", KeywordReserved);
            s.groups_to(
                r"(?i)(Const|Local|Global|Field)(\s+)",
                &[KeywordDeclaration, Text],
                Push("variables"),
            );
            s.groups_to(
                r"(?i)(New|Class|Interface|Extends|Implements)(\s+)",
                &[KeywordReserved, Text],
                Push("classname"),
            );
            s.groups_to(
                r"(?i)(Function|Method)(\s+)",
                &[KeywordReserved, Text],
                Push("funcname"),
            );
            s.rule(
                r"(?i)(?:End|Return|Public|Private|Extern|Property|Final|Abstract)\b",
                KeywordReserved,
            );
            // Flow control stuff
            s.rule(
                r"(?i)(?:If|Then|Else|ElseIf|Select|Case|Default|While|Wend|Repeat|Until|Forever|For|To|Step|EachIn|Next|Exit|Continue)\s+",
                KeywordReserved,
            );
            // not used yet
            s.rule(r"(?i)\b(?:Module|Inline)\b", KeywordReserved);
            // Array
            s.rule(r"[\[\]]", Punctuation);
            // Other
            s.rule(r"<=|>=|<>|\*=|/=|\+=|-=|&=|~=|\|=|[-&*/^+=<>|~]", Operator);
            s.rule(r"(?i)(?:Not|Mod|Shl|Shr|And|Or)", OperatorWord);
            s.rule(r"[\(\){}!#,.:]", Punctuation);
            // catch the rest
            s.rule(format!(r"{NAME_CONSTANT}\b"), NameConstant);
            s.rule(format!(r"{NAME_FUNCTION}\b"), NameFunction);
            s.rule(format!(r"{NAME_VARIABLE}\b"), NameVariable);
        })
        .state("funcname", |s| {
            s.rule(format!(r"(?i){NAME_FUNCTION}\b"), NameFunction);
            s.rule_to(":", Punctuation, Push("classname"));
            s.rule(r"\s+", Text);
            s.rule_to(r"\(", Punctuation, Push("variables"));
            s.rule_to(r"\)", Punctuation, Pop(1));
        })
        .state("classname", |s| {
            s.rule(format!(r"{NAME_MODULE}\."), NameNamespace);
            s.rule(format!(r"{KEYWORD_TYPE}\b"), KeywordType);
            s.rule(format!(r"{NAME_CLASS}\b"), NameClass);
            // array (of given size)
            s.groups(
                r"(\[)(\s*)(\d*)(\s*)(\])",
                &[Punctuation, Text, NumberInteger, Text, Punctuation],
            );
            // generics
            s.rule_to(r"\s+(?!<)", Text, Pop(1));
            s.rule_to("<", Punctuation, Push("classname"));
            s.rule_to(">", Punctuation, Pop(1));
            s.rule_to(r"\n", Text, Pop(1));
            s.default_to(Pop(1));
        })
        .state("variables", |s| {
            s.rule(format!(r"{NAME_CONSTANT}\b"), NameConstant);
            s.rule(format!(r"{NAME_VARIABLE}\b"), NameVariable);
            s.rule(KEYWORD_TYPE_SPECIAL, KeywordType);
            s.rule(r"\s+", Text);
            s.rule_to(":", Punctuation, Push("classname"));
            s.rule_to(",", Punctuation, Push("variables"));
            s.default_to(Pop(1));
        })
        .state("string", |s| {
            s.rule(r#"[^"~]+"#, StringDouble);
            s.rule(r"~q|~n|~r|~t|~z|~~", StringEscape);
            s.rule_to("\"", StringDouble, Pop(1));
        })
        .state("comment", |s| {
            s.rule_to(r"(?i)^#rem.*?", CommentMultiline, Push("comment"));
            s.rule_to(r"(?i)^#end.*?", CommentMultiline, Pop(1));
            s.rule(r"\n", CommentMultiline);
            s.rule(r".+", CommentMultiline);
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn lex(source: &str) -> Vec<(TokenKind, &str)> {
        MONKEY.tokenize(source).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_table_builds() {
        assert!(table().is_ok());
    }

    #[test]
    fn test_generic_class_annotation() {
        assert_eq!(
            lex("Local a:List<Int>"),
            vec![
                (KeywordDeclaration, "Local"),
                (Text, " "),
                (NameVariable, "a"),
                (Punctuation, ":"),
                (NameClass, "List"),
                (Punctuation, "<"),
                (KeywordType, "Int"),
                (Punctuation, ">"),
            ]
        );
    }

    #[test]
    fn test_nested_generics() {
        // Each `<` re-pushes the classname state, each `>` pops one level.
        assert_eq!(
            lex("Field m:List<List<Int>>"),
            vec![
                (KeywordDeclaration, "Field"),
                (Text, " "),
                (NameVariable, "m"),
                (Punctuation, ":"),
                (NameClass, "List"),
                (Punctuation, "<"),
                (NameClass, "List"),
                (Punctuation, "<"),
                (KeywordType, "Int"),
                (Punctuation, ">"),
                (Punctuation, ">"),
            ]
        );
    }

    #[test]
    fn test_block_comment_nests() {
        let source = "#rem\nouter\n#rem\ninner\n#end\nstill out\n#end\nx";
        let tokens = lex(source);
        let (last_kind, last_text) = tokens[tokens.len() - 1];
        assert_eq!((last_kind, last_text), (NameVariable, "x"));
        // Everything before the final identifier is comment material.
        for (kind, _) in &tokens[..tokens.len() - 2] {
            assert_eq!(*kind, CommentMultiline);
        }
    }

    #[test]
    fn test_preprocessor_directive_versus_variable() {
        assert_eq!(
            lex("#If TARGET\n")[0],
            (CommentPreproc, "#If"),
        );
        let tokens = lex("#FOO = 1\n");
        assert_eq!(tokens[0], (CommentPreproc, "#"));
        assert_eq!(tokens[1], (NameConstant, "FOO"));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            lex("\"a~nb\""),
            vec![
                (StringDouble, "\""),
                (StringDouble, "a"),
                (StringEscape, "~n"),
                (StringDouble, "b"),
                (StringDouble, "\""),
            ]
        );
    }

    #[test]
    fn test_case_sensitivity_of_identifiers() {
        assert_eq!(lex("SCREEN_WIDTH")[0].0, NameConstant);
        assert_eq!(lex("Update")[0].0, NameFunction);
        assert_eq!(lex("delta")[0].0, NameVariable);
    }

    #[test]
    fn test_hex_and_binary() {
        assert_eq!(lex("$DEAD"), vec![(NumberHex, "$DEAD")]);
        assert_eq!(lex("%101"), vec![(NumberBin, "%101")]);
    }

    #[test]
    fn test_function_declaration_with_return_type() {
        assert_eq!(
            lex("Method Update:Void()"),
            vec![
                (KeywordReserved, "Method"),
                (Text, " "),
                (NameFunction, "Update"),
                (Punctuation, ":"),
                (KeywordType, "Void"),
                (Punctuation, "("),
                (Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn test_import_line() {
        assert_eq!(
            lex("Import mojo.graphics\n"),
            vec![
                (KeywordNamespace, "Import"),
                (Text, " "),
                (NameNamespace, "mojo.graphics"),
                (Text, "\n"),
            ]
        );
    }

    #[test]
    fn test_builtins_and_pseudo_builtins() {
        assert_eq!(lex("Null")[0].0, NameBuiltin);
        assert_eq!(lex("Self")[0].0, NameBuiltinPseudo);
        assert_eq!(lex("TARGET")[0].0, NameConstant);
    }

    #[test]
    fn test_line_comment_runs_to_end_of_line() {
        assert_eq!(
            lex("' note\nx"),
            vec![(Comment, "' note"), (Text, "\n"), (NameVariable, "x")]
        );
    }
}
