//! BlitzMax.
//!
//! The most involved grammar of the family: declarations carry optional
//! type shorthands (`@`, `@@`, `!`, `#`, `$`, `%`), longhand `: Type`
//! annotations and a trailing `Ptr`, all classified per capture group by a
//! single declaration pattern. `Rem … End Rem` blocks and `..`-newline
//! line continuations can span lines.

use std::sync::LazyLock;

use super::{words, Language};
use crate::lexer::StateOp::{Pop, Push};
use crate::lexer::{StateTable, TableError};
use crate::token::TokenKind::*;

/// The BlitzMax language definition.
pub static BLITZMAX: LazyLock<Language> = LazyLock::new(|| Language {
    name: "BlitzMax",
    aliases: &["blitzmax", "bmax"],
    filenames: &["*.bmx"],
    mimetypes: &["text/x-bmx"],
    table: table().expect("BlitzMax table is validated by its tests"),
});

const NAME: &str = r"[a-z_]\w*";
const SHORTHAND_TYPE: &str = r"@{1,2}|[!#$%]";
const LONGHAND_TYPE: &str = r"\b(Int|Byte|Short|Float|Double|Long)\b";
const WORD_OPERATOR: &str = r"\b(Shl|Shr|Sar|Mod)\b";

/// A declared name with its optional type annotation: shorthand sigil,
/// `: Type` longhand (built-in or user type), or a `: Shl`-style word the
/// grammar deliberately refuses to read as a type, plus a trailing `Ptr`.
fn var_pattern() -> std::string::String {
    format!(
        r"({NAME})(?:(?:([ \t]*)({SHORTHAND_TYPE})|([ \t]*:[ \t]*\b(?:Shl|Shr|Sar|Mod)\b)|([ \t]*)(:)([ \t]*)(?:{LONGHAND_TYPE}|({NAME})))(?:([ \t]*)(Ptr))?)"
    )
}

/// Same shape with the annotation optional, followed by an opening paren.
fn func_pattern() -> std::string::String {
    format!(r"{}?((?:[ \t]|\.\.\n)*)([(])", var_pattern())
}

fn table() -> Result<StateTable, TableError> {
    let var_kinds = [
        NameVariable,
        Text,
        KeywordType,
        Operator,
        Text,
        Punctuation,
        Text,
        KeywordType,
        NameClass,
        Text,
        KeywordType,
    ];
    let mut func_kinds = var_kinds.to_vec();
    func_kinds[0] = NameFunction;
    func_kinds.extend([Text, Punctuation]);

    StateTable::builder("root")
        .case_insensitive(true)
        .state("root", |s| {
            // Text
            s.rule(r"[ \t]+", Text);
            s.rule(r"\.\.\n", Text); // line continuation
            // Comments
            s.rule(r"'.*?\n", CommentSingle);
            s.rule(r"([ \t]*)\bRem\n(\n|.)*?\s*\bEnd([ \t]*)Rem", CommentMultiline);
            // Data types
            s.rule_to("\"", StringDouble, Push("string"));
            // Numbers
            s.rule(r"[0-9]+\.[0-9]*(?!\.)", NumberFloat);
            s.rule(r"\.[0-9]*(?!\.)", NumberFloat);
            s.rule(r"[0-9]+", NumberInteger);
            s.rule(r"\$[0-9a-f]+", NumberHex);
            s.rule(r"%[10]+", NumberBin);
            // Other
            s.rule(
                format!(r"(?:(?:(:)?([ \t]*)(:?{WORD_OPERATOR}|([+\-*/&|~]))|Or|And|Not|[=<>^]))"),
                Operator,
            );
            s.rule(r"[(),.:\[\]]", Punctuation);
            s.rule(r"(?:#[\w \t]*)", NameLabel);
            s.rule(r"(?:\?[\w \t]*)", CommentPreproc);
            // Identifiers
            s.groups(
                format!(r"\b(New)\b([ \t]?)([(]?)({NAME})"),
                &[KeywordReserved, Text, Punctuation, NameClass],
            );
            s.groups(
                format!(r"\b(Import|Framework|Module)([ \t]+)({NAME}\.{NAME})"),
                &[KeywordReserved, Text, KeywordNamespace],
            );
            s.groups(func_pattern(), &func_kinds);
            s.groups(var_pattern(), &var_kinds);
            s.groups(
                format!(r"\b(Type|Extends)([ \t]+)({NAME})"),
                &[KeywordReserved, Text, NameClass],
            );
            // Keywords
            s.rule(r"\b(Ptr)\b", KeywordType);
            s.rule(r"\b(Pi|True|False|Null|Self|Super)\b", KeywordConstant);
            s.rule(r"\b(Local|Global|Const|Field)\b", KeywordDeclaration);
            s.rule(
                words(&[
                    "TNullMethodException",
                    "TNullFunctionException",
                    "TNullObjectException",
                    "TArrayBoundsException",
                    "TRuntimeException",
                ]),
                NameException,
            );
            s.rule(
                words(&[
                    "Strict", "SuperStrict", "Module", "ModuleInfo", "End", "Return", "Continue",
                    "Exit", "Public", "Private", "Var", "VarPtr", "Chr", "Len", "Asc", "SizeOf",
                    "Sgn", "Abs", "Min", "Max", "New", "Release", "Delete", "Incbin", "IncbinPtr",
                    "IncbinLen", "Framework", "Include", "Import", "Extern", "EndExtern",
                    "Function", "EndFunction", "Type", "EndType", "Extends", "Method", "EndMethod",
                    "Abstract", "Final", "If", "Then", "Else", "ElseIf", "EndIf", "For", "To",
                    "Next", "Step", "EachIn", "While", "Wend", "EndWhile", "Repeat", "Until",
                    "Forever", "Select", "Case", "Default", "EndSelect", "Try", "Catch", "EndTry",
                    "Throw", "Assert", "Goto", "DefData", "ReadData", "RestoreData",
                ]),
                KeywordReserved,
            );
            // Final resolve (for variable names and such)
            s.rule(format!(r"({NAME})"), NameVariable);
        })
        .state("string", |s| {
            s.rule(r#""""#, StringDouble);
            s.rule_to(r#""C?"#, StringDouble, Pop(1));
            s.rule(r#"[^"]+"#, StringDouble);
        })
        .build()
}
