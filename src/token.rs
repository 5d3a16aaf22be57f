//! Token definitions for the highlighting tokenizer.

use std::fmt;

/// A classified span of source text.
///
/// Tokens are emitted in strictly increasing offset order and tile the
/// input completely: concatenating `text` over a whole lex reproduces the
/// original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Start byte offset (inclusive)
    pub offset: usize,
    /// The kind of token
    pub kind: TokenKind,
    /// The source text covered by this token
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Creates a new token.
    pub fn new(offset: usize, kind: TokenKind, text: &'a str) -> Self {
        Self { offset, kind, text }
    }

    /// Returns the end byte offset (exclusive).
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// The hierarchical category attached to a token.
///
/// Kinds form a shallow tree: `Keyword::Declaration` sits under
/// [`TokenKind::Keyword`], `Number::Hex` under [`TokenKind::Number`], and so
/// on. A renderer with no style for a leaf kind is expected to walk
/// [`parent`](TokenKind::parent) links until it finds one it knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Plain text: whitespace, line continuations, anything unstyled
    Text,
    /// Input no rule recognized; emitted one character at a time
    Error,

    /// Generic comment
    Comment,
    /// Comment running to end of line
    CommentSingle,
    /// Block comment, possibly spanning lines
    CommentMultiline,
    /// Preprocessor directive or conditional
    CommentPreproc,

    /// Generic keyword
    Keyword,
    /// Built-in constant (`True`, `Null`, `Pi`)
    KeywordConstant,
    /// Declaration introducer (`Local`, `Global`, `Const`, `Field`)
    KeywordDeclaration,
    /// Module/import keyword
    KeywordNamespace,
    /// Reserved word
    KeywordReserved,
    /// Type name or type sigil
    KeywordType,

    /// Generic name
    Name,
    /// Built-in value
    NameBuiltin,
    /// Pseudo built-in (`Self`, `Super`)
    NameBuiltinPseudo,
    /// Class or user type name
    NameClass,
    /// Constant name
    NameConstant,
    /// Exception type name
    NameException,
    /// Function or method name
    NameFunction,
    /// Jump label
    NameLabel,
    /// Module or namespace path
    NameNamespace,
    /// Variable name
    NameVariable,

    /// Generic number
    Number,
    /// Binary literal (`%1010`)
    NumberBin,
    /// Floating point literal
    NumberFloat,
    /// Hexadecimal literal (`$1A3F`)
    NumberHex,
    /// Decimal integer literal
    NumberInteger,

    /// Symbolic operator
    Operator,
    /// Word operator (`Mod`, `Shl`, `Not`)
    OperatorWord,

    /// Bracket, comma, colon and friends
    Punctuation,

    /// Generic string
    String,
    /// Double-quoted string
    StringDouble,
    /// Escape sequence inside a string
    StringEscape,
}

impl TokenKind {
    /// Returns the parent category, or `None` for a top-level kind.
    pub fn parent(self) -> Option<TokenKind> {
        use TokenKind::*;
        match self {
            CommentSingle | CommentMultiline | CommentPreproc => Some(Comment),
            KeywordConstant | KeywordDeclaration | KeywordNamespace | KeywordReserved
            | KeywordType => Some(Keyword),
            NameBuiltinPseudo => Some(NameBuiltin),
            NameBuiltin | NameClass | NameConstant | NameException | NameFunction | NameLabel
            | NameNamespace | NameVariable => Some(Name),
            NumberBin | NumberFloat | NumberHex | NumberInteger => Some(Number),
            OperatorWord => Some(Operator),
            StringDouble | StringEscape => Some(String),
            Text | Error | Comment | Keyword | Name | Number | Operator | Punctuation | String => {
                None
            }
        }
    }

    /// Returns true if `self` is `ancestor` or falls anywhere under it.
    ///
    /// ```rust
    /// use blitzlight::TokenKind;
    ///
    /// assert!(TokenKind::NumberHex.is_a(TokenKind::Number));
    /// assert!(TokenKind::NameBuiltinPseudo.is_a(TokenKind::Name));
    /// assert!(!TokenKind::NumberHex.is_a(TokenKind::Keyword));
    /// ```
    pub fn is_a(self, ancestor: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// The dotted name of this kind, e.g. `"Keyword.Declaration"`.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Text => "Text",
            Error => "Error",
            Comment => "Comment",
            CommentSingle => "Comment.Single",
            CommentMultiline => "Comment.Multiline",
            CommentPreproc => "Comment.Preproc",
            Keyword => "Keyword",
            KeywordConstant => "Keyword.Constant",
            KeywordDeclaration => "Keyword.Declaration",
            KeywordNamespace => "Keyword.Namespace",
            KeywordReserved => "Keyword.Reserved",
            KeywordType => "Keyword.Type",
            Name => "Name",
            NameBuiltin => "Name.Builtin",
            NameBuiltinPseudo => "Name.Builtin.Pseudo",
            NameClass => "Name.Class",
            NameConstant => "Name.Constant",
            NameException => "Name.Exception",
            NameFunction => "Name.Function",
            NameLabel => "Name.Label",
            NameNamespace => "Name.Namespace",
            NameVariable => "Name.Variable",
            Number => "Number",
            NumberBin => "Number.Bin",
            NumberFloat => "Number.Float",
            NumberHex => "Number.Hex",
            NumberInteger => "Number.Integer",
            Operator => "Operator",
            OperatorWord => "Operator.Word",
            Punctuation => "Punctuation",
            String => "String",
            StringDouble => "String.Double",
            StringEscape => "String.Escape",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
