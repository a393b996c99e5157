use std::borrow::Cow;

/// The closed set of node kinds produced by a conforming template parser.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeType {
    Program,
    BlockStatement,
    MustacheStatement,
    ContentStatement,
    CommentStatement,
    PathExpression,
    SubExpression,
    PartialStatement,
    PartialBlockStatement,
    StringLiteral,
    NumberLiteral,
    BooleanLiteral,
    UndefinedLiteral,
    NullLiteral,
}

impl NodeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::BlockStatement => "BlockStatement",
            Self::MustacheStatement => "MustacheStatement",
            Self::ContentStatement => "ContentStatement",
            Self::CommentStatement => "CommentStatement",
            Self::PathExpression => "PathExpression",
            Self::SubExpression => "SubExpression",
            Self::PartialStatement => "PartialStatement",
            Self::PartialBlockStatement => "PartialBlockStatement",
            Self::StringLiteral => "StringLiteral",
            Self::NumberLiteral => "NumberLiteral",
            Self::BooleanLiteral => "BooleanLiteral",
            Self::UndefinedLiteral => "UndefinedLiteral",
            Self::NullLiteral => "NullLiteral",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node of a parsed template.
///
/// The tree is owned by whoever produced it; the serializer only ever borrows
/// it. With the `serde` feature enabled the enum reads the JSON AST emitted by
/// the reference parser, keyed on its `"type"` field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An ordered run of statements, the root of every template.
    Program(Program),
    /// A paired `{{#helper}}...{{/helper}}` construct.
    BlockStatement(BlockStatement),
    /// A `{{...}}` or `{{{...}}}` interpolation.
    MustacheStatement(MustacheStatement),
    /// Literal text between tags.
    ContentStatement(ContentStatement),
    /// A `{{!-- ... --}}` comment.
    CommentStatement(CommentStatement),
    PathExpression(PathExpression),
    /// A parenthesised helper call used as an argument.
    SubExpression(SubExpression),
    PartialStatement(PartialStatement),
    PartialBlockStatement(PartialBlockStatement),
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    BooleanLiteral(BooleanLiteral),
    UndefinedLiteral,
    NullLiteral,
    /// Any node shape this crate does not model. Serializes to nothing.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl Node {
    /// The type tag of this node, or `None` for [`Node::Unknown`].
    pub const fn node_type(&self) -> Option<NodeType> {
        Some(match self {
            Self::Program(_) => NodeType::Program,
            Self::BlockStatement(_) => NodeType::BlockStatement,
            Self::MustacheStatement(_) => NodeType::MustacheStatement,
            Self::ContentStatement(_) => NodeType::ContentStatement,
            Self::CommentStatement(_) => NodeType::CommentStatement,
            Self::PathExpression(_) => NodeType::PathExpression,
            Self::SubExpression(_) => NodeType::SubExpression,
            Self::PartialStatement(_) => NodeType::PartialStatement,
            Self::PartialBlockStatement(_) => NodeType::PartialBlockStatement,
            Self::StringLiteral(_) => NodeType::StringLiteral,
            Self::NumberLiteral(_) => NodeType::NumberLiteral,
            Self::BooleanLiteral(_) => NodeType::BooleanLiteral,
            Self::UndefinedLiteral => NodeType::UndefinedLiteral,
            Self::NullLiteral => NodeType::NullLiteral,
            Self::Unknown => return None,
        })
    }

    pub fn path<T: Into<String>>(original: T) -> Self {
        Self::PathExpression(PathExpression::new(original))
    }

    pub fn string<T: Into<String>>(value: T) -> Self {
        Self::StringLiteral(StringLiteral {
            value: value.into(),
        })
    }

    pub const fn number(value: f64) -> Self {
        Self::NumberLiteral(NumberLiteral { value })
    }

    pub const fn boolean(value: bool) -> Self {
        Self::BooleanLiteral(BooleanLiteral { value })
    }

    pub fn content<T: Into<String>>(original: T) -> Self {
        Self::ContentStatement(ContentStatement {
            original: original.into(),
        })
    }

    pub fn comment<T: Into<String>>(value: T) -> Self {
        Self::CommentStatement(CommentStatement {
            value: value.into(),
        })
    }

    /// The underlying value of a literal, as text.
    ///
    /// Nodes that carry no value (`UndefinedLiteral` and every non-literal)
    /// yield the word `undefined`, `NullLiteral` yields `null`.
    pub fn raw_value(&self) -> Cow<'_, str> {
        match self {
            Self::StringLiteral(literal) => Cow::Borrowed(&literal.value),
            Self::NumberLiteral(literal) => Cow::Owned(literal.value.to_string()),
            Self::BooleanLiteral(literal) => Cow::Owned(literal.value.to_string()),
            Self::NullLiteral => Cow::Borrowed("null"),
            Self::UndefinedLiteral
            | Self::Program(_)
            | Self::BlockStatement(_)
            | Self::MustacheStatement(_)
            | Self::ContentStatement(_)
            | Self::CommentStatement(_)
            | Self::PathExpression(_)
            | Self::SubExpression(_)
            | Self::PartialStatement(_)
            | Self::PartialBlockStatement(_)
            | Self::Unknown => Cow::Borrowed("undefined"),
        }
    }
}

/// An ordered run of statements, optionally declaring block parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    #[cfg_attr(feature = "serde", serde(default))]
    pub body: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub block_params: Option<Vec<String>>,
}

impl Program {
    pub fn new(body: Vec<Node>) -> Self {
        Self {
            body,
            block_params: None,
        }
    }

    pub fn with_block_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_params = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExpression {
    /// The path exactly as written, e.g. `../name` or `@root.value`.
    pub original: String,
}

impl PathExpression {
    pub fn new<T: Into<String>>(original: T) -> Self {
        Self {
            original: original.into(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentStatement {
    /// The raw source text, whitespace included.
    pub original: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentStatement {
    pub value: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringLiteral {
    pub value: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BooleanLiteral {
    pub value: bool,
}

/// Named `key=value` arguments, in source order.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hash {
    #[cfg_attr(feature = "serde", serde(default))]
    pub pairs: Vec<HashPair>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: String,
    pub value: Node,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MustacheStatement {
    pub path: PathExpression,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hash: Option<Hash>,
    /// `false` for triple-brace (unescaped) interpolation.
    pub escaped: bool,
}

impl MustacheStatement {
    pub fn new<T: Into<String>>(path: T) -> Self {
        Self {
            path: PathExpression::new(path),
            params: Vec::new(),
            hash: None,
            escaped: true,
        }
    }

    #[must_use]
    pub fn unescaped(mut self) -> Self {
        self.escaped = false;
        self
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SubExpression {
    pub path: PathExpression,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hash: Option<Hash>,
}

impl SubExpression {
    pub fn new<T: Into<String>>(path: T) -> Self {
        Self {
            path: PathExpression::new(path),
            params: Vec::new(),
            hash: None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub path: PathExpression,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hash: Option<Hash>,
    /// The main body.
    #[cfg_attr(feature = "serde", serde(default))]
    pub program: Program,
    /// The else branch. A chained `{{else if ...}}` appears here as a
    /// program whose first statement is itself a block.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub inverse: Option<Program>,
}

impl BlockStatement {
    pub fn new<T: Into<String>>(path: T) -> Self {
        Self {
            path: PathExpression::new(path),
            params: Vec::new(),
            hash: None,
            program: Program::default(),
            inverse: None,
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: Program) -> Self {
        self.program = program;
        self
    }

    #[must_use]
    pub fn with_inverse(mut self, inverse: Program) -> Self {
        self.inverse = Some(inverse);
        self
    }

    /// Walks the else branches attached to this block, in source order.
    pub fn else_chain(&self) -> ElseChain<'_> {
        ElseChain {
            next: self.inverse.as_ref(),
        }
    }
}

/// One `{{else ...}}` clause of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElseClause<'a> {
    /// `{{else helper args}}` followed by the nested block's main program.
    Chained(&'a BlockStatement),
    /// A bare `{{else}}` followed by this program. Always the last clause.
    Final(&'a Program),
}

/// Iterator over the inverse linkage of a [`BlockStatement`].
///
/// Ends after a [`ElseClause::Final`] or when a chained block has no inverse.
#[derive(Debug, Clone)]
pub struct ElseChain<'a> {
    next: Option<&'a Program>,
}

impl<'a> Iterator for ElseChain<'a> {
    type Item = ElseClause<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let program = self.next.take()?;
        match program.body.first() {
            Some(Node::BlockStatement(block)) => {
                self.next = block.inverse.as_ref();
                Some(ElseClause::Chained(block))
            }
            _ => Some(ElseClause::Final(program)),
        }
    }
}

/// The target of a partial: a static path or a dynamic subexpression.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone, PartialEq)]
pub enum PartialName {
    PathExpression(PathExpression),
    SubExpression(SubExpression),
}

impl From<PathExpression> for PartialName {
    fn from(path: PathExpression) -> Self {
        Self::PathExpression(path)
    }
}

impl From<SubExpression> for PartialName {
    fn from(sub: SubExpression) -> Self {
        Self::SubExpression(sub)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PartialStatement {
    pub name: PartialName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hash: Option<Hash>,
}

impl PartialStatement {
    pub fn new<T: Into<PartialName>>(name: T) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            hash: None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PartialBlockStatement {
    pub name: PartialName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<Node>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hash: Option<Hash>,
    /// The fallback body. Read by nothing in this crate; kept so trees
    /// survive a serde round trip intact.
    #[cfg_attr(feature = "serde", serde(default))]
    pub program: Program,
}

impl PartialBlockStatement {
    pub fn new<T: Into<PartialName>>(name: T) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            hash: None,
            program: Program::default(),
        }
    }
}

/// `with_param`/`with_hash_pair` for every node that takes call arguments.
macro_rules! impl_call_arguments {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                #[must_use]
                pub fn with_param<N: Into<Node>>(mut self, param: N) -> Self {
                    self.params.push(param.into());
                    self
                }

                #[must_use]
                pub fn with_hash_pair<K: Into<String>, N: Into<Node>>(
                    mut self,
                    key: K,
                    value: N,
                ) -> Self {
                    self.hash.get_or_insert_with(Hash::default).pairs.push(HashPair {
                        key: key.into(),
                        value: value.into(),
                    });
                    self
                }
            }
        )+
    };
}

impl_call_arguments!(
    MustacheStatement,
    SubExpression,
    BlockStatement,
    PartialStatement,
    PartialBlockStatement,
);

macro_rules! impl_into_node {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Self::$variant(node)
                }
            }
        )+
    };
}

impl_into_node!(
    Program,
    BlockStatement,
    MustacheStatement,
    ContentStatement,
    CommentStatement,
    PathExpression,
    SubExpression,
    PartialStatement,
    PartialBlockStatement,
    StringLiteral,
    NumberLiteral,
    BooleanLiteral,
);
