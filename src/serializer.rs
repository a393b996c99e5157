use crate::ast::{
    BlockStatement, ElseClause, Hash, HashPair, MustacheStatement, Node, PartialName, Program,
    SubExpression,
};
use crate::escape::escape_path;
use crate::interface::Options;

/// Converts a template tree back into template text.
///
/// Equivalent to `Serializer::new().serialize(node)`.
///
/// # Example
///
/// ```
/// use restache::{MustacheStatement, Node, Program, serialize};
///
/// let tree = Program::new(vec![
///     Node::content("Hello, "),
///     MustacheStatement::new("name").into(),
///     Node::content("!"),
/// ]);
///
/// assert_eq!(serialize(&tree.into()), "Hello, {{name}}!");
/// ```
pub fn serialize(node: &Node) -> String {
    Serializer::new().serialize(node)
}

/// Converts a template tree back into template text, rewriting the argument
/// selected by `options`.
pub fn serialize_with(node: &Node, options: &Options) -> String {
    Serializer::with_options(options).serialize(node)
}

/// A `Serializer` turns a borrowed template tree into text.
///
/// It holds nothing but an optional reference to the caller's [`Options`], so
/// it is `Copy` and a single instance may be shared freely. The output of
/// every supported node reparses to the same tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer<'o> {
    options: Option<&'o Options>,
}

impl<'o> Serializer<'o> {
    pub const fn new() -> Self {
        Self { options: None }
    }

    pub const fn with_options(options: &'o Options) -> Self {
        Self {
            options: Some(options),
        }
    }

    /// Serializes `node`. A missing node yields empty text, as does any
    /// subtree of [`Node::Unknown`].
    pub fn serialize<'n, N>(&self, node: N) -> String
    where
        N: Into<Option<&'n Node>>,
    {
        let Some(node) = node.into() else {
            return String::new();
        };

        tracing::trace!(
            node_type = ?node.node_type(),
            targeted = self.options.is_some(),
            "serializing template tree"
        );

        let mut output = String::new();
        self.write_node(node, &mut output);
        output
    }

    fn write_node(&self, node: &Node, output: &mut String) {
        match node {
            Node::Program(program) => self.write_program(program, output),
            Node::BlockStatement(block) => self.write_block(block, output),
            Node::MustacheStatement(mustache) => self.write_mustache(mustache, output),
            Node::ContentStatement(content) => output.push_str(&content.original),
            Node::CommentStatement(comment) => {
                output.push_str("{{!--");
                output.push_str(&comment.value);
                output.push_str("--}}");
            }
            Node::PathExpression(path) => output.push_str(&path.original),
            Node::SubExpression(sub) => self.write_sub_expression(sub, output),
            Node::PartialStatement(partial) => {
                self.write_partial(&partial.name, &partial.params, partial.hash.as_ref(), output)
            }
            Node::PartialBlockStatement(partial) => {
                self.write_partial(&partial.name, &partial.params, partial.hash.as_ref(), output)
            }
            Node::StringLiteral(literal) => {
                output.push('\'');
                output.push_str(&literal.value);
                output.push('\'');
            }
            Node::NumberLiteral(literal) => output.push_str(&literal.value.to_string()),
            Node::BooleanLiteral(literal) => output.push_str(&literal.value.to_string()),
            Node::UndefinedLiteral => output.push_str("undefined"),
            Node::NullLiteral => output.push_str("null"),
            Node::Unknown => {
                tracing::debug!("skipping node of unknown type");
            }
        }
    }

    fn write_program(&self, program: &Program, output: &mut String) {
        for child in &program.body {
            self.write_node(child, output);
        }
    }

    fn write_mustache(&self, mustache: &MustacheStatement, output: &mut String) {
        let (open, close) = if mustache.escaped {
            ("{{", "}}")
        } else {
            ("{{{", "}}}")
        };

        output.push_str(open);
        output.push_str(&escape_path(&mustache.path.original));
        self.write_arguments(&mustache.params, mustache.hash.as_ref(), output);
        output.push_str(close);
    }

    fn write_sub_expression(&self, sub: &SubExpression, output: &mut String) {
        let helper = sub.path.original.as_str();

        output.push('(');
        output.push_str(helper);
        write_segment(output, |output| {
            for (position, param) in (1..).zip(&sub.params) {
                if position > 1 {
                    output.push(' ');
                }
                self.write_param(helper, position, param, output);
            }
        });
        write_segment(output, |output| {
            for (index, pair) in hash_pairs(sub.hash.as_ref()).enumerate() {
                if index > 0 {
                    output.push(' ');
                }
                output.push_str(&pair.key);
                output.push_str("='");
                output.push_str(&pair.value.raw_value());
                output.push('\'');
            }
        });
        output.push(')');
    }

    /// Writes argument `position` of a call to `helper`, passing it through
    /// the caller's modifiers when it is the targeted argument.
    fn write_param(&self, helper: &str, position: usize, param: &Node, output: &mut String) {
        match self.options {
            Some(options) if options.targets(helper, position, param) => {
                let mut rendered = String::new();
                self.write_node(param, &mut rendered);

                tracing::trace!(helper, position, "rewriting targeted parameter");
                output.push_str(&options.apply(rendered));
            }
            _ => self.write_node(param, output),
        }
    }

    fn write_block(&self, block: &BlockStatement, output: &mut String) {
        let path = block.path.original.as_str();

        output.push_str("{{#");
        output.push_str(path);
        self.write_arguments(&block.params, block.hash.as_ref(), output);
        write_block_params(&block.program, output);
        output.push_str("}}");
        self.write_program(&block.program, output);

        for clause in block.else_chain() {
            match clause {
                ElseClause::Chained(nested) => {
                    output.push_str("{{else ");
                    output.push_str(&nested.path.original);
                    self.write_arguments(&nested.params, nested.hash.as_ref(), output);
                    write_block_params(&nested.program, output);
                    output.push_str("}}");
                    self.write_program(&nested.program, output);
                }
                ElseClause::Final(program) => {
                    output.push_str("{{else}}");
                    self.write_program(program, output);
                }
            }
        }

        output.push_str("{{/");
        output.push_str(path);
        output.push_str("}}");
    }

    fn write_partial(
        &self,
        name: &PartialName,
        params: &[Node],
        hash: Option<&Hash>,
        output: &mut String,
    ) {
        output.push_str("{{> ");
        match name {
            PartialName::SubExpression(sub) => {
                output.push('(');
                output.push_str(&sub.path.original);
                write_segment(output, |output| self.write_joined(&sub.params, output));
                output.push(')');
            }
            PartialName::PathExpression(path) => output.push_str(&path.original),
        }
        self.write_arguments(params, hash, output);
        output.push_str(" }}");
    }

    /// Positional params then `key=value` pairs, each group preceded by a
    /// space only when it renders to something.
    fn write_arguments(&self, params: &[Node], hash: Option<&Hash>, output: &mut String) {
        write_segment(output, |output| self.write_joined(params, output));
        write_segment(output, |output| {
            for (index, pair) in hash_pairs(hash).enumerate() {
                if index > 0 {
                    output.push(' ');
                }
                output.push_str(&pair.key);
                output.push('=');
                self.write_node(&pair.value, output);
            }
        });
    }

    fn write_joined(&self, nodes: &[Node], output: &mut String) {
        for (index, node) in nodes.iter().enumerate() {
            if index > 0 {
                output.push(' ');
            }
            self.write_node(node, output);
        }
    }
}

fn hash_pairs(hash: Option<&Hash>) -> impl Iterator<Item = &HashPair> {
    hash.into_iter().flat_map(|hash| hash.pairs.iter())
}

/// ` as |a b|`, when the program declares block parameters.
fn write_block_params(program: &Program, output: &mut String) {
    let Some(names) = program.block_params.as_deref() else {
        return;
    };

    let joined = names.join(" ");
    if !joined.is_empty() {
        output.push_str(" as |");
        output.push_str(&joined);
        output.push('|');
    }
}

/// Runs `write` after a separating space, dropping the space again when
/// nothing was written.
fn write_segment<F>(output: &mut String, write: F)
where
    F: FnOnce(&mut String),
{
    let mark = output.len();
    output.push(' ');
    let start = output.len();
    write(output);
    if output.len() == start {
        output.truncate(mark);
    }
}
