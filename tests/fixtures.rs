#![allow(dead_code, reason = "each test binary uses a different subset")]

use rand::Rng;
use restache::{
    BlockStatement, MustacheStatement, Node, PartialStatement, PathExpression, Program,
    SubExpression, serialize,
};

pub fn path(original: &str) -> Node {
    Node::path(original)
}

pub fn string(value: &str) -> Node {
    Node::string(value)
}

pub fn number(value: f64) -> Node {
    Node::number(value)
}

pub fn content(text: &str) -> Node {
    Node::content(text)
}

pub fn program(body: Vec<Node>) -> Program {
    Program::new(body)
}

pub fn mustache(helper: &str, params: Vec<Node>) -> Node {
    params
        .into_iter()
        .fold(MustacheStatement::new(helper), MustacheStatement::with_param)
        .into()
}

pub fn sub(helper: &str, params: Vec<Node>) -> SubExpression {
    params
        .into_iter()
        .fold(SubExpression::new(helper), SubExpression::with_param)
}

/// `{{#helper params}}body{{/helper}}` with no else branch.
pub fn block(helper: &str, params: Vec<Node>, body: Vec<Node>) -> BlockStatement {
    params
        .into_iter()
        .fold(BlockStatement::new(helper), BlockStatement::with_param)
        .with_program(Program::new(body))
}

pub fn partial(name: &str) -> PartialStatement {
    PartialStatement::new(PathExpression::new(name))
}

/// Serializes `tree` and checks it reproduces `expected` exactly.
pub fn assert_serializes<N: Into<Node>>(tree: N, expected: &str) {
    let tree = tree.into();
    assert_eq!(serialize(&tree), expected, "tree: {:#?}", tree);
}

/// The caller-side workaround for parsers that cannot read `((`: rewrite it
/// as a call to the placeholder helper `X` before parsing.
pub fn preprocess(content: &str) -> String {
    let mut content = content.to_string();
    while content.contains("((") {
        content = content.replace("((", "(X (");
    }
    content
}

/// Undoes [`preprocess`] on serialized output.
pub fn postprocess(content: &str) -> String {
    let mut content = content.to_string();
    while content.contains("(X (") {
        content = content.replace("(X (", "((");
    }
    content
}

pub fn generate_random_whitespace() -> String {
    let mut rng = rand::rng();
    let length = rng.random_range(0..10);
    (0..length)
        .map(|_| match rng.random_range(0..3) {
            0 => ' ',
            1 => '\n',
            _ => '\t',
        })
        .collect()
}
