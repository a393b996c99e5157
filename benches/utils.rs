use rand::{Rng, SeedableRng, rngs::StdRng};
use restache::{BlockStatement, MustacheStatement, Node, Program, SubExpression};

/// Generate n random template trees to use in the benchmark
pub fn generate_random_trees(n: usize) -> Vec<Node> {
    let mut rng = StdRng::seed_from_u64(42); // Fixed seed for reproducibility
    (0..n).map(|_| random_program(&mut rng, 3).into()).collect()
}

fn random_program(rng: &mut StdRng, depth: usize) -> Program {
    let len = rng.random_range(2..8);
    Program::new((0..len).map(|_| random_statement(rng, depth)).collect())
}

fn random_statement(rng: &mut StdRng, depth: usize) -> Node {
    match rng.random_range(0..4) {
        0 => Node::content(random_string(rng, 5, 20)),
        1 => MustacheStatement::new(random_string(rng, 3, 8))
            .with_param(random_expression(rng, depth))
            .into(),
        2 if depth > 0 => {
            let mut block = BlockStatement::new("if")
                .with_param(random_expression(rng, depth))
                .with_program(random_program(rng, depth.saturating_sub(1)));
            if rng.random_bool(0.5) {
                block = block.with_inverse(random_program(rng, depth.saturating_sub(1)));
            }
            block.into()
        }
        _ => Node::path(random_string(rng, 3, 8)),
    }
}

fn random_expression(rng: &mut StdRng, depth: usize) -> Node {
    match rng.random_range(0..4) {
        0 if depth > 0 => SubExpression::new("filter")
            .with_param(Node::path(random_string(rng, 3, 8)))
            .with_param(random_expression(rng, depth.saturating_sub(1)))
            .into(),
        1 => Node::number(f64::from(rng.random_range(0..1000u32))),
        2 => Node::string(random_string(rng, 3, 8)),
        _ => Node::path(random_string(rng, 3, 8)),
    }
}

/// Generate a random string with length between min and max
fn random_string(rng: &mut StdRng, min_len: usize, max_len: usize) -> String {
    let charset = "abcdefghijklmnopqrstuvwxyz";
    let len = rng.random_range(min_len..=max_len);

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset.chars().nth(idx).unwrap()
        })
        .collect()
}
