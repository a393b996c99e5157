use crate::UnparseResult;
use crate::ast::{Node, NodeType};
use crate::error::UnparseError;

/// A rewrite applied to the rendered text of a targeted parameter.
pub type Modifier = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Wraps `text` in single quotes, turning a subexpression into a string
/// literal for consumers that expect a string-encoded predicate.
pub fn quote_single(text: &str) -> String {
    format!("'{}'", text)
}

/// `Options` describes a single targeting rule: which positional argument of
/// which helper call should be rewritten, and how.
///
/// Matching is structural. Every subexpression calling `helper` has its
/// `param_position`-th argument (1-based) passed through `modifiers`, in
/// order, wherever it sits in the tree, provided that argument is itself a
/// node of type `param_type`. Only rules whose `param_type` is
/// [`NodeType::SubExpression`] ever match.
///
/// # Example
///
/// ```
/// use restache::{Node, NodeType, Options, SubExpression, quote_single, serialize_with};
///
/// let options = Options::target("filter", NodeType::SubExpression, 2)
///     .unwrap()
///     .with_modifier(quote_single);
///
/// let call = SubExpression::new("filter")
///     .with_param(Node::path("items"))
///     .with_param(
///         SubExpression::new("id")
///             .with_param(Node::path("gt"))
///             .with_param(Node::number(123.0)),
///     );
///
/// assert_eq!(
///     serialize_with(&call.into(), &options),
///     "(filter items '(id gt 123)')"
/// );
/// ```
pub struct Options {
    helper: String,
    param_type: NodeType,
    param_position: usize,
    modifiers: Vec<Modifier>,
}

impl Options {
    /// Creates a rule with no modifiers.
    ///
    /// # Errors
    /// - If `helper` is empty.
    /// - If `param_position` is zero.
    pub fn target<T: Into<String>>(
        helper: T,
        param_type: NodeType,
        param_position: usize,
    ) -> UnparseResult<Self> {
        let helper = helper.into();
        if helper.is_empty() {
            return Err(UnparseError::EmptyHelperName);
        }
        if param_position == 0 {
            return Err(UnparseError::InvalidParamPosition {
                position: param_position,
            });
        }

        Ok(Self {
            helper,
            param_type,
            param_position,
            modifiers: Vec::new(),
        })
    }

    /// Appends a modifier. Modifiers run in the order they were added.
    #[must_use]
    pub fn with_modifier<F>(mut self, modifier: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.modifiers.push(Box::new(modifier));
        self
    }

    /// Name of the helper whose calls are targeted.
    pub fn helper(&self) -> &str {
        &self.helper
    }

    /// Node type the targeted argument must have.
    pub const fn param_type(&self) -> NodeType {
        self.param_type
    }

    /// 1-based position of the targeted argument.
    pub const fn param_position(&self) -> usize {
        self.param_position
    }

    /// Modifiers in the order they run.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Whether `param`, argument `position` (1-based) of a subexpression
    /// calling `helper`, is the one this rule targets.
    pub(crate) fn targets(&self, helper: &str, position: usize, param: &Node) -> bool {
        self.param_type == NodeType::SubExpression
            && self.param_position == position
            && param.node_type() == Some(self.param_type)
            && self.helper == helper
    }

    pub(crate) fn apply(&self, rendered: String) -> String {
        self.modifiers
            .iter()
            .fold(rendered, |text, modifier| modifier(text.as_str()))
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("helper", &self.helper)
            .field("param_type", &self.param_type)
            .field("param_position", &self.param_position)
            .field("modifiers", &self.modifiers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SubExpression;

    #[test]
    #[ntest::timeout(100)]
    fn test_target_rejects_empty_helper() {
        let err = Options::target("", NodeType::SubExpression, 1).unwrap_err();
        assert_eq!(err, UnparseError::EmptyHelperName);
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_target_rejects_position_zero() {
        let err = Options::target("filter", NodeType::SubExpression, 0).unwrap_err();
        assert_eq!(err, UnparseError::InvalidParamPosition { position: 0 });
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_targets_matches_helper_and_position() {
        let options = Options::target("filter", NodeType::SubExpression, 2).unwrap();
        let call: Node = SubExpression::new("id").into();
        assert!(options.targets("filter", 2, &call));
        assert!(!options.targets("filter", 1, &call));
        assert!(!options.targets("sort", 2, &call));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_targets_requires_matching_param_type() {
        let options = Options::target("filter", NodeType::SubExpression, 2).unwrap();
        assert!(!options.targets("filter", 2, &Node::path("items")));
        assert!(!options.targets("filter", 2, &Node::string("items")));
        assert!(!options.targets("filter", 2, &Node::number(2.0)));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_non_subexpression_rule_never_matches() {
        let options = Options::target("filter", NodeType::PathExpression, 2).unwrap();
        assert!(!options.targets("filter", 2, &Node::path("items")));
        assert!(!options.targets("filter", 2, &SubExpression::new("id").into()));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_accessors_report_the_rule() {
        let options = Options::target("filter", NodeType::SubExpression, 2).unwrap();
        assert_eq!(options.helper(), "filter");
        assert_eq!(options.param_type(), NodeType::SubExpression);
        assert_eq!(options.param_position(), 2);
        assert!(options.modifiers().is_empty());
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_modifiers_apply_in_order() {
        let options = Options::target("filter", NodeType::SubExpression, 1)
            .unwrap()
            .with_modifier(|text| format!("{}!", text))
            .with_modifier(quote_single);

        assert_eq!(options.apply("(a)".to_string()), "'(a)!'");
        assert_eq!(options.modifiers().len(), 2);
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_no_modifiers_is_identity() {
        let options = Options::target("filter", NodeType::SubExpression, 1).unwrap();
        assert_eq!(options.apply("(a)".to_string()), "(a)");
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_debug_hides_closures() {
        let options = Options::target("filter", NodeType::SubExpression, 2)
            .unwrap()
            .with_modifier(quote_single);
        let debug = format!("{:?}", options);
        assert!(debug.contains("helper: \"filter\""));
        assert!(debug.contains("modifiers: 1"));
    }
}
