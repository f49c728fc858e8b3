use crate::{ExpressionSyntax, IriRef, PatternSyntax, TermSyntax, TripleSyntax, ValuesClause};
use sparql_algebra_model::Variable;

/// A `BASE` or `PREFIX` declaration of the prologue.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContextDefinition {
    /// `BASE <iri>`. The IRI may itself be relative to a previous base.
    Base(String),
    /// `PREFIX prefix: <iri>`.
    Prefix { prefix: String, iri: String },
}

impl ContextDefinition {
    pub fn base(iri: impl Into<String>) -> Self {
        ContextDefinition::Base(iri.into())
    }

    pub fn prefix(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        ContextDefinition::Prefix {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// A SPARQL query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuerySyntax {
    pub context: Vec<ContextDefinition>,
    pub form: QueryForm,
    pub dataset: Option<DatasetClause>,
    /// The patterns of the `WHERE` group. Empty for a `DESCRIBE` without `WHERE`.
    pub where_clause: Vec<PatternSyntax>,
    pub modifiers: SolutionModifiers,
    /// The trailing `VALUES` block.
    pub values: Option<ValuesClause>,
}

impl QuerySyntax {
    /// Creates a query of the given form without prologue, dataset, or solution modifiers.
    pub fn new(form: QueryForm, where_clause: Vec<PatternSyntax>) -> Self {
        Self {
            context: Vec::new(),
            form,
            dataset: None,
            where_clause,
            modifiers: SolutionModifiers::default(),
            values: None,
        }
    }

    /// `SELECT ?a ?b WHERE { ... }`
    pub fn select(variables: Vec<Variable>, where_clause: Vec<PatternSyntax>) -> Self {
        let items = variables.into_iter().map(SelectItem::Variable).collect();
        Self::new(
            QueryForm::Select {
                selection: Selection::Items(items),
                modifier: None,
            },
            where_clause,
        )
    }

    /// `SELECT * WHERE { ... }`
    pub fn select_all(where_clause: Vec<PatternSyntax>) -> Self {
        Self::new(
            QueryForm::Select {
                selection: Selection::Wildcard,
                modifier: None,
            },
            where_clause,
        )
    }

    pub fn ask(where_clause: Vec<PatternSyntax>) -> Self {
        Self::new(QueryForm::Ask, where_clause)
    }

    pub fn is_select(&self) -> bool {
        matches!(self.form, QueryForm::Select { .. })
    }
}

/// The form of a query and its form-specific parts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryForm {
    Select {
        selection: Selection,
        modifier: Option<SelectModifier>,
    },
    Construct {
        template: Vec<TripleSyntax>,
    },
    Ask,
    Describe {
        terms: DescribeTarget,
    },
}

/// The projection of a `SELECT` query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    /// `SELECT *`
    Wildcard,
    Items(Vec<SelectItem>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectItem {
    Variable(Variable),
    /// `(expression AS ?variable)`
    Expression {
        expression: ExpressionSyntax,
        variable: Variable,
    },
}

impl SelectItem {
    pub fn variable(&self) -> &Variable {
        match self {
            SelectItem::Variable(variable) | SelectItem::Expression { variable, .. } => variable,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectModifier {
    Distinct,
    Reduced,
}

/// The resources described by a `DESCRIBE` query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DescribeTarget {
    /// `DESCRIBE *`
    Wildcard,
    Terms(Vec<TermSyntax>),
}

/// `FROM` and `FROM NAMED` clauses, or `USING` and `USING NAMED` clauses of an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DatasetClause {
    pub default: Vec<IriRef>,
    pub named: Vec<IriRef>,
}

impl DatasetClause {
    pub fn is_empty(&self) -> bool {
        self.default.is_empty() && self.named.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SolutionModifiers {
    pub group: Vec<GroupCondition>,
    pub having: Vec<ExpressionSyntax>,
    pub order: Vec<OrderCondition>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// A `GROUP BY` condition: `?v`, `expression`, or `(expression AS ?v)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupCondition {
    pub expression: ExpressionSyntax,
    pub variable: Option<Variable>,
}

impl GroupCondition {
    pub fn variable(variable: Variable) -> Self {
        Self {
            expression: ExpressionSyntax::from(variable),
            variable: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderCondition {
    pub expression: ExpressionSyntax,
    pub descending: bool,
}

impl OrderCondition {
    pub fn asc(expression: ExpressionSyntax) -> Self {
        Self {
            expression,
            descending: false,
        }
    }

    pub fn desc(expression: ExpressionSyntax) -> Self {
        Self {
            expression,
            descending: true,
        }
    }
}
