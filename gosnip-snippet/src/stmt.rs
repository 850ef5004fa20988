//! Statements.

use crate::{Body, CanAddr, DeclSpec, Ident, Node, Snippet, snippet::write_joined};

/// `select {` followed by its clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    clauses: Vec<Clause>,
}

impl Select {
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: clauses.into_iter().collect(),
        }
    }

    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }
}

impl Snippet for Select {
    fn write_to(&self, out: &mut String) {
        out.push_str("select {\n");
        for clause in &self.clauses {
            clause.write_to(out);
        }
        out.push('}');
    }
}

/// `switch [init; ]cond {`. The init statement is only written when there
/// is a condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Switch {
    init: Option<Box<Node>>,
    cond: Option<Box<Node>>,
    clauses: Vec<Clause>,
}

impl Switch {
    pub fn new(cond: impl Into<Node>) -> Self {
        Self {
            cond: Some(Box::new(cond.into())),
            ..Self::default()
        }
    }

    /// A `switch` without a tag, whose cases are boolean expressions.
    pub fn bare() -> Self {
        Self::default()
    }

    pub fn init(mut self, init: impl Into<Node>) -> Self {
        self.init = Some(Box::new(init.into()));
        self
    }

    /// Replace the clauses.
    pub fn when(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.clauses = clauses.into_iter().collect();
        self
    }

    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }
}

impl Snippet for Switch {
    fn write_to(&self, out: &mut String) {
        out.push_str("switch");

        if let Some(cond) = &self.cond {
            if let Some(init) = &self.init {
                out.push(' ');
                init.write_to(out);
                out.push(';');
            }
            out.push(' ');
            cond.write_to(out);
        }

        out.push_str(" {\n");
        for clause in &self.clauses {
            clause.write_to(out);
        }
        out.push('}');
    }
}

/// A `case a, b:` clause of a switch or select; `default:` when the list is
/// empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clause {
    list: Vec<Node>,
    body: Vec<Node>,
}

impl Clause {
    pub fn new<I, N>(list: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Self {
            list: list.into_iter().map(Into::into).collect(),
            body: Vec::new(),
        }
    }

    pub fn case(expr: impl Into<Node>) -> Self {
        let expr: Node = expr.into();
        Self::new([expr])
    }

    pub fn default_case() -> Self {
        Self::default()
    }

    pub fn body<I, N>(mut self, stmts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.body = stmts.into_iter().map(Into::into).collect();
        self
    }

    pub fn stmt(mut self, stmt: impl Into<Node>) -> Self {
        self.body.push(stmt.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.list.is_empty()
    }
}

impl Snippet for Clause {
    fn write_to(&self, out: &mut String) {
        if self.list.is_empty() {
            out.push_str("default");
        } else {
            out.push_str("case ");
            write_joined(out, &self.list, ", ");
        }
        out.push(':');

        for stmt in &self.body {
            out.push('\n');
            stmt.write_to(out);
        }
        out.push('\n');
    }
}

/// `for [key[, value] := ]range x {`
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    key: Option<Ident>,
    value: Option<Ident>,
    x: Box<Node>,
    body: Body,
}

impl Range {
    pub fn new(x: impl Into<Node>) -> Self {
        Self {
            key: None,
            value: None,
            x: Box::new(x.into()),
            body: Body::default(),
        }
    }

    pub fn key(mut self, key: Ident) -> Self {
        self.key = Some(key);
        self
    }

    pub fn value(mut self, value: Ident) -> Self {
        self.value = Some(value);
        self
    }

    pub fn body<I, N>(mut self, stmts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.body = Body::new(stmts);
        self
    }
}

impl Snippet for Range {
    fn write_to(&self, out: &mut String) {
        out.push_str("for ");

        if let Some(key) = &self.key {
            key.write_to(out);
        }
        if let Some(value) = &self.value {
            out.push_str(", ");
            value.write_to(out);
        }
        if self.key.is_some() || self.value.is_some() {
            out.push_str(" := ");
        }

        out.push_str("range ");
        self.x.write_to(out);
        out.push(' ');
        self.body.write_to(out);
    }
}

/// `for [init;] [cond][; post] {`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct For {
    init: Option<Box<Node>>,
    cond: Option<Box<Node>>,
    post: Option<Box<Node>>,
    body: Body,
}

impl For {
    /// An infinite loop, `for {`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loop guarded by a condition only.
    pub fn cond(cond: impl Into<Node>) -> Self {
        Self::new().with_cond(cond)
    }

    pub fn with_init(mut self, init: impl Into<Node>) -> Self {
        self.init = Some(Box::new(init.into()));
        self
    }

    pub fn with_cond(mut self, cond: impl Into<Node>) -> Self {
        self.cond = Some(Box::new(cond.into()));
        self
    }

    pub fn with_post(mut self, post: impl Into<Node>) -> Self {
        self.post = Some(Box::new(post.into()));
        self
    }

    pub fn body<I, N>(mut self, stmts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.body = Body::new(stmts);
        self
    }
}

impl Snippet for For {
    fn write_to(&self, out: &mut String) {
        out.push_str("for");

        if let Some(init) = &self.init {
            out.push(' ');
            init.write_to(out);
            out.push(';');
        }
        if let Some(cond) = &self.cond {
            out.push(' ');
            cond.write_to(out);
        }
        if let Some(post) = &self.post {
            out.push_str("; ");
            post.write_to(out);
        }

        out.push(' ');
        self.body.write_to(out);
    }
}

/// `if [init; ]cond {` with optional `else if` / `else` branches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct If {
    init: Option<Box<Node>>,
    cond: Option<Box<Node>>,
    body: Body,
    else_list: Vec<If>,
}

impl If {
    pub fn new(cond: impl Into<Node>) -> Self {
        Self {
            cond: Some(Box::new(cond.into())),
            ..Self::default()
        }
    }

    /// A condition-less branch, used as the final `else`.
    pub fn bare() -> Self {
        Self::default()
    }

    pub fn init(mut self, init: impl Into<Node>) -> Self {
        self.init = Some(Box::new(init.into()));
        self
    }

    pub fn without_init(mut self) -> Self {
        self.init = None;
        self
    }

    pub fn body<I, N>(mut self, stmts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.body = Body::new(stmts);
        self
    }

    /// Append an else branch. Else branches cannot carry an init statement,
    /// so it is dropped.
    pub fn or_else(mut self, branch: If) -> Self {
        self.else_list.push(branch.without_init());
        self
    }
}

impl Snippet for If {
    fn write_to(&self, out: &mut String) {
        if self.cond.is_some() {
            out.push_str("if");
        }
        if let Some(init) = &self.init {
            out.push(' ');
            init.write_to(out);
            out.push(';');
        }
        if let Some(cond) = &self.cond {
            out.push(' ');
            cond.write_to(out);
        }

        out.push(' ');
        self.body.write_to(out);

        for branch in &self.else_list {
            out.push_str(" else");
            if branch.cond.is_some() {
                out.push(' ');
            }
            branch.write_to(out);
        }
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignToken {
    Define,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
}

impl AssignToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignToken::Define => ":=",
            AssignToken::Assign => "=",
            AssignToken::AddAssign => "+=",
            AssignToken::SubAssign => "-=",
            AssignToken::MulAssign => "*=",
            AssignToken::QuoAssign => "/=",
            AssignToken::RemAssign => "%=",
            AssignToken::AndAssign => "&=",
            AssignToken::OrAssign => "|=",
            AssignToken::XorAssign => "^=",
            AssignToken::ShlAssign => "<<=",
            AssignToken::ShrAssign => ">>=",
            AssignToken::AndNotAssign => "&^=",
        }
    }
}

/// `lhs[, ...] <tok> rhs[, ...]`. Without a right-hand side only the
/// left-hand side is written, which is how const specs after the first
/// repeat the previous expression.
///
/// ```
/// use gosnip_snippet::{Assign, Ident, Lit, Snippet};
///
/// let stmt = Assign::define(Ident::new("a").unwrap())
///     .and(Ident::new("b").unwrap())
///     .value(Lit::string("1"))
///     .value(Lit::int(1));
/// assert_eq!(stmt.render(), r#"a, b := "1", 1"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    token: AssignToken,
    lhs: Vec<Node>,
    rhs: Vec<Node>,
}

impl Assign {
    pub fn with_token(token: AssignToken, lhs: impl CanAddr) -> Self {
        Self {
            token,
            lhs: vec![lhs.into()],
            rhs: Vec::new(),
        }
    }

    /// `lhs := ...`
    pub fn define(lhs: impl CanAddr) -> Self {
        Self::with_token(AssignToken::Define, lhs)
    }

    /// `lhs = ...`
    pub fn assign(lhs: impl CanAddr) -> Self {
        Self::with_token(AssignToken::Assign, lhs)
    }

    /// Add another assignment target.
    pub fn and(mut self, lhs: impl CanAddr) -> Self {
        self.lhs.push(lhs.into());
        self
    }

    /// Add a right-hand side value.
    pub fn value(mut self, rhs: impl Into<Node>) -> Self {
        self.rhs.push(rhs.into());
        self
    }

    /// Replace the right-hand side.
    pub fn by<I, N>(mut self, rhs: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.rhs = rhs.into_iter().map(Into::into).collect();
        self
    }
}

impl Snippet for Assign {
    fn write_to(&self, out: &mut String) {
        write_joined(out, &self.lhs, ", ");

        if !self.rhs.is_empty() {
            out.push(' ');
            out.push_str(self.token.as_str());
            out.push(' ');
            write_joined(out, &self.rhs, ", ");
        }
    }
}

impl DeclSpec for Assign {}

/// `return[ a[, b]]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Return {
    results: Vec<Node>,
}

impl Return {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values<I, N>(results: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Self {
            results: results.into_iter().map(Into::into).collect(),
        }
    }

    pub fn value(mut self, result: impl Into<Node>) -> Self {
        self.results.push(result.into());
        self
    }
}

impl Snippet for Return {
    fn write_to(&self, out: &mut String) {
        out.push_str("return");
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push(' ');
            result.write_to(out);
        }
    }
}
