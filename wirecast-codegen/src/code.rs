//! Code model for generated Rust units.
//!
//! Synthesizers build these values and [`crate::printer::Printer`] turns
//! them into source text. Types and paths are carried as source strings;
//! only the structure that affects layout is modelled.

/// A complete generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unit {
    /// Line comments printed before any item.
    pub header: Vec<String>,
    /// Top-level items.
    pub items: Vec<Item>,
}

/// A top-level or module-level item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Enum declaration.
    Enum(EnumDef),
    /// Inherent or trait impl block.
    Impl(ImplBlock),
    /// Struct declaration with named fields.
    Struct(StructDef),
    /// Inline module.
    Module(Module),
    /// Free function.
    Function(Function),
    /// `use` declaration; the path excludes `use` and the semicolon.
    Use(String),
}

/// Enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub docs: Vec<String>,
    pub attrs: Vec<String>,
    pub name: String,
    pub variants: Vec<Variant>,
}

/// Enum variant without fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub docs: Vec<String>,
    pub attrs: Vec<String>,
    pub name: String,
    /// Explicit discriminant, if any.
    pub discriminant: Option<i64>,
}

/// Struct declaration with private named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub docs: Vec<String>,
    pub attrs: Vec<String>,
    pub public: bool,
    pub name: String,
    pub fields: Vec<Param>,
}

/// `impl [Trait for] Target { .. }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplBlock {
    pub trait_name: Option<String>,
    pub target: String,
    pub functions: Vec<Function>,
}

/// Function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub docs: Vec<String>,
    pub attrs: Vec<String>,
    pub public: bool,
    pub name: String,
    pub params: Vec<Param>,
    pub ret: Option<String>,
    pub body: Block,
}

impl Function {
    /// Creates a private function with no parameters and an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            docs: Vec::new(),
            attrs: Vec::new(),
            public: false,
            name: name.into(),
            params: Vec::new(),
            ret: None,
            body: Block::default(),
        }
    }
}

/// `name: Type` pair used for parameters and struct fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// By-value `self` receiver, printed without a type.
    pub fn self_value() -> Self {
        Self::new("self", "Self")
    }

    /// Returns true for a by-value `self` receiver.
    #[must_use]
    pub fn is_self_value(&self) -> bool {
        self.name == "self" && self.ty == "Self"
    }
}

/// Inline module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub attrs: Vec<String>,
    pub name: String,
    pub items: Vec<Item>,
}

/// Brace-delimited statement list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

/// Statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `let [mut] name[: ty] = value;`
    Let {
        mutable: bool,
        name: String,
        ty: Option<String>,
        value: Expr,
    },
    /// `let pattern = value else { .. };`
    LetElse {
        pattern: String,
        value: Expr,
        otherwise: Block,
    },
    /// Expression followed by a semicolon.
    Expr(Expr),
    /// Trailing expression without a semicolon.
    Tail(Expr),
    /// `return [value];`
    Return(Option<Expr>),
    /// `for pattern in iter { .. }`
    For {
        pattern: String,
        iter: Expr,
        body: Block,
    },
    /// Line comment.
    Comment(String),
    /// Empty line.
    Blank,
}

/// Expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Source text printed as is.
    Raw(String),
    /// `func(args)`
    Call { func: String, args: Vec<Expr> },
    /// `receiver.method(args)`
    Method {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// `base.name`
    Field { base: Box<Expr>, name: String },
    /// `target = value`
    Assign { target: Box<Expr>, value: Box<Expr> },
    /// `match scrutinee { .. }`
    Match { scrutinee: Box<Expr>, arms: Vec<Arm> },
    /// `[a, b]`, one element per line.
    Array(Vec<Expr>),
    /// `(a, b)`, one element per line when any element spans lines.
    Tuple(Vec<Expr>),
    /// `Name { field: value }`, one field per line.
    StructLit {
        name: String,
        fields: Vec<(String, Expr)>,
    },
    /// `name!(args)`
    Macro { name: String, args: Vec<Expr> },
    /// String literal.
    Str(String),
}

impl Expr {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            func: func.into(),
            args,
        }
    }

    pub fn method(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Method {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        }
    }

    pub fn field(base: Expr, name: impl Into<String>) -> Self {
        Self::Field {
            base: Box::new(base),
            name: name.into(),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn macro_call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Macro {
            name: name.into(),
            args,
        }
    }

    /// Returns true when the printed form spans several lines.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        match self {
            Self::Array(items) => !items.is_empty(),
            Self::StructLit { fields, .. } => !fields.is_empty(),
            Self::Match { .. } => true,
            Self::Tuple(items) => items.iter().any(Self::is_multiline),
            _ => false,
        }
    }
}

/// Match arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arm {
    pub pattern: String,
    pub body: Expr,
}

impl Arm {
    pub fn new(pattern: impl Into<String>, body: Expr) -> Self {
        Self {
            pattern: pattern.into(),
            body,
        }
    }
}
