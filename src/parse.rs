use std::fmt::{self, Display};

use swc_common::comments::{CommentKind, Comments};
use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    AssignOp, BinaryOp, ClassDecl, ClassMember, Decl, Expr, Lit, MemberProp, ModuleDecl,
    ModuleItem, Pat, PatOrExpr, PropName, Stmt, UnaryOp, VarDeclKind,
};

use crate::error::Error;
use crate::jsdoc::{self, DocComment};

/// Represents a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Type {
    /// The any type. This is the default type, used whenever nothing better is known.
    #[default]
    Any,

    /// A number type.
    Number,

    /// A string type.
    String,

    /// A boolean type.
    Boolean,

    /// Any other type, carried verbatim from its `@type` annotation.
    Named(String),
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => write!(f, "any"),
            Type::Number => write!(f, "number"),
            Type::String => write!(f, "string"),
            Type::Boolean => write!(f, "boolean"),
            Type::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Represents an expression annotated with location info.
#[derive(Debug, Clone)]
pub struct Ast {
    /// The variant of the expression.
    pub ast: AstNode,

    /// The location in the file of the expression.
    pub span: Span,
}

impl Ast {
    /// Whether this expression is a single literal token.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.ast,
            AstNode::Number { .. } | AstNode::Str { .. } | AstNode::Boolean(_) | AstNode::Null
        )
    }

    /// The type of this expression, if it is a literal with an obvious one.
    pub fn literal_type(&self) -> Option<Type> {
        match self.ast {
            AstNode::Number { .. } => Some(Type::Number),
            AstNode::Str { .. } => Some(Type::String),
            AstNode::Boolean(_) => Some(Type::Boolean),
            _ => None,
        }
    }
}

/// Represents the expression forms the converter understands.
#[derive(Debug, Clone)]
pub enum AstNode {
    /// A numeric value. This can be either an integer or a float.
    Number {
        /// The parsed value of the number.
        value: f64,

        /// The number as it appeared in the source (ie, `6e9` or `0x10`).
        raw: Option<String>,
    },

    /// A string value.
    Str {
        /// The decoded value of the string.
        value: String,

        /// The string as it appeared in the source, including quotes.
        raw: Option<String>,
    },

    /// A boolean value.
    Boolean(bool),

    /// The null literal.
    Null,

    /// An identifier (for variables and class names).
    Ident(String),

    /// A dot member access (ie, `obj.prop`).
    Member {
        /// The object whose member is accessed.
        obj: Box<Ast>,

        /// The member name.
        prop: String,
    },

    /// A unary operator.
    Unary {
        /// The operator being applied.
        op: UnaryOp,

        /// The argument of the operator.
        value: Box<Ast>,
    },

    /// An infix or binary operator.
    Binary {
        /// The operator being applied.
        op: BinaryOp,

        /// The left hand side.
        left: Box<Ast>,

        /// The right hand side.
        right: Box<Ast>,
    },

    /// The ternary operator (ie, cond ? then : elsy).
    Ternary {
        /// The condition of the operator.
        cond: Box<Ast>,

        /// The value on true.
        then: Box<Ast>,

        /// The value on false.
        elsy: Box<Ast>,
    },

    /// A function call.
    Call {
        /// The expression being called.
        callee: Box<Ast>,

        /// The arguments of the call.
        args: Vec<Ast>,
    },

    /// A constructor call (ie, `new Date()`).
    New {
        /// The constructor being called.
        callee: Box<Ast>,

        /// The arguments of the call.
        args: Vec<Ast>,
    },

    /// An array literal.
    Array(Vec<Ast>),

    /// An assignment in expression position.
    Assign {
        /// The identifier or member being assigned to.
        target: Box<Ast>,

        /// The expression to assign.
        value: Box<Ast>,
    },
}

impl Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}

/// Writes an operand of a unary, binary, or ternary operator, parenthesizing
/// the forms that would otherwise change meaning or mistokenize.
fn write_operand(f: &mut fmt::Formatter<'_>, ast: &Ast) -> fmt::Result {
    match ast.ast {
        AstNode::Binary { .. }
        | AstNode::Ternary { .. }
        | AstNode::Assign { .. }
        | AstNode::Unary { .. } => write!(f, "({})", ast),
        _ => write!(f, "{}", ast),
    }
}

/// Writes the object of a member access or the callee of a call, which only
/// admit primary expressions without parentheses.
fn write_primary(f: &mut fmt::Formatter<'_>, ast: &Ast) -> fmt::Result {
    match ast.ast {
        AstNode::Ident(_) | AstNode::Member { .. } | AstNode::Call { .. } | AstNode::New { .. } => {
            write!(f, "{}", ast)
        }
        _ => write!(f, "({})", ast),
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Ast]) -> fmt::Result {
    let mut first = true;
    for arg in args {
        if first {
            first = false;
        } else {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

impl Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Number { raw: Some(raw), .. } => write!(f, "{}", raw),
            AstNode::Number { value, .. } => write!(f, "{}", value),

            AstNode::Str { raw: Some(raw), .. } => write!(f, "{}", raw),
            AstNode::Str { value, .. } => {
                write!(f, "\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
            }

            AstNode::Boolean(v) => write!(f, "{}", v),
            AstNode::Null => write!(f, "null"),
            AstNode::Ident(var) => write!(f, "{}", var),

            AstNode::Member { obj, prop } => {
                write_primary(f, obj)?;
                write!(f, ".{}", prop)
            }

            AstNode::Unary { op, value } => {
                let op = op.to_string();
                // keyword operators like typeof need a separating space
                if op.ends_with(|c: char| c.is_ascii_alphabetic()) {
                    write!(f, "{} ", op)?;
                } else {
                    write!(f, "{}", op)?;
                }
                write_operand(f, value)
            }

            AstNode::Binary { op, left, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op)?;
                write_operand(f, right)
            }

            AstNode::Ternary { cond, then, elsy } => {
                match cond.ast {
                    AstNode::Ternary { .. } | AstNode::Assign { .. } => write!(f, "({})", cond)?,
                    _ => write!(f, "{}", cond)?,
                }
                write!(f, " ? {} : {}", then, elsy)
            }

            AstNode::Call { callee, args } => {
                write_primary(f, callee)?;
                write!(f, "(")?;
                write_args(f, args)?;
                write!(f, ")")
            }

            AstNode::New { callee, args } => {
                write!(f, "new ")?;
                write_primary(f, callee)?;
                write!(f, "(")?;
                write_args(f, args)?;
                write!(f, ")")
            }

            AstNode::Array(items) => {
                write!(f, "[")?;
                write_args(f, items)?;
                write!(f, "]")
            }

            AstNode::Assign { target, value } => write!(f, "{} = {}", target, value),
        }
    }
}

/// Represents a static member declared in a class body, either present in the
/// source or hoisted there by the migration.
#[derive(Debug, Clone)]
pub struct StaticMember {
    /// The member name.
    pub name: String,

    /// The declared type, if one is known.
    pub type_: Option<Type>,

    /// Whether the member is declared `readonly`.
    pub readonly: bool,

    /// The inline initializer, if any.
    pub init: Option<Ast>,
}

/// Represents a class declaration and its static members.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// The class name.
    pub name: String,

    /// Whether the class is exported from the module.
    pub exported: bool,

    /// The static members declared in the class body.
    pub members: Vec<StaticMember>,

    /// The location in the file of the class.
    pub span: Span,
}

/// Represents a top-level assignment to a member of some named object,
/// typically a class (ie, `SomeClass.prop = 0`).
#[derive(Debug, Clone)]
pub struct StaticAssign {
    /// The name of the object assigned into.
    pub class: String,

    /// The member name.
    pub prop: String,

    /// The assigned expression.
    pub value: Ast,

    /// The documentation annotation attached to the assignment, if any.
    pub doc: Option<DocComment>,

    /// The location in the file of the assignment statement.
    pub span: Span,
}

/// Represents a top-level module item.
#[derive(Debug, Clone)]
pub enum Item {
    /// A class declaration.
    Class(ClassDef),

    /// A member assignment statement.
    Assign(StaticAssign),

    /// A declaration (ie, var x = 2).
    Var {
        /// The declaration keyword used.
        kind: VarDeclKind,

        /// The variables declared, with their respective optional init values.
        vars: Vec<(String, Option<Ast>)>,

        /// The location in the file of the declaration.
        span: Span,
    },

    /// Any other expression statement, passed through unchanged.
    Expr(Ast),
}

/// Represents a parsed module as a flat list of items.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// The top-level items in source order.
    pub items: Vec<Item>,
}

/// Converts a [`swc_ecma_ast`] module body into a [`Program`], resolving the
/// documentation annotations attached to member assignments along the way.
pub fn parse(module: Vec<ModuleItem>, comments: &dyn Comments) -> Result<Program, Error> {
    let mut items = Vec::new();
    for item in module {
        match item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => match export.decl {
                Decl::Class(decl) => items.push(walk_class(decl, true)?),
                other => return Err(Error::unsupported("export declaration", other.span())),
            },
            ModuleItem::ModuleDecl(other) => {
                return Err(Error::unsupported("module declaration", other.span()))
            }
            ModuleItem::Stmt(statement) => {
                if let Some(item) = walk_statement(statement, comments)? {
                    items.push(item);
                }
            }
        }
    }
    Ok(Program { items })
}

fn walk_statement(statement: Stmt, comments: &dyn Comments) -> Result<Option<Item>, Error> {
    match statement {
        Stmt::Empty(_) => Ok(None),

        Stmt::Decl(Decl::Class(decl)) => walk_class(decl, false).map(Some),

        Stmt::Decl(Decl::Var(decl)) => {
            let mut vars = Vec::new();
            for declarator in decl.decls {
                match declarator.name {
                    Pat::Ident(name) => {
                        let init = declarator.init.map(|v| walk_expression(*v)).transpose()?;
                        vars.push((name.id.sym.to_string(), init));
                    }
                    other => return Err(Error::unsupported("destructuring pattern", other.span())),
                }
            }

            Ok(Some(Item::Var {
                kind: decl.kind,
                vars,
                span: decl.span,
            }))
        }

        Stmt::Decl(Decl::Fn(decl)) => {
            Err(Error::unsupported("function declaration", decl.function.span))
        }

        Stmt::Expr(statement) => {
            let span = statement.span;
            match *statement.expr {
                Expr::Assign(assign) if assign.op == AssignOp::Assign => {
                    let value = walk_expression(*assign.right)?;
                    match assign_target(assign.left)? {
                        Target::Static { class, prop } => {
                            let doc = leading_doc(comments, span.lo);
                            Ok(Some(Item::Assign(StaticAssign {
                                class,
                                prop,
                                value,
                                doc,
                                span,
                            })))
                        }
                        Target::Other(target) => Ok(Some(Item::Expr(Ast {
                            ast: AstNode::Assign {
                                target: Box::new(target),
                                value: Box::new(value),
                            },
                            span,
                        }))),
                    }
                }
                other => Ok(Some(Item::Expr(walk_expression(other)?))),
            }
        }

        other => Err(Error::unsupported("statement", other.span())),
    }
}

fn walk_class(decl: ClassDecl, exported: bool) -> Result<Item, Error> {
    let name = decl.ident.sym.to_string();
    let class = decl.class;
    let span = class.span;
    let mut members = Vec::new();

    for member in class.body {
        match member {
            ClassMember::Empty(_) => (),

            ClassMember::ClassProp(prop) if prop.is_static => {
                let name = match prop.key {
                    PropName::Ident(id) => id.sym.to_string(),
                    other => {
                        return Err(Error::unsupported("non-identifier member name", other.span()))
                    }
                };
                let init = prop.value.map(|v| walk_expression(*v)).transpose()?;
                members.push(StaticMember {
                    name,
                    type_: None,
                    readonly: prop.readonly,
                    init,
                });
            }

            ClassMember::ClassProp(prop) => {
                return Err(Error::unsupported("instance property", prop.span))
            }
            ClassMember::Constructor(ctor) => {
                return Err(Error::unsupported("constructor", ctor.span))
            }
            ClassMember::Method(method) => {
                return Err(Error::unsupported("class method", method.span))
            }
            other => return Err(Error::unsupported("class member", other.span())),
        }
    }

    Ok(Item::Class(ClassDef {
        name,
        exported,
        members,
        span,
    }))
}

/// The normalized target of an assignment.
enum Target {
    /// An `Ident.prop` target, a candidate for static member migration.
    Static {
        /// The receiver name.
        class: String,

        /// The member name.
        prop: String,
    },

    /// Any other supported target, kept as a plain expression.
    Other(Ast),
}

fn assign_target(left: PatOrExpr) -> Result<Target, Error> {
    let target = match left {
        PatOrExpr::Pat(pat) => match *pat {
            Pat::Ident(name) => {
                return Ok(Target::Other(Ast {
                    ast: AstNode::Ident(name.id.sym.to_string()),
                    span: name.id.span,
                }))
            }
            Pat::Expr(expr) => *expr,
            other => return Err(Error::unsupported("destructuring assignment", other.span())),
        },
        PatOrExpr::Expr(expr) => *expr,
    };

    match target {
        Expr::Member(member) => {
            let prop = match member.prop {
                MemberProp::Ident(id) => id.sym.to_string(),
                other => {
                    return Err(Error::unsupported(
                        "non-identifier member assignment",
                        other.span(),
                    ))
                }
            };
            match *member.obj {
                Expr::Ident(obj) => Ok(Target::Static {
                    class: obj.sym.to_string(),
                    prop,
                }),
                other => {
                    let obj = walk_expression(other)?;
                    Ok(Target::Other(Ast {
                        ast: AstNode::Member {
                            obj: Box::new(obj),
                            prop,
                        },
                        span: member.span,
                    }))
                }
            }
        }
        Expr::Ident(id) => Ok(Target::Other(Ast {
            ast: AstNode::Ident(id.sym.to_string()),
            span: id.span,
        })),
        other => Err(Error::unsupported("assignment target", other.span())),
    }
}

fn walk_expression(expression: Expr) -> Result<Ast, Error> {
    match expression {
        Expr::Unary(unary) => {
            let value = walk_expression(*unary.arg)?;
            Ok(Ast {
                ast: AstNode::Unary {
                    op: unary.op,
                    value: Box::new(value),
                },
                span: unary.span,
            })
        }

        Expr::Bin(bin) => {
            let left = walk_expression(*bin.left)?;
            let right = walk_expression(*bin.right)?;
            Ok(Ast {
                ast: AstNode::Binary {
                    op: bin.op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span: bin.span,
            })
        }

        Expr::Cond(ternary) => {
            let cond = walk_expression(*ternary.test)?;
            let then = walk_expression(*ternary.cons)?;
            let elsy = walk_expression(*ternary.alt)?;
            Ok(Ast {
                ast: AstNode::Ternary {
                    cond: Box::new(cond),
                    then: Box::new(then),
                    elsy: Box::new(elsy),
                },
                span: ternary.span,
            })
        }

        Expr::Assign(assign) if assign.op == AssignOp::Assign => {
            let span = assign.span;
            let value = walk_expression(*assign.right)?;
            let target = match assign_target(assign.left)? {
                Target::Other(target) => target,
                Target::Static { class, prop } => Ast {
                    ast: AstNode::Member {
                        obj: Box::new(Ast {
                            ast: AstNode::Ident(class),
                            span,
                        }),
                        prop,
                    },
                    span,
                },
            };
            Ok(Ast {
                ast: AstNode::Assign {
                    target: Box::new(target),
                    value: Box::new(value),
                },
                span,
            })
        }

        Expr::Assign(assign) => Err(Error::unsupported("compound assignment", assign.span)),

        Expr::Member(member) => {
            let prop = match member.prop {
                MemberProp::Ident(id) => id.sym.to_string(),
                other => return Err(Error::unsupported("computed member access", other.span())),
            };
            let obj = walk_expression(*member.obj)?;
            Ok(Ast {
                ast: AstNode::Member {
                    obj: Box::new(obj),
                    prop,
                },
                span: member.span,
            })
        }

        Expr::Call(call) => {
            let callee = match call.callee {
                swc_ecma_ast::Callee::Expr(expr) => walk_expression(*expr)?,
                other => return Err(Error::unsupported("call target", other.span())),
            };
            let args = walk_call_args(call.args)?;
            Ok(Ast {
                ast: AstNode::Call {
                    callee: Box::new(callee),
                    args,
                },
                span: call.span,
            })
        }

        Expr::New(new) => {
            let callee = walk_expression(*new.callee)?;
            let args = walk_call_args(new.args.unwrap_or_default())?;
            Ok(Ast {
                ast: AstNode::New {
                    callee: Box::new(callee),
                    args,
                },
                span: new.span,
            })
        }

        Expr::Array(array) => {
            let mut items = Vec::new();
            for element in array.elems {
                match element {
                    Some(element) if element.spread.is_none() => {
                        items.push(walk_expression(*element.expr)?)
                    }
                    Some(element) => {
                        return Err(Error::unsupported("spread element", element.expr.span()))
                    }
                    None => return Err(Error::unsupported("array hole", array.span)),
                }
            }
            Ok(Ast {
                ast: AstNode::Array(items),
                span: array.span,
            })
        }

        Expr::Ident(var) => Ok(Ast {
            ast: AstNode::Ident(var.sym.to_string()),
            span: var.span,
        }),

        Expr::Lit(lit) => match lit {
            Lit::Num(n) => Ok(Ast {
                ast: AstNode::Number {
                    value: n.value,
                    raw: n.raw.as_ref().map(|raw| raw.to_string()),
                },
                span: n.span,
            }),

            Lit::Str(s) => Ok(Ast {
                ast: AstNode::Str {
                    value: s.value.to_string(),
                    raw: s.raw.as_ref().map(|raw| raw.to_string()),
                },
                span: s.span,
            }),

            Lit::Bool(b) => Ok(Ast {
                ast: AstNode::Boolean(b.value),
                span: b.span,
            }),

            Lit::Null(n) => Ok(Ast {
                ast: AstNode::Null,
                span: n.span,
            }),

            other => Err(Error::unsupported("literal", other.span())),
        },

        Expr::Paren(paren) => walk_expression(*paren.expr),

        Expr::This(this) => Err(Error::unsupported("this expression", this.span)),
        Expr::Object(object) => Err(Error::unsupported("object literal", object.span)),
        Expr::Fn(function) => {
            Err(Error::unsupported("function expression", function.function.span))
        }
        Expr::Arrow(arrow) => Err(Error::unsupported("arrow function", arrow.span)),
        Expr::Tpl(template) => Err(Error::unsupported("template literal", template.span)),
        Expr::Class(class) => Err(Error::unsupported("class expression", class.class.span)),

        other => Err(Error::unsupported("expression", other.span())),
    }
}

fn walk_call_args(args: Vec<swc_ecma_ast::ExprOrSpread>) -> Result<Vec<Ast>, Error> {
    let mut out = Vec::new();
    for arg in args {
        if arg.spread.is_some() {
            return Err(Error::unsupported("spread argument", arg.expr.span()));
        }
        out.push(walk_expression(*arg.expr)?);
    }
    Ok(out)
}

/// Finds the documentation annotation attached to the statement starting at
/// `pos`: the last leading `/** ... */` block comment, if any.
fn leading_doc(comments: &dyn Comments, pos: BytePos) -> Option<DocComment> {
    let leading = comments.get_leading(pos)?;
    leading
        .iter()
        .rev()
        .find(|c| c.kind == CommentKind::Block && c.text.starts_with('*'))
        .map(|c| jsdoc::parse_doc(&c.text))
}
