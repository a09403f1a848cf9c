use std::fmt::{self, Display, Write};

use swc_ecma_ast::VarDeclKind;

use crate::parse::{ClassDef, Item, Program, StaticMember};

impl Display for StaticMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "static ")?;
        if self.readonly {
            write!(f, "readonly ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(type_) = &self.type_ {
            write!(f, ": {}", type_)?;
        }
        if let Some(init) = &self.init {
            write!(f, " = {}", init)?;
        }
        write!(f, ";")
    }
}

impl Display for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exported {
            write!(f, "export ")?;
        }
        if self.members.is_empty() {
            return write!(f, "class {} {{}}", self.name);
        }
        writeln!(f, "class {} {{", self.name)?;
        for member in &self.members {
            writeln!(f, "  {}", member)?;
        }
        write!(f, "}}")
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Class(class) => write!(f, "{}", class),

            Item::Assign(assign) => {
                write!(f, "{}.{} = {};", assign.class, assign.prop, assign.value)
            }

            Item::Var { kind, vars, .. } => {
                let keyword = match kind {
                    VarDeclKind::Var => "var",
                    VarDeclKind::Let => "let",
                    VarDeclKind::Const => "const",
                };
                write!(f, "{} ", keyword)?;
                let mut first = true;
                for (var, init) in vars {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", var)?;
                    if let Some(init) = init {
                        write!(f, " = {}", init)?;
                    }
                }
                write!(f, ";")
            }

            Item::Expr(expr) => write!(f, "{};", expr),
        }
    }
}

/// Prints a [`Program`] as TypeScript text, one item per line.
pub fn emit(program: &Program) -> String {
    let mut out = String::new();
    for item in &program.items {
        // writing to a String cannot fail
        let _ = writeln!(out, "{}", item);
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::testing::*;

    use super::emit;

    #[test]
    fn statements_survive_a_round_trip() {
        for source in [
            "var x = 3, y, z = 6;",
            "let total = 0;",
            "const banner = 'hi';",
            "class A {}",
            "export class A {}",
            "A.x = f(1, 2);",
            "x = 3;",
            "typeof x;",
            "new Date();",
            "[1, 2, 3];",
            "a.b.c;",
        ] {
            let program = parse_helper(source);
            assert_eq!(emit(&program), format!("{}\n", source));
        }
    }

    #[test]
    fn numeric_literals_keep_their_source_form() {
        for source in ["6e9;", "4e-20;", "0x10;", "3.5;"] {
            let program = parse_helper(source);
            assert_eq!(emit(&program), format!("{}\n", source));
        }
    }

    #[test]
    fn nested_operators_are_parenthesized() {
        let program = parse_helper("1 + 2 * 3;");
        assert_eq!(emit(&program), "1 + (2 * 3);\n");
    }

    #[test]
    fn ternary_condition_is_not_parenthesized() {
        let program = parse_helper("report(total > 0 ? total : -total);");
        assert_eq!(emit(&program), "report(total > 0 ? total : -total);\n");
    }

    #[test]
    fn class_with_members() {
        let program = parse_helper("class A { static x = 0; static y; }");
        assert_eq!(emit(&program), "class A {\n  static x = 0;\n  static y;\n}\n");
    }
}
