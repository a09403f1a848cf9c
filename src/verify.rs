use std::collections::HashSet;

use crate::error::Error;
use crate::parse::{Item, Program};

/// Checks that a migrated [`Program`] is internally consistent: static member
/// names are unique within each class, only literal initializers were inlined
/// into readonly members, and no retained assignment targets a member that
/// already has an initializer.
pub fn verify(program: &Program) -> Result<(), Error> {
    let mut initialized: HashSet<(&str, &str)> = HashSet::new();

    for item in &program.items {
        let Item::Class(class) = item else { continue };
        let mut seen = HashSet::new();
        for member in &class.members {
            if !seen.insert(member.name.as_str()) {
                return Err(Error::DuplicateStatic {
                    class: class.name.clone(),
                    name: member.name.clone(),
                });
            }
            // Only migration inlines initializers into readonly members;
            // initializers already present in the source stay assignable.
            if let Some(init) = &member.init {
                if member.readonly {
                    if !init.is_literal() {
                        return Err(Error::NonLiteralInit {
                            class: class.name.clone(),
                            name: member.name.clone(),
                        });
                    }
                    initialized.insert((class.name.as_str(), member.name.as_str()));
                }
            }
        }
    }

    for item in &program.items {
        let Item::Assign(assign) = item else { continue };
        if initialized.contains(&(assign.class.as_str(), assign.prop.as_str())) {
            return Err(Error::ConflictingAssign {
                class: assign.class.clone(),
                name: assign.prop.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use swc_common::DUMMY_SP;
    use swc_ecma_ast::BinaryOp;

    use crate::error::Error;
    use crate::parse::{Ast, AstNode, ClassDef, Item, Program, StaticAssign, StaticMember, Type};
    use crate::testing::*;

    use super::verify;

    fn number(value: f64) -> Ast {
        Ast {
            ast: AstNode::Number { value, raw: None },
            span: DUMMY_SP,
        }
    }

    fn member(name: &str, init: Option<Ast>, readonly: bool) -> StaticMember {
        StaticMember {
            name: name.to_string(),
            type_: Some(Type::Number),
            readonly,
            init,
        }
    }

    fn class(name: &str, members: Vec<StaticMember>) -> Item {
        Item::Class(ClassDef {
            name: name.to_string(),
            exported: false,
            members,
            span: DUMMY_SP,
        })
    }

    #[test]
    fn accepts_migrated_output() {
        let program = migrate_helper(
            "class A {}\n/** @type {number} */\nA.x = 0;\n/** @type {number} */\nA.y = f();",
        );
        verify(&program).expect("verification failed");
    }

    #[test]
    fn accepts_source_initializer_with_external_assignment() {
        let program = migrate_helper("class A { static x = 0; }\nA.x = 1;");
        verify(&program).expect("source-declared initializers stay assignable");
    }

    #[test]
    fn rejects_duplicate_members() {
        let program = Program {
            items: vec![class(
                "A",
                vec![member("x", None, false), member("x", None, false)],
            )],
        };
        assert!(matches!(
            verify(&program),
            Err(Error::DuplicateStatic { .. })
        ));
    }

    #[test]
    fn rejects_assignment_to_initialized_member() {
        let program = Program {
            items: vec![
                class("A", vec![member("x", Some(number(0.0)), true)]),
                Item::Assign(StaticAssign {
                    class: "A".to_string(),
                    prop: "x".to_string(),
                    value: number(1.0),
                    doc: None,
                    span: DUMMY_SP,
                }),
            ],
        };
        assert!(matches!(
            verify(&program),
            Err(Error::ConflictingAssign { .. })
        ));
    }

    #[test]
    fn rejects_non_literal_readonly_init() {
        let init = Ast {
            ast: AstNode::Binary {
                op: BinaryOp::Add,
                left: Box::new(number(1.0)),
                right: Box::new(number(1.0)),
            },
            span: DUMMY_SP,
        };
        let program = Program {
            items: vec![class("A", vec![member("x", Some(init), true)])],
        };
        assert!(matches!(verify(&program), Err(Error::NonLiteralInit { .. })));
    }
}
