use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::parse::{Item, Program, StaticAssign, StaticMember, Type};

/// Controls optional migration behavior.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Also declare static members whose assignment has no usable `@type`,
    /// typed from a literal initializer where possible and `any` otherwise.
    /// The external assignment is kept either way.
    pub declare_untyped: bool,
}

/// Applies static property migration to a parsed [`Program`].
///
/// Top-level assignments to members of classes declared in the same module
/// are turned into static declarations in the class body when their
/// documentation annotation names a type. Literal initializers of members
/// assigned exactly once are inlined and the assignment is dropped; all other
/// assignments stay where they were.
pub fn migrate(program: Program, options: &Options) -> Program {
    let mut assign_counts: HashMap<(String, String), usize> = HashMap::new();
    for item in &program.items {
        if let Item::Assign(assign) = item {
            *assign_counts
                .entry((assign.class.clone(), assign.prop.clone()))
                .or_default() += 1;
        }
    }

    let mut items: Vec<Item> = Vec::with_capacity(program.items.len());
    // index into `items` of each class seen so far, plus its member names
    let mut class_index: HashMap<String, usize> = HashMap::new();
    let mut declared: HashMap<String, HashSet<String>> = HashMap::new();

    for item in program.items {
        let assign = match item {
            Item::Class(class) => {
                declared.insert(
                    class.name.clone(),
                    class.members.iter().map(|m| m.name.clone()).collect(),
                );
                class_index.insert(class.name.clone(), items.len());
                items.push(Item::Class(class));
                continue;
            }
            Item::Assign(assign) => assign,
            other => {
                items.push(other);
                continue;
            }
        };

        let Some(&index) = class_index.get(&assign.class) else {
            debug!(
                class = %assign.class,
                prop = %assign.prop,
                "receiver is not a class in this module; keeping assignment"
            );
            items.push(Item::Assign(assign));
            continue;
        };

        let names = declared.entry(assign.class.clone()).or_default();
        if names.contains(&assign.prop) {
            debug!(
                class = %assign.class,
                prop = %assign.prop,
                "member is already declared; keeping assignment"
            );
            items.push(Item::Assign(assign));
            continue;
        }

        let single = assign_counts[&(assign.class.clone(), assign.prop.clone())] == 1;

        let doc_type = assign.doc.as_ref().and_then(|doc| doc.type_.clone());
        let Some(type_) = doc_type else {
            if options.declare_untyped {
                let type_ = assign.value.literal_type().unwrap_or(Type::Any);
                debug!(
                    class = %assign.class,
                    prop = %assign.prop,
                    %type_,
                    "no usable @type; declaring untyped member"
                );
                names.insert(assign.prop.clone());
                push_member(
                    &mut items,
                    index,
                    StaticMember {
                        name: assign.prop.clone(),
                        type_: Some(type_),
                        readonly: false,
                        init: None,
                    },
                );
            } else {
                // a bare @const does not help inference
                debug!(
                    class = %assign.class,
                    prop = %assign.prop,
                    "no usable @type; keeping assignment"
                );
            }
            items.push(Item::Assign(assign));
            continue;
        };

        names.insert(assign.prop.clone());
        let inline = single && assign.value.is_literal();
        debug!(
            class = %assign.class,
            prop = %assign.prop,
            %type_,
            readonly = single,
            inline,
            "declaring static member"
        );

        let StaticAssign {
            class,
            prop,
            value,
            span,
            ..
        } = assign;

        if inline {
            push_member(
                &mut items,
                index,
                StaticMember {
                    name: prop,
                    type_: Some(type_),
                    readonly: single,
                    init: Some(value),
                },
            );
        } else {
            push_member(
                &mut items,
                index,
                StaticMember {
                    name: prop.clone(),
                    type_: Some(type_),
                    readonly: single,
                    init: None,
                },
            );
            items.push(Item::Assign(StaticAssign {
                class,
                prop,
                value,
                doc: None,
                span,
            }));
        }
    }

    Program { items }
}

fn push_member(items: &mut [Item], index: usize, member: StaticMember) {
    if let Item::Class(class) = &mut items[index] {
        class.members.push(member);
    }
}
