#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use swc_common::comments::SingleThreadedComments;
use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap};
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{Parser, StringInput, Syntax};

/// Implements utility functions for transforming the ast used by [`swc_ecma_parser`] into a custom
/// ast that keeps just the items this tool reasons about: class declarations, member assignments,
/// and the expressions they carry, together with their documentation annotations.
pub mod parse;

/// Implements extraction of the `@type` and `@const` tags from documentation comments.
pub mod jsdoc;

/// Implements the migration pass that moves documented static member assignments into class
/// bodies.
pub mod migrate;

/// Implements validation of a migrated [`parse::Program`].
pub mod verify;

/// Implements printing a [`parse::Program`] as TypeScript text.
pub mod emit;

/// Implements the crate error type.
pub mod error;

/// Private crate for testing utilities.
#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;
pub use migrate::Options;

/// Converts a JavaScript module to TypeScript in one pass: parse, migrate the
/// static members, verify the result, and print it.
///
/// # Example
/// ```no_run
/// # use staticize::Options;
/// let source = "class A {}\n/** @type {number} */\nA.x = 0;";
/// let output = staticize::convert("a.js", source, &Options::default())?;
/// assert_eq!(output, "class A {\n  static readonly x: number = 0;\n}\n");
/// # Ok::<(), staticize::Error>(())
/// ```
pub fn convert(file_name: &str, source: &str, options: &Options) -> Result<String, Error> {
    let cm = Lrc::<SourceMap>::default();
    let fm = cm.new_source_file(FileName::Custom(file_name.to_string()), source.to_string());

    let comments = SingleThreadedComments::default();
    let lexer = Lexer::new(
        // We want to parse ecmascript
        Syntax::Es(Default::default()),
        // EsVersion defaults to es5
        Default::default(),
        StringInput::from(&*fm),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);
    let module = parser
        .parse_module()
        .map_err(|e| Error::Parse(e.into_kind().msg().to_string()))?;
    if let Some(e) = parser.take_errors().into_iter().next() {
        return Err(Error::Parse(e.into_kind().msg().to_string()));
    }

    let program = parse::parse(module.body, &comments)?;
    let program = migrate::migrate(program, options);
    verify::verify(&program)?;
    Ok(emit::emit(&program))
}

#[cfg(test)]
mod tests {
    use super::{convert, Error, Options};

    #[test]
    fn full_pipeline() {
        let source = "export class SomeClass {}\n\
                      /** @type {number} */\n\
                      SomeClass.staticPropWithJsDoc = 0;\n\
                      SomeClass.staticPropNoJsDoc = 0;\n\
                      /** @type {number} */\n\
                      SomeClass.staticPropWithJsDocAndNonTrivialInit = 1 + 1;\n\
                      /** @const */\n\
                      SomeClass.inferred = 0;\n";
        let expected = "export class SomeClass {\n\
                        \x20 static readonly staticPropWithJsDoc: number = 0;\n\
                        \x20 static readonly staticPropWithJsDocAndNonTrivialInit: number;\n\
                        }\n\
                        SomeClass.staticPropNoJsDoc = 0;\n\
                        SomeClass.staticPropWithJsDocAndNonTrivialInit = 1 + 1;\n\
                        SomeClass.inferred = 0;\n";
        let output = convert("test.js", source, &Options::default()).expect("conversion failed");
        assert_eq!(output, expected);
    }

    #[test]
    fn parse_errors_are_reported() {
        match convert("test.js", "class {", &Options::default()) {
            Err(Error::Parse(_)) => (),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
