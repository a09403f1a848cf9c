use swc_common::comments::SingleThreadedComments;
use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap};
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{Parser, StringInput, Syntax};

use super::error::Error;
use super::migrate::{migrate, Options};
use super::parse::{parse, Program};

pub(crate) fn try_parse_helper(contents: &str) -> Result<Program, Error> {
    let cm = Lrc::<SourceMap>::default();
    let fm = cm.new_source_file(FileName::Custom("test.js".to_string()), contents.to_string());

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
    let body = parser.parse_module().expect("error parsing").body;
    parse(body, &comments)
}

pub(crate) fn parse_helper(contents: &str) -> Program {
    try_parse_helper(contents).expect("unsupported syntax")
}

pub(crate) fn migrate_helper(contents: &str) -> Program {
    migrate(parse_helper(contents), &Options::default())
}

pub(crate) fn convert_with(contents: &str, options: &Options) -> String {
    crate::convert("test.js", contents, options).expect("conversion failed")
}

pub(crate) fn convert_helper(contents: &str) -> String {
    convert_with(contents, &Options::default())
}
