use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Map of byte positions to comments.
pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Thread-safe extracted comments from SingleThreadedComments.
/// Extracted during parsing and stored independently of swc types.
#[derive(Debug, Clone)]
pub struct ExtractedComments {
    pub leading: CommentMap,
    pub trailing: CommentMap,
}

impl ExtractedComments {
    /// Extract comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
            trailing: trailing.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    /// All comments, leading and trailing, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.leading
            .values()
            .chain(self.trailing.values())
            .flat_map(|cmts| cmts.iter())
    }
}

pub struct ParsedScript {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

/// Pick the swc syntax for a script file from its extension.
///
/// `.ts` must not enable TSX, otherwise `<Type>value` casts fail to parse.
fn syntax_for(file_path: &str) -> Syntax {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ext {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Parse script source code string into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_script_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedScript> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse script: {:?}", e))?;

        // Extract comments immediately (before SingleThreadedComments drops)
        let extracted_comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedScript {
            module,
            source_map,
            comments: extracted_comments,
        })
    })
}

#[cfg(test)]
mod tests {
    use crate::core::parsers::script::*;

    fn parse(code: &str, path: &str) -> Result<ParsedScript> {
        parse_script_source(code.to_string(), path, Arc::new(SourceMap::default()))
    }

    #[test]
    fn test_parse_plain_javascript() {
        let parsed = parse("var x = $translate('HELLO');", "app.js").unwrap();
        assert_eq!(parsed.module.body.len(), 1);
    }

    #[test]
    fn test_parse_typescript_cast() {
        let parsed = parse("const el = <HTMLElement>document.body;", "app.ts");
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_parse_class_with_parameter_property() {
        let code = r#"
            export class Ctrl {
                constructor(private $translate: any) {}
            }
        "#;
        assert!(parse(code, "ctrl.ts").is_ok());
    }

    #[test]
    fn test_comments_are_extracted() {
        let code = "/* suppress-dynamic-translation-error: true */\n$translate(key);";
        let parsed = parse(code, "app.js").unwrap();
        let texts: Vec<&str> = parsed.comments.iter().map(|c| &*c.text).collect();
        assert_eq!(texts, vec![" suppress-dynamic-translation-error: true "]);
    }

    #[test]
    fn test_parse_error() {
        assert!(parse("function (", "broken.js").is_err());
    }
}
