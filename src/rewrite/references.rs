//! Module reference discovery over a parsed JS/TS program.
//!
//! The source is parsed with SWC only to locate the string literals that name
//! modules; rewriting is done by splicing new literal text into the original
//! source at those byte ranges, so everything else in the file (formatting,
//! comments, quote style) is preserved exactly.
//!
//! ## Recognised shapes
//!
//! ```ts
//! import X from "./A";                 // static import (incl. `import type`)
//! export { x } from "./A";             // named re-export
//! export * from "./A";                 // re-export all
//! import("./A");                       // dynamic import, also inside
//! dynamic(() => import("./A"));        //   lazy-loading wrappers
//! require("./A");                      // CommonJS
//! new URL("./A.svg", import.meta.url); // URL construction
//! type T = import("./A").T;            // import type
//! import x = require("./A");           // TS import-equals
//! ```

use crate::error::{CasingError, Result};
use std::ops::Range;
use std::path::Path;
use swc_common::{FileName, SourceMap, Span, sync::Lrc};
use swc_ecma_ast::{
    CallExpr, Callee, ExportAll, Expr, ExprOrSpread, ImportDecl, Lit, NamedExport, NewExpr, Str,
    TsExternalModuleRef, TsImportType,
};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};
use swc_ecma_visit::{Visit, VisitWith};

/// Source dialect, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `.ts`, `.mts`, `.cts`; `declaration` for `.d.ts`.
    TypeScript { declaration: bool },
    /// `.tsx`
    Tsx,
    /// `.js`, `.jsx`, `.mjs`, `.cjs`, parsed with JSX enabled.
    JavaScript,
}

impl Dialect {
    /// Extensions the rewriter understands.
    pub const SOURCE_EXTENSIONS: &'static [&'static str] =
        &[".ts", ".tsx", ".mts", ".cts", ".js", ".jsx", ".mjs", ".cjs"];

    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let ext = path.extension()?.to_str()?;

        match ext {
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript {
                declaration: name.ends_with(".d.ts")
                    || name.ends_with(".d.mts")
                    || name.ends_with(".d.cts"),
            }),
            "tsx" => Some(Dialect::Tsx),
            "js" | "jsx" | "mjs" | "cjs" => Some(Dialect::JavaScript),
            _ => None,
        }
    }

    fn syntax(self) -> Syntax {
        match self {
            Dialect::TypeScript { declaration } => Syntax::Typescript(TsSyntax {
                tsx: false,
                decorators: true,
                dts: declaration,
                ..Default::default()
            }),
            Dialect::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                decorators: true,
                ..Default::default()
            }),
            Dialect::JavaScript => Syntax::Es(EsSyntax {
                jsx: true,
                decorators: true,
                ..Default::default()
            }),
        }
    }
}

/// A module-path string literal located in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    /// Byte range of the literal including its quotes.
    pub range: Range<usize>,
    /// Quote character used by the literal.
    pub quote: char,
    /// Literal contents without quotes.
    pub value: String,
}

/// Parses `source` and returns its module references in source order.
///
/// Literals containing escape sequences are skipped since their raw text is
/// not the module path.
pub fn find_references(path: &Path, source: &str, dialect: Dialect) -> Result<Vec<ModuleReference>> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Real(path.to_path_buf())),
        source.to_string(),
    );

    let lexer = Lexer::new(
        dialect.syntax(),
        Default::default(),
        StringInput::from(&*fm),
        None,
    );
    let mut parser = Parser::new_from(lexer);
    let program = parser.parse_program().map_err(|e| CasingError::Parse {
        path: path.to_path_buf(),
        message: format!("{:?}", e.kind()),
    })?;

    for recovered in parser.take_errors() {
        log::debug!("{}: recovered syntax error {:?}", path.display(), recovered.kind());
    }

    let mut collector = LiteralCollector::default();
    program.visit_with(&mut collector);

    let base = fm.start_pos.0;
    let mut spans = collector.spans;
    spans.sort_by_key(|span| span.lo.0);
    spans.dedup();

    let references = spans
        .into_iter()
        .filter_map(|span| {
            let start = span.lo.0.checked_sub(base)? as usize;
            let end = span.hi.0.checked_sub(base)? as usize;
            let reference = literal_at(source, start..end);
            if reference.is_none() {
                log::debug!(
                    "{}: skipping literal at {}..{} (escaped or unexpected text)",
                    path.display(),
                    start,
                    end
                );
            }
            reference
        })
        .collect();

    Ok(references)
}

fn literal_at(source: &str, range: Range<usize>) -> Option<ModuleReference> {
    let raw = source.get(range.clone())?;
    let quote = raw.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }

    let value = &raw[1..raw.len() - 1];
    if value.contains('\\') {
        return None;
    }

    Some(ModuleReference {
        range,
        quote,
        value: value.to_string(),
    })
}

/// Collects spans of string literals in module-reference positions.
#[derive(Default)]
struct LiteralCollector {
    spans: Vec<Span>,
}

impl LiteralCollector {
    fn push_str(&mut self, s: &Str) {
        self.spans.push(s.span);
    }

    fn push_first_arg(&mut self, args: &[ExprOrSpread]) {
        if let Some(ExprOrSpread { spread: None, expr }) = args.first()
            && let Expr::Lit(Lit::Str(s)) = &**expr
        {
            self.push_str(s);
        }
    }
}

fn is_ident(expr: &Expr, name: &str) -> bool {
    matches!(expr, Expr::Ident(ident) if &*ident.sym == name)
}

impl Visit for LiteralCollector {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        self.push_str(&node.src);
        node.visit_children_with(self);
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if let Some(src) = &node.src {
            self.push_str(src);
        }
        node.visit_children_with(self);
    }

    fn visit_export_all(&mut self, node: &ExportAll) {
        self.push_str(&node.src);
        node.visit_children_with(self);
    }

    // Nested calls are reached through `visit_children_with`, which is how
    // `import()` inside `dynamic(() => ...)` or `lazy(() => ...)` is found.
    fn visit_call_expr(&mut self, node: &CallExpr) {
        match &node.callee {
            Callee::Import(_) => self.push_first_arg(&node.args),
            Callee::Expr(callee) if is_ident(callee, "require") => {
                self.push_first_arg(&node.args)
            }
            _ => {}
        }
        node.visit_children_with(self);
    }

    fn visit_new_expr(&mut self, node: &NewExpr) {
        if is_ident(&node.callee, "URL")
            && let Some(args) = &node.args
        {
            self.push_first_arg(args);
        }
        node.visit_children_with(self);
    }

    fn visit_ts_import_type(&mut self, node: &TsImportType) {
        self.push_str(&node.arg);
        node.visit_children_with(self);
    }

    fn visit_ts_external_module_ref(&mut self, node: &TsExternalModuleRef) {
        self.push_str(&node.expr);
        node.visit_children_with(self);
    }
}
