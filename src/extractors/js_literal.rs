//! Structural conversion of JavaScript object literals to JSON
//!
//! Used when the text normalizer produces invalid JSON, e.g. for string
//! values containing `key:` patterns or embedded quotes.

use serde_json::{Map, Number, Value};
use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::*;
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax};

/// Parse `source` as a single JavaScript expression and convert it to JSON.
///
/// Returns `None` on syntax errors or when the expression contains anything
/// other than literals, objects and arrays.
pub fn js_literal_to_json(source: &str) -> Option<Value> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Anon.into(),
        format!("var literal = {};", source.trim()),
    );

    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        Default::default(),
        StringInput::from(&*fm),
        None,
    );

    let mut parser = Parser::new_from(lexer);
    let script = parser.parse_script().ok()?;
    if !parser.take_errors().is_empty() {
        return None;
    }

    match script.body.as_slice() {
        [Stmt::Decl(Decl::Var(var_decl))] => {
            let init = var_decl.decls.first()?.init.as_ref()?;
            expr_to_json(init)
        }
        _ => None,
    }
}

fn expr_to_json(expr: &Expr) -> Option<Value> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(Value::String(s.value.as_str()?.to_string())),
        Expr::Lit(Lit::Num(n)) => number_to_json(n.value),
        Expr::Lit(Lit::Bool(b)) => Some(Value::Bool(b.value)),
        Expr::Lit(Lit::Null(_)) => Some(Value::Null),

        Expr::Object(obj) => {
            let mut map = Map::new();
            for prop in &obj.props {
                // Spreads, methods and shorthand props have no JSON form
                let PropOrSpread::Prop(prop) = prop else {
                    return None;
                };
                let Prop::KeyValue(kv) = &**prop else {
                    return None;
                };
                map.insert(prop_name_to_string(&kv.key)?, expr_to_json(&kv.value)?);
            }
            Some(Value::Object(map))
        }

        Expr::Array(arr) => {
            let mut values = Vec::with_capacity(arr.elems.len());
            for elem in &arr.elems {
                match elem {
                    Some(ExprOrSpread { spread: None, expr }) => values.push(expr_to_json(expr)?),
                    Some(_) => return None,
                    // Holes: [1,,2]
                    None => values.push(Value::Null),
                }
            }
            Some(Value::Array(values))
        }

        Expr::Unary(unary) if unary.op == UnaryOp::Minus => match &*unary.arg {
            Expr::Lit(Lit::Num(n)) => number_to_json(-n.value),
            _ => None,
        },

        Expr::Paren(paren) => expr_to_json(&paren.expr),

        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            let quasi = tpl.quasis.first()?;
            let text = match &quasi.cooked {
                Some(cooked) => cooked.as_str()?.to_string(),
                None => quasi.raw.as_str().to_string(),
            };
            Some(Value::String(text))
        }

        _ => None,
    }
}

fn number_to_json(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(Value::Number(Number::from(value as i64)))
    } else {
        Number::from_f64(value).map(Value::Number)
    }
}

fn prop_name_to_string(name: &PropName) -> Option<String> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.as_str().to_string()),
        PropName::Str(s) => s.value.as_str().map(|v| v.to_string()),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}
