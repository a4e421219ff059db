//! Plot document parsing.
//!
//! A plot document is YAML with an optional `options` mapping and an ordered
//! `forms` list. Each form item is a bare head (`- reset`) or a single-key
//! mapping from head to arguments (`- set: [terminal, pngcairo]`).
//! Unknown heads fail with `UnknownForm` before anything is executed.
//!
//! YAML scalars map to values as follows:
//! - `!text s` → Text, `!raw s` → Literal, `!word s` → Bareword, `!flag s` → FlagWord
//! - plain strings starting with `:` → FlagWord, other plain strings → Bareword
//! - sequences → Sequence
//! - numbers, booleans, null, mappings and unknown tags → Other
//!
//! A bare `:name` is only a plain scalar in block sequences. Inside a flow
//! sequence (`[...]`) YAML reads the leading `:` as a mapping indicator, so
//! flow items use `!flag name` or the quoted `':name'`.

use super::types::*;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml_ng::Value as Yaml;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    options: IndexMap<String, Yaml>,
    #[serde(default)]
    forms: Vec<Yaml>,
}

/// Parse a plot document from disk.
pub fn parse_document_file(path: &Path) -> Result<PlotDocument, PlotError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PlotError::Io(format!("failed to read {}: {}", path.display(), e)))?;
    parse_document(&content)
}

/// Parse a plot document from a string.
pub fn parse_document(yaml: &str) -> Result<PlotDocument, PlotError> {
    let raw: RawDocument =
        serde_yaml_ng::from_str(yaml).map_err(|e| PlotError::Parse(e.to_string()))?;
    let options = RunOptions::from_pairs(&raw.options)?;
    let forms = raw
        .forms
        .iter()
        .map(parse_form)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PlotDocument { options, forms })
}

/// Parse one form item.
pub fn parse_form(item: &Yaml) -> Result<Form, PlotError> {
    match item {
        Yaml::String(head) => build_form(head, &Yaml::Null),
        Yaml::Mapping(map) if map.len() == 1 => {
            let Some((key, args)) = map.iter().next() else {
                return Err(PlotError::Parse("empty form mapping".to_string()));
            };
            let head = key
                .as_str()
                .ok_or_else(|| PlotError::Parse(format!("form head must be a string, got {:?}", key)))?;
            build_form(head, args)
        }
        other => Err(PlotError::Parse(format!(
            "form must be a head name or a single-key mapping, got {:?}",
            other
        ))),
    }
}

/// Build a form from its head keyword and YAML arguments.
pub fn build_form(head: &str, args: &Yaml) -> Result<Form, PlotError> {
    let kind = FormKind::from_head(head)?;
    let args = arg_list(args);
    let malformed = |message: &str| PlotError::MalformedForm {
        head: head.to_string(),
        message: message.to_string(),
    };

    match kind {
        FormKind::Set => {
            let (name, rest) = args.split_first().ok_or_else(|| malformed("missing setting name"))?;
            let name = scalar_text(name).ok_or_else(|| malformed("setting name must be a scalar"))?;
            Ok(Form::Set {
                name,
                values: rest.iter().map(|v| value_from_yaml(v)).collect(),
            })
        }
        FormKind::Unset => match args.as_slice() {
            [name] => Ok(Form::Unset {
                name: scalar_text(name).ok_or_else(|| malformed("setting name must be a scalar"))?,
            }),
            _ => Err(malformed("expected exactly one setting name")),
        },
        FormKind::Plot => {
            if args.is_empty() {
                return Err(malformed("expected at least one curve"));
            }
            let curves = args
                .iter()
                .map(|c| curve_from_yaml(c).map_err(|m| malformed(m.as_str())))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Form::Plot(curves))
        }
        FormKind::Curve => {
            let curve = curve_from_args(&args).map_err(|m| malformed(m.as_str()))?;
            Ok(Form::Curve(curve))
        }
        FormKind::Table => match args.as_slice() {
            [name, rows] => {
                let name = block_name(name)?;
                let rows: Vec<Vec<Value>> = arg_list(rows)
                    .into_iter()
                    .map(|row| {
                        arg_list(row)
                            .iter()
                            .map(|cell| value_from_yaml(cell))
                            .collect::<Vec<_>>()
                    })
                    .collect();
                Ok(Form::Table { name, rows })
            }
            _ => Err(malformed("expected a data block name and a list of rows")),
        },
        FormKind::Data => {
            let (name, lines) = args
                .split_first()
                .ok_or_else(|| malformed("missing data block name"))?;
            let name = block_name(name)?;
            let lines = lines
                .iter()
                .map(|l| scalar_text(l).ok_or_else(|| malformed("data lines must be scalars")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Form::Data { name, lines })
        }
        FormKind::FunctionDef => match args.as_slice() {
            [name, params, body] => {
                let name = scalar_text(name).ok_or_else(|| malformed("function name must be a scalar"))?;
                let params = arg_list(params)
                    .iter()
                    .map(|p| scalar_text(p).ok_or_else(|| malformed("parameters must be scalars")))
                    .collect::<Result<Vec<_>, _>>()?;
                let body = scalar_text(body).ok_or_else(|| malformed("function body must be a scalar"))?;
                Ok(Form::FunctionDef { name, params, body })
            }
            _ => Err(malformed("expected name, parameter list and body")),
        },
        FormKind::ConstDef => match args.as_slice() {
            [name, body] => Ok(Form::ConstDef {
                name: scalar_text(name).ok_or_else(|| malformed("constant name must be a scalar"))?,
                body: scalar_text(body).ok_or_else(|| malformed("constant body must be a scalar"))?,
            }),
            _ => Err(malformed("expected name and body")),
        },
        FormKind::Comment => Ok(Form::Comment(
            args.iter().map(|part| value_from_yaml(part)).collect(),
        )),
        FormKind::Raw => match args.as_slice() {
            [text] => Ok(Form::Raw(
                scalar_text(text).ok_or_else(|| malformed("raw text must be a scalar"))?,
            )),
            _ => Err(malformed("expected exactly one text argument")),
        },
        FormKind::Reset => {
            if args.is_empty() {
                Ok(Form::Reset)
            } else {
                Err(malformed("takes no arguments"))
            }
        }
    }
}

/// Convert a YAML node to a form argument value. Total over all YAML nodes.
pub fn value_from_yaml(node: &Yaml) -> Value {
    match node {
        Yaml::String(s) if s.len() > 1 && s.starts_with(':') => Value::FlagWord(s.clone()),
        Yaml::String(s) => Value::Bareword(s.clone()),
        Yaml::Sequence(items) => Value::Sequence(items.iter().map(value_from_yaml).collect()),
        Yaml::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let text = scalar_text(&tagged.value);
            match (tag.trim_start_matches('!'), text) {
                ("text", Some(s)) => Value::Text(s),
                ("raw", Some(s)) => Value::Literal(s),
                ("word", Some(s)) => Value::Bareword(s),
                ("flag", Some(s)) => Value::FlagWord(s),
                _ => Value::Other(to_json(node)),
            }
        }
        other => Value::Other(to_json(other)),
    }
}

fn curve_from_yaml(node: &Yaml) -> Result<Curve, String> {
    curve_from_args(&arg_list(node))
}

fn curve_from_args(args: &[&Yaml]) -> Result<Curve, String> {
    let (source, options) = args
        .split_first()
        .ok_or_else(|| "curve needs a source".to_string())?;
    let source = match source {
        Yaml::String(s) if VariableRef::is_reference(s) => {
            CurveSource::Ref(VariableRef::new(s.as_str()).map_err(|e| e.to_string())?)
        }
        other => CurveSource::Value(value_from_yaml(other)),
    };
    Ok(Curve::new(
        source,
        options.iter().map(|o| value_from_yaml(o)).collect(),
    ))
}

fn block_name(node: &Yaml) -> Result<VariableRef, PlotError> {
    match node.as_str() {
        Some(s) => VariableRef::new(s),
        None => Err(PlotError::InvalidReference(format!("{:?}", node))),
    }
}

/// Arguments as a list: null is empty, a sequence is its items, anything else is one item.
fn arg_list(node: &Yaml) -> Vec<&Yaml> {
    match node {
        Yaml::Null => Vec::new(),
        Yaml::Sequence(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn scalar_text(node: &Yaml) -> Option<String> {
    match node {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

fn to_json(node: &Yaml) -> serde_json::Value {
    serde_json::to_value(node).unwrap_or_else(|_| serde_json::Value::String(format!("{:?}", node)))
}
