//! Line-oriented operation language for driving the taxonomy engine.
//!
//! One operation per line, `#` starts a comment, blank lines are skipped:
//!
//! ```text
//! create root Electronics
//! create audio Audio Gear
//! link audio root
//! tree root
//! top 3
//! ```

use itertools::Itertools;
use thiserror::Error;
use tracing::instrument;

use crate::errors::TaxonomyError;
use crate::taxonomy::Taxonomy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command: {command}")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: usage: {usage}")]
    Usage { line: usize, usage: &'static str },

    #[error("line {line}: not a count: {value}")]
    InvalidCount { line: usize, value: String },

    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
}

pub type ScriptResult<T> = Result<T, ScriptError>;

/// A single parsed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    Create { id: String, label: String },
    Relabel { id: String, label: String },
    Link { child: String, parent: String },
    Remove { id: String },
    Tree { id: Option<String> },
    Chain { id: String },
    Descendants { id: String },
    Top { n: usize },
    Size,
    Contains { id: String },
    Height { id: String },
}

/// Parses a whole script. Stops at the first malformed line.
#[instrument(level = "debug", skip(source))]
pub fn parse(source: &str) -> ScriptResult<Vec<ScriptOp>> {
    let mut ops = Vec::new();
    for (line_no, raw) in source.lines().enumerate() {
        let line = line_no + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        ops.push(parse_words(line, &words)?);
    }
    Ok(ops)
}

fn parse_words(line: usize, words: &[&str]) -> ScriptResult<ScriptOp> {
    match words[0] {
        "create" => match words {
            [_, id, label @ ..] if !label.is_empty() => Ok(ScriptOp::Create {
                id: id.to_string(),
                label: label.join(" "),
            }),
            _ => Err(ScriptError::Usage {
                line,
                usage: "create <id> <label...>",
            }),
        },
        "relabel" => match words {
            [_, id, label @ ..] if !label.is_empty() => Ok(ScriptOp::Relabel {
                id: id.to_string(),
                label: label.join(" "),
            }),
            _ => Err(ScriptError::Usage {
                line,
                usage: "relabel <id> <label...>",
            }),
        },
        "link" => match words {
            [_, child, parent] => Ok(ScriptOp::Link {
                child: child.to_string(),
                parent: parent.to_string(),
            }),
            _ => Err(ScriptError::Usage {
                line,
                usage: "link <child-id> <parent-id>",
            }),
        },
        "remove" => one_id(line, words, "remove <id>").map(|id| ScriptOp::Remove { id }),
        "tree" => match words {
            [_] => Ok(ScriptOp::Tree { id: None }),
            [_, id] => Ok(ScriptOp::Tree {
                id: Some(id.to_string()),
            }),
            _ => Err(ScriptError::Usage {
                line,
                usage: "tree [<id>]",
            }),
        },
        "chain" => one_id(line, words, "chain <id>").map(|id| ScriptOp::Chain { id }),
        "descendants" => {
            one_id(line, words, "descendants <id>").map(|id| ScriptOp::Descendants { id })
        }
        "top" => match words {
            [_, n] => n
                .parse()
                .map(|n| ScriptOp::Top { n })
                .map_err(|_| ScriptError::InvalidCount {
                    line,
                    value: n.to_string(),
                }),
            _ => Err(ScriptError::Usage {
                line,
                usage: "top <n>",
            }),
        },
        "size" => match words {
            [_] => Ok(ScriptOp::Size),
            _ => Err(ScriptError::Usage {
                line,
                usage: "size",
            }),
        },
        "contains" => one_id(line, words, "contains <id>").map(|id| ScriptOp::Contains { id }),
        "height" => one_id(line, words, "height <id>").map(|id| ScriptOp::Height { id }),
        other => Err(ScriptError::UnknownCommand {
            line,
            command: other.to_string(),
        }),
    }
}

fn one_id(line: usize, words: &[&str], usage: &'static str) -> ScriptResult<String> {
    match words {
        [_, id] => Ok(id.to_string()),
        _ => Err(ScriptError::Usage { line, usage }),
    }
}

/// Applies parsed operations to a taxonomy, returning one output block per
/// operation. Mutating operations echo what they did; queries print their
/// result.
#[instrument(level = "debug", skip(taxonomy, ops))]
pub fn execute(taxonomy: &mut Taxonomy, ops: &[ScriptOp]) -> ScriptResult<Vec<String>> {
    let mut out = Vec::with_capacity(ops.len());
    for op in ops {
        out.push(apply(taxonomy, op)?);
    }
    Ok(out)
}

fn apply(taxonomy: &mut Taxonomy, op: &ScriptOp) -> ScriptResult<String> {
    let line = match op {
        ScriptOp::Create { id, label } => {
            taxonomy.create(id, label)?;
            format!("created {id}")
        }
        ScriptOp::Relabel { id, label } => {
            taxonomy.set_label(id, label)?;
            format!("relabeled {id}")
        }
        ScriptOp::Link { child, parent } => {
            taxonomy.assign_parent(child, parent)?;
            format!("linked {child} -> {parent}")
        }
        ScriptOp::Remove { id } => {
            taxonomy.remove(id)?;
            format!("removed {id}")
        }
        ScriptOp::Tree { id: Some(id) } => taxonomy.to_tree_string(id)?.to_string(),
        ScriptOp::Tree { id: None } => {
            let mut blocks = Vec::new();
            for idx in taxonomy.roots() {
                if let Some(root) = taxonomy.node(idx) {
                    blocks.push(taxonomy.to_tree_string(&root.id)?.to_string());
                }
            }
            blocks.join("")
        }
        ScriptOp::Chain { id } => taxonomy
            .ancestor_chain(id)?
            .iter()
            .map(|c| c.id.as_str())
            .join(" -> "),
        ScriptOp::Descendants { id } => taxonomy
            .descendants(id)?
            .iter()
            .map(|c| c.id.as_str())
            .sorted()
            .join(", "),
        ScriptOp::Top { n } => taxonomy
            .top_by_height_then_label(*n)
            .iter()
            .map(|c| format!("{} h={}", c.id, c.height))
            .join("\n"),
        ScriptOp::Size => taxonomy.len().to_string(),
        ScriptOp::Contains { id } => taxonomy.contains(id).to_string(),
        ScriptOp::Height { id } => taxonomy.get(id)?.height.to_string(),
    };
    Ok(line)
}
