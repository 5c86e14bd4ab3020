//! printf-style query templates.
//!
//! A template is the query expression of every generated panel with
//! placeholders for the per-metric parts. Placeholders are `%s` (next
//! argument), `%[n]s` (argument `n`, 1-based) and `%%` for a literal percent
//! sign. `%v` is accepted as a synonym of `%s`.
//!
//! Arguments, in order:
//!
//! 1. rate prefix: `rate{counter,,1}:` for counters, empty otherwise
//! 2. metric name
//! 3. group-by tags (`k=v,k=v`)
//! 4. filter ("where") tags (`k=v,k=v`)

use std::fmt;
use std::str::FromStr;

use crate::error::GenerateError;

/// Template used when none is configured.
pub const DEFAULT_QUERY: &str = r#"q("sum:$ds-avg:%s%s{%s}{%s}", "$start", "")"#;

/// Rate prefix inserted for counter metrics.
pub const COUNTER_RATE: &str = "rate{counter,,1}:";

/// Number of arguments a template can reference.
pub const ARG_COUNT: usize = 4;

/// Per-metric values substituted into a [`QueryTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryArgs<'a> {
    pub rate: &'a str,
    pub metric: &'a str,
    pub group_tags: &'a str,
    pub where_tags: &'a str,
}

impl<'a> QueryArgs<'a> {
    fn get(&self, index: usize) -> &'a str {
        match index {
            0 => self.rate,
            1 => self.metric,
            2 => self.group_tags,
            _ => self.where_tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Arg(usize),
}

/// A parsed query template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    raw: String,
    pieces: Vec<Piece>,
}

impl QueryTemplate {
    /// Parse and validate a template.
    pub fn parse(raw: &str) -> Result<Self, GenerateError> {
        let invalid = |msg: String| GenerateError::InvalidQuery {
            template: raw.to_string(),
            reason: msg,
        };

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut next_arg = 0usize;
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let index = match chars.next() {
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some('s') | Some('v') => next_arg,
                Some('[') => {
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            _ => return Err(invalid("unterminated argument index".to_string())),
                        }
                    }
                    let n: usize = digits
                        .parse()
                        .map_err(|_| invalid(format!("bad argument index [{}]", digits)))?;
                    if n == 0 {
                        return Err(invalid("argument indexes start at 1".to_string()));
                    }
                    match chars.next() {
                        Some('s') | Some('v') => n - 1,
                        other => {
                            return Err(invalid(format!(
                                "unsupported verb {:?} after [{}]",
                                other, n
                            )))
                        }
                    }
                }
                Some(other) => return Err(invalid(format!("unsupported verb %{}", other))),
                None => return Err(invalid("dangling %".to_string())),
            };

            if index >= ARG_COUNT {
                return Err(invalid(format!(
                    "references argument {} but only {} are available",
                    index + 1,
                    ARG_COUNT
                )));
            }

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Arg(index));
            next_arg = index + 1;
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            pieces,
        })
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Substitute the arguments. Arguments the template never references are ignored.
    pub fn render(&self, args: &QueryArgs<'_>) -> String {
        let mut out = String::with_capacity(self.raw.len() + args.metric.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Arg(i) => out.push_str(args.get(*i)),
            }
        }
        out
    }
}

impl Default for QueryTemplate {
    fn default() -> Self {
        Self {
            raw: DEFAULT_QUERY.to_string(),
            pieces: vec![
                Piece::Literal("q(\"sum:$ds-avg:".to_string()),
                Piece::Arg(0),
                Piece::Arg(1),
                Piece::Literal("{".to_string()),
                Piece::Arg(2),
                Piece::Literal("}{".to_string()),
                Piece::Arg(3),
                Piece::Literal("}\", \"$start\", \"\")".to_string()),
            ],
        }
    }
}

impl FromStr for QueryTemplate {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
