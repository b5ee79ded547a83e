//! Cell inputs and normalization.
//!
//! Callers hand the engine heterogeneous cell inputs: plain strings,
//! numbers, booleans, an explicit empty, a [`CellSpec`] option object, or a
//! dynamic `serde_json::Value`. Normalization reduces every input to one
//! internal [`Cell`] record whose content is a tagged [`Content`] value,
//! resolved exactly once. The empty marker is distinguished from an explicit
//! empty string only during placement (a bare empty advances the cursor
//! without claiming a slot); sizing and formatting treat both as blank.

use console::Style;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GridError;

/// Horizontal alignment of cell content within its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    /// Left-align text (pad on the right).
    #[default]
    Left,
    /// Center text (extra space goes to the right).
    Center,
    /// Right-align text (pad on the left).
    Right,
}

/// Vertical alignment of cell content within a row span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    /// Content starts at the first visual line.
    #[default]
    Top,
    /// Content is centered; a leftover blank line goes on top.
    Middle,
    /// Content ends at the last visual line.
    Bottom,
}

/// Position where truncation removes content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncateAt {
    /// Keep the start visible: `"Hello W…"`.
    #[default]
    End,
    /// Keep the end visible: `"…o World"`.
    Start,
    /// Keep both ends visible: `"Hel…orld"`.
    Middle,
}

/// How over-wide content is truncated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncateSpec {
    /// Where the cut happens.
    pub at: TruncateAt,
    /// Marker inserted at the cut (default `…`).
    pub ellipsis: String,
    /// Prefer cutting at a word boundary.
    pub space: bool,
}

impl Default for TruncateSpec {
    fn default() -> Self {
        TruncateSpec {
            at: TruncateAt::End,
            ellipsis: "…".to_string(),
            space: false,
        }
    }
}

impl TruncateSpec {
    /// Truncate at the given position with the default ellipsis.
    pub fn at(at: TruncateAt) -> Self {
        TruncateSpec {
            at,
            ..Default::default()
        }
    }

    /// Set the ellipsis marker.
    pub fn ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Prefer truncation at a word boundary.
    pub fn at_word(mut self) -> Self {
        self.space = true;
        self
    }
}

/// Cell content, resolved once at normalization time.
///
/// `Empty` is the null/absent marker: during placement a bare empty cell
/// advances the cursor without claiming a matrix slot, which lets callers
/// pad rows without forcing geometry. An explicit empty string claims its
/// slot like any other text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Content {
    /// No content (null/absent input).
    #[default]
    Empty,
    /// Literal text, possibly multi-line.
    Text(String),
}

impl Content {
    /// The content split on line breaks; empty content is one blank line.
    pub(crate) fn lines(&self) -> Vec<&str> {
        match self {
            Content::Empty => vec![""],
            Content::Text(s) => s.split('\n').collect(),
        }
    }
}

/// A cell option object: content plus per-cell layout overrides.
///
/// ```rust
/// use spangrid::{CellSpec, HAlign, VAlign};
///
/// let cell = CellSpec::text("total")
///     .col_span(2)
///     .h_align(HAlign::Right)
///     .v_align(VAlign::Middle);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CellSpec {
    /// Cell content.
    pub content: Content,
    /// Columns this cell spans (0 is coerced to 1).
    pub col_span: usize,
    /// Rows this cell spans (0 is coerced to 1).
    pub row_span: usize,
    /// Horizontal alignment (default left).
    pub h_align: Option<HAlign>,
    /// Vertical alignment (default top).
    pub v_align: Option<VAlign>,
    /// Cap on the content width used for column sizing.
    pub max_width: Option<usize>,
    /// Per-cell word-wrap override of the table default.
    pub word_wrap: Option<bool>,
    /// Per-cell truncation override of the table default.
    pub truncate: Option<TruncateSpec>,
    /// Foreground style for this cell's visual lines.
    pub fg: Option<Style>,
    /// Background style for this cell's visual lines.
    pub bg: Option<Style>,
}

impl CellSpec {
    /// A cell with the given text content.
    pub fn text(content: impl Into<String>) -> Self {
        CellSpec {
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    /// A cell with empty content (still claims its slots when spanning).
    pub fn empty() -> Self {
        CellSpec::default()
    }

    /// Set the column span.
    pub fn col_span(mut self, span: usize) -> Self {
        self.col_span = span;
        self
    }

    /// Set the row span.
    pub fn row_span(mut self, span: usize) -> Self {
        self.row_span = span;
        self
    }

    /// Set horizontal alignment.
    pub fn h_align(mut self, align: HAlign) -> Self {
        self.h_align = Some(align);
        self
    }

    /// Set vertical alignment.
    pub fn v_align(mut self, align: VAlign) -> Self {
        self.v_align = Some(align);
        self
    }

    /// Cap the width this cell requests during column sizing.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Enable or disable word-wrap for this cell.
    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = Some(wrap);
        self
    }

    /// Set this cell's truncation behavior.
    pub fn truncate(mut self, spec: TruncateSpec) -> Self {
        self.truncate = Some(spec);
        self
    }

    /// Set the foreground style.
    pub fn fg(mut self, style: Style) -> Self {
        self.fg = Some(style);
        self
    }

    /// Set the background style.
    pub fn bg(mut self, style: Style) -> Self {
        self.bg = Some(style);
        self
    }
}

/// A heterogeneous cell input, before normalization.
#[derive(Clone, Debug)]
pub enum CellInput {
    /// Null/absent content.
    Empty,
    /// Plain text.
    Text(String),
    /// An option object with layout overrides.
    Spec(CellSpec),
    /// A dynamic JSON value; unsupported shapes fail normalization.
    Json(Value),
}

impl From<&str> for CellInput {
    fn from(s: &str) -> Self {
        CellInput::Text(s.to_string())
    }
}

impl From<String> for CellInput {
    fn from(s: String) -> Self {
        CellInput::Text(s)
    }
}

impl From<CellSpec> for CellInput {
    fn from(spec: CellSpec) -> Self {
        CellInput::Spec(spec)
    }
}

impl From<Value> for CellInput {
    fn from(value: Value) -> Self {
        CellInput::Json(value)
    }
}

impl From<bool> for CellInput {
    fn from(v: bool) -> Self {
        CellInput::Text(v.to_string())
    }
}

macro_rules! cell_input_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for CellInput {
            fn from(v: $ty) -> Self {
                CellInput::Text(v.to_string())
            }
        })*
    };
}

cell_input_from_number!(i32, i64, i128, u32, u64, usize, f64);

impl<T: Into<CellInput>> From<Option<T>> for CellInput {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellInput::Empty,
        }
    }
}

/// The normalized internal cell record. Immutable once built; referenced
/// from the layout matrix by id for every slot it spans.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    pub content: Content,
    pub col_span: usize,
    pub row_span: usize,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub max_width: Option<usize>,
    pub word_wrap: Option<bool>,
    pub truncate: Option<TruncateSpec>,
    pub fg: Option<Style>,
    pub bg: Option<Style>,
}

impl Cell {
    /// True for the bare empty marker that advances the placement cursor
    /// without claiming a slot.
    pub fn is_placement_gap(&self) -> bool {
        self.content == Content::Empty && self.col_span == 1 && self.row_span == 1
    }
}

/// Raw shape accepted for JSON cell objects.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCellSpec {
    content: Value,
    col_span: Option<u64>,
    row_span: Option<u64>,
    h_align: Option<HAlign>,
    v_align: Option<VAlign>,
    max_width: Option<u64>,
    word_wrap: Option<bool>,
    truncate: Option<RawTruncate>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTruncate {
    Flag(bool),
    Spec {
        #[serde(default)]
        at: TruncateAt,
        #[serde(default)]
        ellipsis: Option<String>,
        #[serde(default)]
        space: bool,
    },
}

/// Reduce one input to a normalized [`Cell`].
///
/// The only fatal outcome: a JSON object without a recognizable `content`
/// field, or a `content` value that is not a string, number, boolean, or
/// null.
pub(crate) fn normalize(input: CellInput) -> Result<Cell, GridError> {
    let spec = match input {
        CellInput::Empty => CellSpec::empty(),
        CellInput::Text(s) => CellSpec::text(s),
        CellInput::Spec(spec) => spec,
        CellInput::Json(value) => spec_from_json(value)?,
    };

    Ok(Cell {
        content: spec.content,
        col_span: spec.col_span.max(1),
        row_span: spec.row_span.max(1),
        h_align: spec.h_align.unwrap_or_default(),
        v_align: spec.v_align.unwrap_or_default(),
        max_width: spec.max_width,
        word_wrap: spec.word_wrap,
        truncate: spec.truncate,
        fg: spec.fg,
        bg: spec.bg,
    })
}

fn spec_from_json(value: Value) -> Result<CellSpec, GridError> {
    match value {
        Value::Null => Ok(CellSpec::empty()),
        Value::String(s) => Ok(CellSpec::text(s)),
        Value::Number(n) => Ok(CellSpec::text(n.to_string())),
        Value::Bool(b) => Ok(CellSpec::text(b.to_string())),
        Value::Object(ref map) => {
            if !map.contains_key("content") {
                return Err(GridError::InvalidCellType(
                    "object without a content field".to_string(),
                ));
            }
            let raw: RawCellSpec = serde_json::from_value(value)
                .map_err(|err| GridError::InvalidCellType(err.to_string()))?;
            let content = match raw.content {
                Value::Null => Content::Empty,
                Value::String(s) => Content::Text(s),
                Value::Number(n) => Content::Text(n.to_string()),
                Value::Bool(b) => Content::Text(b.to_string()),
                other => {
                    return Err(GridError::InvalidCellType(format!(
                        "unsupported content value: {}",
                        other
                    )))
                }
            };
            Ok(CellSpec {
                content,
                col_span: raw.col_span.unwrap_or(1) as usize,
                row_span: raw.row_span.unwrap_or(1) as usize,
                h_align: raw.h_align,
                v_align: raw.v_align,
                max_width: raw.max_width.map(|w| w as usize),
                word_wrap: raw.word_wrap,
                truncate: match raw.truncate {
                    None | Some(RawTruncate::Flag(false)) => None,
                    Some(RawTruncate::Flag(true)) => Some(TruncateSpec::default()),
                    Some(RawTruncate::Spec { at, ellipsis, space }) => Some(TruncateSpec {
                        at,
                        ellipsis: ellipsis.unwrap_or_else(|| "…".to_string()),
                        space,
                    }),
                },
                ..Default::default()
            })
        }
        other => Err(GridError::InvalidCellType(format!(
            "unsupported cell value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_inputs_normalize_to_text() {
        let cell = normalize("hello".into()).unwrap();
        assert_eq!(cell.content, Content::Text("hello".to_string()));
        assert_eq!(cell.col_span, 1);
        assert_eq!(cell.row_span, 1);
    }

    #[test]
    fn numbers_and_bools_stringify_canonically() {
        assert_eq!(
            normalize(42i64.into()).unwrap().content,
            Content::Text("42".to_string())
        );
        assert_eq!(
            normalize(true.into()).unwrap().content,
            Content::Text("true".to_string())
        );
        assert_eq!(
            normalize(170141183460469231731687303715884105727i128.into())
                .unwrap()
                .content,
            Content::Text("170141183460469231731687303715884105727".to_string())
        );
    }

    #[test]
    fn none_is_the_empty_marker_not_empty_string() {
        let empty = normalize(Option::<&str>::None.into()).unwrap();
        assert_eq!(empty.content, Content::Empty);
        assert!(empty.is_placement_gap());

        let blank = normalize("".into()).unwrap();
        assert_eq!(blank.content, Content::Text(String::new()));
        assert!(!blank.is_placement_gap());
    }

    #[test]
    fn spanning_empty_is_not_a_placement_gap() {
        let cell = normalize(CellSpec::empty().col_span(2).into()).unwrap();
        assert!(!cell.is_placement_gap());
    }

    #[test]
    fn zero_spans_coerce_to_one() {
        let cell = normalize(CellSpec::text("x").col_span(0).row_span(0).into()).unwrap();
        assert_eq!(cell.col_span, 1);
        assert_eq!(cell.row_span, 1);
    }

    #[test]
    fn json_scalars_normalize() {
        assert_eq!(
            normalize(json!("hi").into()).unwrap().content,
            Content::Text("hi".to_string())
        );
        assert_eq!(
            normalize(json!(3.5).into()).unwrap().content,
            Content::Text("3.5".to_string())
        );
        assert_eq!(normalize(json!(null).into()).unwrap().content, Content::Empty);
    }

    #[test]
    fn json_object_with_options() {
        let cell = normalize(
            json!({
                "content": "total",
                "colSpan": 2,
                "hAlign": "right",
                "vAlign": "middle",
                "maxWidth": 10
            })
            .into(),
        )
        .unwrap();
        assert_eq!(cell.content, Content::Text("total".to_string()));
        assert_eq!(cell.col_span, 2);
        assert_eq!(cell.h_align, HAlign::Right);
        assert_eq!(cell.v_align, VAlign::Middle);
        assert_eq!(cell.max_width, Some(10));
    }

    #[test]
    fn json_object_without_content_is_fatal() {
        let err = normalize(json!({"colSpan": 2}).into()).unwrap_err();
        assert!(matches!(err, GridError::InvalidCellType(_)));
    }

    #[test]
    fn json_array_and_nested_content_are_fatal() {
        assert!(normalize(json!([1, 2]).into()).is_err());
        assert!(normalize(json!({"content": {"nested": true}}).into()).is_err());
        assert!(normalize(json!({"content": [1]}).into()).is_err());
    }

    #[test]
    fn content_lines_split_on_newlines() {
        assert_eq!(
            Content::Text("a\nb\nc".to_string()).lines(),
            vec!["a", "b", "c"]
        );
        assert_eq!(Content::Empty.lines(), vec![""]);
    }

    #[test]
    fn align_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&HAlign::Center).unwrap(), "\"center\"");
        let parsed: VAlign = serde_json::from_str("\"bottom\"").unwrap();
        assert_eq!(parsed, VAlign::Bottom);
    }
}
