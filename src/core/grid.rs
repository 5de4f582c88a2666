//! Template-driven grid layout.
//!
//! A grid is built from a column template and a row template, each a
//! whitespace-separated list of tokens:
//! - `<n>px` reserves exactly `n` pixels,
//! - `<w>fr` (or bare `fr`) takes a share of the remaining space proportional to `w`.
//!
//! Cells are addressed by column letter and 1-based row number (`"d3"`), ranges
//! by two inclusive corners (`"c1:e1"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeToken {
    /// Absolute length in pixels.
    Px(f64),
    /// Flexible weight over the space left after all absolute tokens.
    Fr(f64),
}

impl FromStr for SizeToken {
    type Err = ChartError;

    fn from_str(token: &str) -> ChartResult<Self> {
        let parse_number = |digits: &str| -> ChartResult<f64> {
            let value: f64 = digits.parse().map_err(|_| {
                ChartError::InvalidTemplate(format!("`{token}` is not a number with a unit"))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidTemplate(format!(
                    "`{token}` must be finite and >= 0"
                )));
            }
            Ok(value)
        };

        if let Some(digits) = token.strip_suffix("px") {
            return parse_number(digits).map(Self::Px);
        }
        if let Some(digits) = token.strip_suffix("fr") {
            if digits.is_empty() {
                return Ok(Self::Fr(1.0));
            }
            return parse_number(digits).map(Self::Fr);
        }
        Err(ChartError::InvalidTemplate(format!(
            "`{token}` must end with `px` or `fr`"
        )))
    }
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Fr(weight) => write!(f, "{weight}fr"),
        }
    }
}

/// Ordered sequence of size tokens for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeTemplate {
    tokens: SmallVec<[SizeToken; 8]>,
}

impl SizeTemplate {
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = SizeToken>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &[SizeToken] {
        &self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Splits `total` into one `(start, end)` interval per token.
    ///
    /// Flexible tokens share whatever the absolute tokens leave over; when the
    /// absolute tokens already exceed `total` the flexible tracks collapse to zero.
    #[must_use]
    pub fn resolve(&self, total: f64) -> Vec<(f64, f64)> {
        let fixed: f64 = self
            .tokens
            .iter()
            .map(|token| match token {
                SizeToken::Px(px) => *px,
                SizeToken::Fr(_) => 0.0,
            })
            .sum();
        let weights: f64 = self
            .tokens
            .iter()
            .map(|token| match token {
                SizeToken::Fr(weight) => *weight,
                SizeToken::Px(_) => 0.0,
            })
            .sum();
        let remaining = (total - fixed).max(0.0);

        let mut cursor = 0.0;
        self.tokens
            .iter()
            .map(|token| {
                let size = match token {
                    SizeToken::Px(px) => *px,
                    SizeToken::Fr(weight) if weights > 0.0 => remaining * weight / weights,
                    SizeToken::Fr(_) => 0.0,
                };
                let start = cursor;
                cursor += size;
                (start, cursor)
            })
            .collect()
    }
}

impl FromStr for SizeTemplate {
    type Err = ChartError;

    fn from_str(template: &str) -> ChartResult<Self> {
        let tokens = template
            .split_whitespace()
            .map(str::parse)
            .collect::<ChartResult<SmallVec<[SizeToken; 8]>>>()?;
        if tokens.is_empty() {
            return Err(ChartError::InvalidTemplate(
                "template must contain at least one token".to_owned(),
            ));
        }
        Ok(Self { tokens })
    }
}

impl fmt::Display for SizeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Pixel rectangle resolved from a grid address.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridArea {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
}

impl GridArea {
    #[must_use]
    pub fn from_bounds(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Bounding rectangle of both areas.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::from_bounds(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x1, self.y1, self.width, self.height)
    }
}

/// Zero-based `(column, row)` cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub column: usize,
    pub row: usize,
}

/// Parsed cell or inclusive range address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAddress {
    Cell(CellRef),
    Range(CellRef, CellRef),
}

impl GridAddress {
    pub fn parse(address: &str) -> ChartResult<Self> {
        match address.split_once(':') {
            Some((from, to)) => Ok(Self::Range(
                parse_cell(address, from)?,
                parse_cell(address, to)?,
            )),
            None => parse_cell(address, address).map(Self::Cell),
        }
    }
}

fn parse_cell(address: &str, cell: &str) -> ChartResult<CellRef> {
    let cell = cell.trim();
    let mut chars = cell.chars();
    let Some(letter) = chars.next() else {
        return Err(ChartError::invalid_address(address, "empty cell reference"));
    };
    if !letter.is_ascii_alphabetic() {
        return Err(ChartError::invalid_address(
            address,
            format!("`{cell}` must start with a column letter"),
        ));
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ChartError::invalid_address(
            address,
            format!("`{cell}` must end with a row number"),
        ));
    }
    let row: usize = digits.parse().map_err(|_| {
        ChartError::invalid_address(address, format!("row number in `{cell}` is too large"))
    })?;
    if row == 0 {
        return Err(ChartError::invalid_address(address, "row numbers start at 1"));
    }
    let column = usize::from(letter.to_ascii_lowercase() as u8 - b'a');
    Ok(CellRef {
        column,
        row: row - 1,
    })
}

/// Resolved grid: column and row intervals for a given canvas size.
///
/// A pure function of its templates and size; nothing is cached across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: Vec<(f64, f64)>,
    rows: Vec<(f64, f64)>,
}

impl Grid {
    /// Parses both templates and resolves them against the canvas size.
    pub fn new(width: f64, height: f64, columns: &str, rows: &str) -> ChartResult<Self> {
        let columns: SizeTemplate = columns.parse()?;
        let rows: SizeTemplate = rows.parse()?;
        Ok(Self::from_templates(width, height, &columns, &rows))
    }

    #[must_use]
    pub fn from_templates(
        width: f64,
        height: f64,
        columns: &SizeTemplate,
        rows: &SizeTemplate,
    ) -> Self {
        Self {
            columns: columns.resolve(width),
            rows: rows.resolve(height),
        }
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Resolves a cell (`"d3"`) or inclusive range (`"c1:e1"`) to pixels.
    pub fn get_coords(&self, address: &str) -> ChartResult<GridArea> {
        match GridAddress::parse(address)? {
            GridAddress::Cell(cell) => self.cell_area(address, cell),
            GridAddress::Range(from, to) => {
                let from = self.cell_area(address, from)?;
                let to = self.cell_area(address, to)?;
                Ok(from.union(to))
            }
        }
    }

    fn cell_area(&self, address: &str, cell: CellRef) -> ChartResult<GridArea> {
        let Some(&(x1, x2)) = self.columns.get(cell.column) else {
            return Err(ChartError::invalid_address(
                address,
                format!(
                    "column {} is outside the {}-column template",
                    cell.column + 1,
                    self.columns.len()
                ),
            ));
        };
        let Some(&(y1, y2)) = self.rows.get(cell.row) else {
            return Err(ChartError::invalid_address(
                address,
                format!(
                    "row {} is outside the {}-row template",
                    cell.row + 1,
                    self.rows.len()
                ),
            ));
        };
        Ok(GridArea::from_bounds(x1, y1, x2, y2))
    }
}
