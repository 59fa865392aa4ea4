use calamine::Data;
use chrono::NaiveDateTime;
use std::fmt::Display;

/// A single scalar cell value.
///
/// Date, time and duration cells are folded into text at load time so that
/// every downstream stage only deals with plain scalars.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Bool(bool),
    /// Numeric values
    Number(f64),
    /// Text values, including formatted dates and error strings
    Text(String),
}

impl CellValue {
    /// Returns true if the cell contains no data.
    /// Empty-string text counts as empty for trimming purposes.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.is_empty(),
            _ => false,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Self::Empty,
            Data::Bool(value) => Self::Bool(*value),
            Data::Int(value) => Self::Number(*value as f64),
            Data::Float(value) => Self::Number(*value),
            Data::String(value) => Self::Text(value.to_owned()),
            Data::DateTime(value) => match value.as_datetime() {
                Some(datetime) => Self::Text(datetime_text(datetime, value.as_f64())),
                None => Self::Number(value.as_f64()),
            },
            Data::DateTimeIso(value) => Self::Text(value.replace('T', " ")),
            Data::DurationIso(value) => Self::Text(value.to_owned()),
            Data::Error(value) => Self::Text(value.to_string()),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Formats an Excel datetime as date, time or datetime text depending on the
/// serial value: no fraction means date only, at most one day means time only.
fn datetime_text(datetime: NaiveDateTime, serial: f64) -> String {
    if serial.fract() == 0.0 {
        datetime.date().to_string()
    } else if serial <= 1.0 {
        datetime.time().to_string()
    } else {
        datetime.to_string()
    }
}
