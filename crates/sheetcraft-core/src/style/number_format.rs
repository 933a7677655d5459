//! Number format types

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// 1 - 0
    pub const ID_NUMBER_INT: u32 = 1;
    /// 2 - 0.00
    pub const ID_NUMBER_DEC2: u32 = 2;
    /// 4 - #,##0.00
    pub const ID_NUMBER_SEP_DEC2: u32 = 4;
    /// 9 - 0%
    pub const ID_PERCENT_INT: u32 = 9;
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 22 - m/d/yy h:mm
    pub const ID_DATETIME: u32 = 22;
    /// 49 - @
    pub const ID_TEXT: u32 = 49;

    /// First ID available to custom formats in styles.xml
    pub const FIRST_CUSTOM_ID: u32 = 164;

    /// Create a built-in format by ID (0 is General)
    pub fn from_id(id: u32) -> Self {
        if id == 0 {
            NumberFormat::General
        } else {
            NumberFormat::BuiltIn(id)
        }
    }

    /// Short date (mm-dd-yy), the format applied to date cells
    pub fn date_short() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATE_SHORT)
    }

    /// Date and time (m/d/yy h:mm)
    pub fn datetime() -> Self {
        NumberFormat::BuiltIn(Self::ID_DATETIME)
    }

    /// Percentage (0%)
    pub fn percent() -> Self {
        NumberFormat::BuiltIn(Self::ID_PERCENT_INT)
    }

    /// The `numFmtId` written for this format, if it needs no custom entry
    pub fn builtin_id(&self) -> Option<u32> {
        match self {
            NumberFormat::General => Some(0),
            NumberFormat::BuiltIn(id) => Some(*id),
            NumberFormat::Custom(_) => None,
        }
    }

    /// Get the format code
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => Self::builtin_format_string(*id),
            NumberFormat::Custom(s) => s,
        }
    }

    fn builtin_format_string(id: u32) -> &'static str {
        match id {
            1 => "0",
            2 => "0.00",
            3 => "#,##0",
            4 => "#,##0.00",
            9 => "0%",
            10 => "0.00%",
            11 => "0.00E+00",
            14 => "mm-dd-yy",
            15 => "d-mmm-yy",
            16 => "d-mmm",
            17 => "mmm-yy",
            18 => "h:mm AM/PM",
            19 => "h:mm:ss AM/PM",
            20 => "h:mm",
            21 => "h:mm:ss",
            22 => "m/d/yy h:mm",
            49 => "@",
            _ => "General",
        }
    }

    /// Check if this is a date/time format
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22),
            NumberFormat::Custom(s) => {
                let lower = s.to_lowercase();
                ['y', 'm', 'd', 'h', 's'].iter().any(|c| lower.contains(*c)) && !lower.contains('"')
            }
            NumberFormat::General => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_short() {
        let format = NumberFormat::date_short();
        assert_eq!(format, NumberFormat::BuiltIn(14));
        assert_eq!(format.format_string(), "mm-dd-yy");
        assert!(format.is_date_format());
    }

    #[test]
    fn test_builtin_ids() {
        assert_eq!(NumberFormat::from_id(0), NumberFormat::General);
        assert_eq!(NumberFormat::General.builtin_id(), Some(0));
        assert_eq!(NumberFormat::percent().builtin_id(), Some(9));
        assert_eq!(NumberFormat::Custom("0.000".into()).builtin_id(), None);
        assert!(!NumberFormat::percent().is_date_format());
    }
}
