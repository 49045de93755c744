use chrono::NaiveDate;

/// Calendar date sent as a custom field value, always rendered as `YYYY-MM-DD`.
pub const ATTRIBUTE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AttributeDate(NaiveDate);

impl AttributeDate {
    pub fn parse(date: String) -> Result<AttributeDate, String> {
        let trimmed = date.trim();

        if trimmed.is_empty() {
            return Err(String::from("attribute date cannot be empty"));
        }

        NaiveDate::parse_from_str(trimmed, ATTRIBUTE_DATE_FORMAT)
            .map(Self)
            .map_err(|_| format!("{} is not a valid YYYY-MM-DD date", date))
    }
}

impl From<NaiveDate> for AttributeDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for AttributeDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ATTRIBUTE_DATE_FORMAT))
    }
}
