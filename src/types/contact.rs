use tracing::warn;

/// The semantic type of a phone column. The order of `PhoneType::COLUMNS` is the order
/// of the phone columns in the input, and also the order numbers are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneType {
    Home,
    Mobile,
    Work,
}

impl PhoneType {
    pub const COLUMNS: [PhoneType; 3] = [PhoneType::Home, PhoneType::Mobile, PhoneType::Work];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Mobile => "mobile",
            Self::Work => "work",
        }
    }
}

impl std::fmt::Display for PhoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneNumber {
    pub type_: PhoneType,
    /// Position among the surviving numbers of the contact, not the column index.
    pub sequence_id: usize,
    pub value: String,
}

impl PhoneNumber {
    /// Only the first surviving number is marked as the preferred one.
    pub fn priority(&self) -> u8 {
        if self.sequence_id == 0 {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub numbers: Vec<PhoneNumber>,
}

impl From<ContactFields> for Contact {
    fn from(fields: ContactFields) -> Self {
        let name = [fields.first_name.as_deref(), fields.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let phones = [fields.phone_home, fields.phone_mobile, fields.phone_work];

        let mut numbers = Vec::new();
        for (type_, value) in PhoneType::COLUMNS.into_iter().zip(phones) {
            let value = match value {
                Some(value) => value,
                None => continue,
            };

            if !is_numeric(&value) {
                if !value.is_empty() {
                    warn!(
                        id = %fields.id,
                        phone = %type_,
                        "dropping non-numeric phone number {:?}",
                        value
                    );
                }
                continue;
            }

            numbers.push(PhoneNumber {
                type_,
                sequence_id: numbers.len(),
                value,
            });
        }

        Contact {
            id: fields.id,
            name,
            numbers,
        }
    }
}

/// A phone value counts as present if it reads as a (non-NaN) number. Anything else,
/// including formatted numbers such as "555-1234", is treated as an empty column.
fn is_numeric(token: &str) -> bool {
    token
        .trim()
        .parse::<f64>()
        .map_or(false, |value| !value.is_nan())
}

/// One input row, deserialized positionally by the csv crate. Empty fields come through
/// as `None`. Header names are never consulted, only column positions.
#[derive(serde::Deserialize, Debug, Default)]
pub struct ContactFields {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_home: Option<String>,
    pub phone_mobile: Option<String>,
    pub phone_work: Option<String>,
}

impl ContactFields {
    /// Number of meaningful leading columns in a row.
    pub const COUNT: usize = 6;
}
