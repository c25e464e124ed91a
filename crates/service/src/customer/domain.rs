use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Customer as seen by callers. The picture travels separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
}

impl Customer {
    pub fn from_input(id: Uuid, input: CustomerInput) -> Self {
        Self { id, name: input.name, email: input.email, phone: input.phone, city: input.city }
    }
}

/// Stored row: the customer plus its optional picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub picture: Option<Vec<u8>>,
}

impl CustomerRecord {
    pub fn new(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            city: customer.city,
            picture: None,
        }
    }

    pub fn customer(&self) -> Customer {
        Customer {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            city: self.city.clone(),
        }
    }

    /// Overwrite the contact fields, keeping id and picture.
    pub fn apply(&mut self, customer: Customer) {
        self.name = customer.name;
        self.email = customer.email;
        self.phone = customer.phone;
        self.city = customer.city;
    }
}

impl From<models::customer::Model> for CustomerRecord {
    fn from(m: models::customer::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email, phone: m.phone, city: m.city, picture: m.picture }
    }
}

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Self { id: m.id, name: m.name, email: m.email, phone: m.phone, city: m.city }
    }
}

/// Candidate data for insert and full replace.
///
/// Mandatory fields that are absent or `null` decode as empty, so they
/// surface as a validation error rather than a decoding error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default)]
    pub city: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl CustomerInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), phone: phone.into(), city: None }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// Partial update. Absent or empty fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}
