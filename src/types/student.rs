use anyhow::anyhow;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashMap;

pub(crate) const ATTR_ID: &str = "id";
const ATTR_FULL_NAME: &str = "fullName";
const ATTR_ADDRESS: &str = "address";
const ATTR_EMAIL: &str = "email";
const ATTR_PHONE_NUMBER: &str = "phoneNumber";
const ATTR_CREATED_AT: &str = "createdAt";
const ATTR_UPDATED_AT: &str = "updatedAt";

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub full_name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Matches the needle against the name, email and phone number fields.
    /// The caller lowercases the needle while the stored fields stay as
    /// written, so matching is case-sensitive against a lowercased needle.
    pub fn matches(&self, needle: &str) -> bool {
        self.full_name.contains(needle)
            || self.email.contains(needle)
            || self.phone_number.contains(needle)
    }

    pub(crate) fn into_item(self) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (ATTR_ID.to_owned(), AttributeValue::S(self.id)),
            (ATTR_FULL_NAME.to_owned(), AttributeValue::S(self.full_name)),
            (ATTR_ADDRESS.to_owned(), AttributeValue::S(self.address)),
            (ATTR_EMAIL.to_owned(), AttributeValue::S(self.email)),
            (
                ATTR_PHONE_NUMBER.to_owned(),
                AttributeValue::S(self.phone_number),
            ),
            (
                ATTR_CREATED_AT.to_owned(),
                AttributeValue::S(format_timestamp(self.created_at)),
            ),
            (
                ATTR_UPDATED_AT.to_owned(),
                AttributeValue::S(format_timestamp(self.updated_at)),
            ),
        ])
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for Student {
    type Error = anyhow::Error;

    fn try_from(mut item: HashMap<String, AttributeValue>) -> anyhow::Result<Student> {
        Ok(Student {
            id: take_string(&mut item, ATTR_ID)?,
            full_name: take_string(&mut item, ATTR_FULL_NAME)?,
            address: take_string(&mut item, ATTR_ADDRESS)?,
            email: take_string(&mut item, ATTR_EMAIL)?,
            phone_number: take_string(&mut item, ATTR_PHONE_NUMBER)?,
            created_at: take_timestamp(&mut item, ATTR_CREATED_AT)?,
            updated_at: take_timestamp(&mut item, ATTR_UPDATED_AT)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub full_name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl StudentPatch {
    /// Builds a `SET` update expression covering only the present fields,
    /// always also refreshing `updatedAt`.
    pub(crate) fn update_expression(
        &self,
        updated_at: DateTime<Utc>,
    ) -> (
        String,
        HashMap<String, String>,
        HashMap<String, AttributeValue>,
    ) {
        let mut clauses: Vec<String> = vec![];
        let mut names: HashMap<String, String> = HashMap::new();
        let mut values: HashMap<String, AttributeValue> = HashMap::new();

        let fields = [
            (ATTR_FULL_NAME, "#full_name", ":full_name", &self.full_name),
            (ATTR_ADDRESS, "#address", ":address", &self.address),
            (ATTR_EMAIL, "#email", ":email", &self.email),
            (
                ATTR_PHONE_NUMBER,
                "#phone_number",
                ":phone_number",
                &self.phone_number,
            ),
        ];

        for (attr, name, value, field) in fields {
            if let Some(content) = field {
                clauses.push(format!("{name} = {value}"));
                names.insert(name.to_owned(), attr.to_owned());
                values.insert(value.to_owned(), AttributeValue::S(content.clone()));
            }
        }

        clauses.push("#updated_at = :updated_at".to_owned());
        names.insert("#updated_at".to_owned(), ATTR_UPDATED_AT.to_owned());
        values.insert(
            ":updated_at".to_owned(),
            AttributeValue::S(format_timestamp(updated_at)),
        );

        (format!("SET {}", clauses.join(", ")), names, values)
    }

    #[cfg(test)]
    pub(crate) fn apply_to(&self, student: &mut Student) {
        if let Some(full_name) = &self.full_name {
            student.full_name = full_name.clone();
        }
        if let Some(address) = &self.address {
            student.address = address.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            student.phone_number = phone_number.clone();
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn take_string(item: &mut HashMap<String, AttributeValue>, key: &str) -> anyhow::Result<String> {
    match item.remove(key) {
        Some(AttributeValue::S(value)) => Ok(value),
        Some(_) => Err(anyhow!("`{key}` is not a string attribute")),
        None => Err(anyhow!("`{key}` is missing in the item")),
    }
}

fn take_timestamp(
    item: &mut HashMap<String, AttributeValue>,
    key: &str,
) -> anyhow::Result<DateTime<Utc>> {
    let raw = take_string(item, key)?;

    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| anyhow!("`{key}` is not an RFC 3339 timestamp: {err}"))
}
