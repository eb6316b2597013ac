// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

pub const DEFAULT_FIRST_NAME: &str = "First";
pub const DEFAULT_LAST_NAME: &str = "Last";
pub const DEFAULT_EMAIL: &str = "dev@example.com";

/// Customer details as supplied by the caller. Any field may be absent or
/// blank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomerFields {
    pub email: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,

    pub last_name: String,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address1: String,

    /// The only optional line; sent as "" when not supplied.
    pub address2: String,

    pub city: String,

    pub region: String,

    pub postal_code: String,

    pub country: String,
}

/// The address sub-fields that become mandatory once any one of them is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressField {
    Address1,
    City,
    Region,
    Postal,
    Country,
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            AddressField::Address1 => "address1",
            AddressField::City => "city",
            AddressField::Region => "region",
            AddressField::Postal => "postal",
            AddressField::Country => "country",
        };

        write!(f, "{name}")
    }
}

/// Some, but not all, of the required address fields were supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressError {
    pub missing: Vec<AddressField>,
}

impl std::fmt::Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let missing = self
            .missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        write!(
            f,
            "if any address field is specified, address1, city, region, \
            postal, country are all required; address2 is optional \
            (missing: {missing})"
        )
    }
}

impl std::error::Error for AddressError {}

/// Returns the value if it has any non-whitespace content.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl CustomerFields {
    /// Build the customer payload sent with a checkout.
    ///
    /// Name and email fall back to fixed defaults, the phone is dropped when
    /// blank, and the address is all-or-nothing across address1, city,
    /// region, postal and country.
    pub fn build(&self) -> Result<Customer, AddressError> {
        let first_name =
            non_blank(&self.first).unwrap_or(DEFAULT_FIRST_NAME).to_string();
        let last_name =
            non_blank(&self.last).unwrap_or(DEFAULT_LAST_NAME).to_string();
        let email = non_blank(&self.email).unwrap_or(DEFAULT_EMAIL).to_string();
        let phone_number = non_blank(&self.phone).map(str::to_string);

        Ok(Customer {
            first_name,
            last_name,
            email,
            phone_number,
            address: self.build_address()?,
        })
    }

    fn build_address(&self) -> Result<Option<Address>, AddressError> {
        let required = [
            (AddressField::Address1, non_blank(&self.address1)),
            (AddressField::City, non_blank(&self.city)),
            (AddressField::Region, non_blank(&self.region)),
            (AddressField::Postal, non_blank(&self.postal)),
            (AddressField::Country, non_blank(&self.country)),
        ];

        if required.iter().all(|(_, value)| value.is_none()) {
            return Ok(None);
        }

        let missing: Vec<AddressField> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| *field)
            .collect();

        let [
            (_, Some(address1)),
            (_, Some(city)),
            (_, Some(region)),
            (_, Some(postal_code)),
            (_, Some(country)),
        ] = required
        else {
            return Err(AddressError { missing });
        };

        Ok(Some(Address {
            address1: address1.to_string(),
            address2: self.address2.clone().unwrap_or_default(),
            city: city.to_string(),
            region: region.to_string(),
            postal_code: postal_code.to_string(),
            country: country.to_string(),
        }))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::{AddressError, AddressField, CustomerFields};

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_defaults_without_address() {
        let customer = CustomerFields::default().build().unwrap();

        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "firstName": "First",
                "lastName": "Last",
                "email": "dev@example.com",
            })
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let fields = CustomerFields {
            first: s("  "),
            last: s(""),
            email: s("\t"),
            phone: s("   "),
            address2: s("Suite 9"),
            ..Default::default()
        };

        let customer = fields.build().unwrap();

        // A lone address2 does not pull in an address, and a blank phone is
        // dropped rather than defaulted.
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "firstName": "First",
                "lastName": "Last",
                "email": "dev@example.com",
            })
        );
    }

    #[test]
    fn test_supplied_name_and_email() {
        let fields = CustomerFields {
            first: s("Jane"),
            last: s("Doe"),
            email: s("jane@x.com"),
            ..Default::default()
        };

        let customer = fields.build().unwrap();

        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@x.com",
            })
        );
    }

    #[test]
    fn test_phone_is_passed_through() {
        let fields =
            CustomerFields { phone: s("816-555-0100"), ..Default::default() };

        let customer = fields.build().unwrap();

        assert_eq!(customer.phone_number.as_deref(), Some("816-555-0100"));
        assert_eq!(
            serde_json::to_value(&customer).unwrap()["phoneNumber"],
            json!("816-555-0100")
        );
    }

    #[test]
    fn test_partial_address_names_missing_fields() {
        let fields = CustomerFields {
            address1: s("1 Main"),
            city: s("KC"),
            ..Default::default()
        };

        let error = fields.build().unwrap_err();

        assert_eq!(
            error.missing,
            vec![
                AddressField::Region,
                AddressField::Postal,
                AddressField::Country
            ]
        );

        let message = error.to_string();
        assert!(message.contains("address2 is optional"));
        assert!(message.ends_with("(missing: region, postal, country)"));
    }

    #[test]
    fn test_any_single_address_field_requires_the_rest() {
        let all = [
            AddressField::Address1,
            AddressField::City,
            AddressField::Region,
            AddressField::Postal,
            AddressField::Country,
        ];

        for field in all {
            let mut fields = CustomerFields::default();
            let value = s("x");

            match field {
                AddressField::Address1 => fields.address1 = value,
                AddressField::City => fields.city = value,
                AddressField::Region => fields.region = value,
                AddressField::Postal => fields.postal = value,
                AddressField::Country => fields.country = value,
            }

            let expected: Vec<AddressField> =
                all.iter().copied().filter(|f| *f != field).collect();

            assert_eq!(
                fields.build(),
                Err(AddressError { missing: expected }),
                "only {field} set"
            );
        }
    }

    #[test]
    fn test_whitespace_address_field_counts_as_missing() {
        let fields = CustomerFields {
            address1: s("1 Main"),
            city: s("KC"),
            region: s("MO"),
            postal: s(" "),
            country: s("US"),
            ..Default::default()
        };

        assert_eq!(
            fields.build().unwrap_err().missing,
            vec![AddressField::Postal]
        );
    }

    #[test]
    fn test_full_address() {
        let fields = CustomerFields {
            address1: s("1 Main"),
            city: s("KC"),
            region: s("MO"),
            postal: s("64106"),
            country: s("US"),
            ..Default::default()
        };

        let customer = fields.build().unwrap();

        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "firstName": "First",
                "lastName": "Last",
                "email": "dev@example.com",
                "address": {
                    "address1": "1 Main",
                    "address2": "",
                    "city": "KC",
                    "region": "MO",
                    "postalCode": "64106",
                    "country": "US",
                },
            })
        );
    }

    #[test]
    fn test_full_address_with_address2() {
        let fields = CustomerFields {
            address1: s("1 Main"),
            address2: s("Apt 4"),
            city: s("KC"),
            region: s("MO"),
            postal: s("64106"),
            country: s("US"),
            ..Default::default()
        };

        let address = fields.build().unwrap().address.unwrap();

        assert_eq!(address.address2, "Apt 4");
        assert_eq!(address.postal_code, "64106");
    }

    #[test]
    fn test_build_is_idempotent() {
        let fields = CustomerFields {
            first: s("Jane"),
            phone: s("555"),
            address1: s("1 Main"),
            city: s("KC"),
            region: s("MO"),
            postal: s("64106"),
            country: s("US"),
            ..Default::default()
        };

        assert_eq!(fields.build().unwrap(), fields.build().unwrap());

        let partial = CustomerFields { city: s("KC"), ..Default::default() };
        assert_eq!(partial.build(), partial.build());
    }
}
