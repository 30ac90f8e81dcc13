//! Per-field validation rules

use super::field::{FieldId, FormValues, Gender};
use lazy_static::lazy_static;
use regex::Regex;

const INVALID_DATE: &str = "Please enter a valid date in dd/mm/yyyy format";
const MISSING_DATE: &str = "Please provide your date of birth";

lazy_static! {
    static ref EMAIL: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    )
    .expect("email pattern compiles");
    static ref UK_MOBILE: Regex =
        Regex::new(r"^(?:07\d{9}|\+?447\d{9})$").expect("mobile pattern compiles");
    static ref DOB_DAY: Regex =
        Regex::new(r"^(?:0[1-9]|[12][0-9]|3[01])$").expect("day pattern compiles");
    static ref DOB_MONTH: Regex =
        Regex::new(r"^(?:0[1-9]|1[0-2])$").expect("month pattern compiles");
    static ref DOB_YEAR: Regex = Regex::new(r"^[0-9]{4}$").expect("year pattern compiles");
}

/// Validate one field against the current values.
///
/// Returns the message to show next to the field, or `None` when the value
/// passes. The derived date of birth is never validated on its own; its three
/// parts carry the rules. Calendar validity (e.g. 30/02) is not checked.
pub fn validate(field: FieldId, values: &FormValues) -> Option<&'static str> {
    let value = values.get(field);
    match field {
        FieldId::FirstName => required(value, "Please provide your first name"),
        FieldId::LastName => required(value, "Please provide your last name"),
        FieldId::Email => required(value, "Please provide your email address").or_else(|| {
            (!EMAIL.is_match(value)).then_some("Please enter a valid email address")
        }),
        FieldId::Mobile => required(value, "Please provide your mobile number").or_else(|| {
            (!UK_MOBILE.is_match(value)).then_some("Please enter a valid UK mobile number")
        }),
        FieldId::Gender => match Gender::parse(value) {
            Some(gender) if gender.is_real() => None,
            _ => Some("Please select an option"),
        },
        FieldId::DobDay => date_part(value, 2, &DOB_DAY),
        FieldId::DobMonth => date_part(value, 2, &DOB_MONTH),
        FieldId::DobYear => date_part(value, 4, &DOB_YEAR),
        FieldId::Dob | FieldId::Comments => None,
    }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.is_empty().then_some(message)
}

fn date_part(value: &str, len: usize, pattern: &Regex) -> Option<&'static str> {
    if value.is_empty() {
        return Some(MISSING_DATE);
    }
    if value.chars().count() != len || !pattern.is_match(value) {
        return Some(INVALID_DATE);
    }
    None
}
