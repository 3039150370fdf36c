use super::Malformation;
use super::super::*;
use nom::{digit, is_digit, IResult};

named!(field<&str, &str>,
  map!(take_till!(|c: char| c == ','), trim));

named!(pub record<&str, (&str, &str, &str)>,
  do_parse!(
    name: call!(field) >>
    complete!(tag!(",")) >>
    left: call!(field) >>
    complete!(tag!(",")) >>
    right: call!(field) >>
    eof!() >>
    (name, left, right)));

named!(mass<&str, u64>,
  map_res!(digit, |s: &str| s.parse::<u64>()));

/// Digit-only fields are masses, anything else names another scale.
pub fn pan_content(field: &str) -> Result<PanContent, Malformation> {
    if field.is_empty() {
        return Err(Malformation::EmptyPan);
    }
    if field.bytes().all(is_digit) {
        return match mass(field) {
            IResult::Done("", value) => Ok(PanContent::Literal(value)),
            _ => Err(Malformation::MassOverflow),
        };
    }
    Ok(PanContent::Reference(Name::new(field)))
}

pub fn scale_name(field: &str) -> Result<Name, Malformation> {
    if field.is_empty() {
        return Err(Malformation::EmptyName);
    }
    Ok(Name::new(field))
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || c == '\t')
}
