//! Strict `application/x-www-form-urlencoded` parsing
//!
//! Used for both the authorize query string and the token request body.
//! Repeated fields are kept (lookups return the first one) and values that
//! don't decode to valid UTF-8 are rejected instead of being replaced with
//! U+FFFD, so identities pass through byte-for-byte or not at all.

use percent_encoding::percent_decode;

use crate::error::FormError;

/// Decoded name/value pairs in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn parse(input: &[u8]) -> Result<Self, FormError> {
        let mut fields = Vec::new();

        for pair in input.split(|b| *b == b'&').filter(|pair| !pair.is_empty()) {
            let (name, value) = match pair.iter().position(|b| *b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &pair[pair.len()..]),
            };

            let name = decode(name).map_err(|_| FormError::InvalidEncoding {
                field: String::from_utf8_lossy(name).into_owned(),
            })?;
            let value = decode(value).map_err(|_| FormError::InvalidEncoding {
                field: name.clone(),
            })?;

            fields.push((name, value));
        }

        Ok(Self(fields))
    }

    /// First value given for `name`, like Go's `url.Values.Get`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn first_owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

fn decode(input: &[u8]) -> Result<String, std::string::FromUtf8Error> {
    let plus_as_space: Vec<u8> = input
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    String::from_utf8(percent_decode(&plus_as_space).collect())
}
