//! Deserializers for fields the API sends in more than one JSON shape.
//!
//! Numeric fields arrive either as numbers or as numeric strings, and image
//! references either as one string or as an array of strings.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use storefront_core::{DomainError, DomainResult, Price};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageRef {
    One(String),
    Many(Vec<String>),
}

impl ImageRef {
    fn into_vec(self) -> Vec<String> {
        match self {
            ImageRef::One(url) => vec![url],
            ImageRef::Many(urls) => urls,
        }
    }
}

fn to_price(raw: NumberOrText) -> DomainResult<Price> {
    match raw {
        NumberOrText::Number(n) => Price::new(n),
        NumberOrText::Text(s) => s.parse(),
    }
}

fn to_count(raw: NumberOrText) -> DomainResult<u64> {
    match raw {
        NumberOrText::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
            Ok(n as u64)
        }
        NumberOrText::Number(n) => Err(DomainError::validation(format!(
            "expected a non-negative integer, got {n}"
        ))),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("expected a non-negative integer, got {s:?}"))),
    }
}

fn is_blank(raw: &NumberOrText) -> bool {
    matches!(raw, NumberOrText::Text(s) if s.trim().is_empty())
}

pub(crate) fn price<'de, D>(deserializer: D) -> Result<Price, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumberOrText::deserialize(deserializer)?;
    to_price(raw).map_err(de::Error::custom)
}

pub(crate) fn opt_price<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if is_blank(&raw) => Ok(None),
        Some(raw) => to_price(raw).map(Some).map_err(de::Error::custom),
    }
}

pub(crate) fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if is_blank(&raw) => Ok(None),
        Some(raw) => to_count(raw).map(Some).map_err(de::Error::custom),
    }
}

pub(crate) fn image_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ImageRef>::deserialize(deserializer)?
        .map(ImageRef::into_vec)
        .unwrap_or_default())
}

pub(crate) fn first_image<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(image_list(deserializer)?
        .into_iter()
        .find(|url| !url.trim().is_empty()))
}
