//! Reference token grammar.
//!
//! A reference value names one or more other instances, comma separated,
//! possibly with stray whitespace and trailing separators:
//!
//! ```text
//! WAN2LAN_medium, IPV6_WAN2LAN_medium,
//! Device.IP.Interface.2.,Device.IP.Interface.3.
//! Device.Firewall.Chain.[Alias=='WAN2LAN_medium'].
//! 4
//! ```
//!
//! [`split_references`] cuts a raw value into clean tokens and
//! [`Reference::parse`] classifies each token.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, delimited, eof, opt},
    error::{ContextError, ErrMode},
    token::{take_till, take_until},
};

use dmviz_core::{
    attributes::ALIAS,
    path::{SEPARATOR, is_rooted, parse_instance_id},
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Separator between tokens of a list-valued reference.
pub const LIST_SEPARATOR: char = ',';

/// A single classified reference token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// A positive numeric instance id, relative to an object type.
    Id(u32),
    /// An absolute path starting with `Device.`, without trailing separator.
    Path(&'a str),
    /// `Type.[Alias=='Value']`: the instance of `type_path` whose alias is `alias`.
    Predicate { type_path: &'a str, alias: &'a str },
    /// An alias of an instance, relative to an object type.
    Alias(&'a str),
}

impl<'a> Reference<'a> {
    /// Classifies a token. Returns `None` for an empty token.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmviz_parser::Reference;
    /// assert_eq!(Reference::parse("3"), Some(Reference::Id(3)));
    /// assert_eq!(Reference::parse("Medium"), Some(Reference::Alias("Medium")));
    /// assert_eq!(
    ///     Reference::parse("Device.IP.Interface.2."),
    ///     Some(Reference::Path("Device.IP.Interface.2"))
    /// );
    /// assert_eq!(
    ///     Reference::parse("Device.Firewall.Level.[Alias=='High']"),
    ///     Some(Reference::Predicate { type_path: "Device.Firewall.Level", alias: "High" })
    /// );
    /// ```
    pub fn parse(token: &'a str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let mut input = token;
        if let Ok((type_path, alias)) = predicate.parse_next(&mut input) {
            return Some(Self::Predicate { type_path, alias });
        }

        let token = token.trim_end_matches(SEPARATOR);
        if is_rooted(token) {
            Some(Self::Path(token))
        } else if let Some(id) = parse_instance_id(token) {
            Some(Self::Id(id))
        } else {
            Some(Self::Alias(token))
        }
    }
}

/// Splits a raw reference value into clean tokens.
///
/// Each token is trimmed of whitespace and trailing separators; empty tokens
/// are dropped.
///
/// # Examples
///
/// ```
/// # use dmviz_parser::split_references;
/// assert_eq!(
///     split_references("WAN2LAN_medium, IPV6_WAN2LAN_medium,"),
///     vec!["WAN2LAN_medium", "IPV6_WAN2LAN_medium"]
/// );
/// ```
pub fn split_references(raw: &str) -> Vec<&str> {
    raw.split(LIST_SEPARATOR)
        .map(|token| token.trim().trim_end_matches(SEPARATOR).trim_end())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parse a single- or double-quoted string without escapes
fn quoted<'s>(input: &mut &'s str) -> IResult<&'s str> {
    alt((
        delimited('\'', take_till(0.., '\''), '\''),
        delimited('"', take_till(0.., '"'), '"'),
    ))
    .parse_next(input)
}

/// Parse `Type.[Alias=='Value']` with an optional trailing separator
fn predicate<'s>(input: &mut &'s str) -> IResult<(&'s str, &'s str)> {
    (
        take_until(1.., ".["),
        ".[",
        ALIAS,
        space0,
        "==",
        space0,
        quoted,
        ']',
        opt(SEPARATOR),
        eof,
    )
        .map(|(type_path, _, _, _, _, _, alias, ..)| (type_path, alias.trim()))
        .parse_next(input)
}
