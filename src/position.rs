//! Field position resolution
//!
//! A record describes its fields as an ordered table of descriptors. Each
//! descriptor carries an optional position annotation; fields without a
//! usable annotation take their 1-based declaration index instead, so no
//! field is ever dropped.

use crate::field::Field;

/// Read-only field descriptor used while encoding
pub struct FieldRef<'a> {
    /// Field name, used in error reports
    pub name: &'static str,
    /// Raw position annotation, e.g. `"3"`
    pub annotation: Option<&'static str>,
    /// Field value
    pub value: &'a dyn Field,
}

/// Mutable field descriptor used while decoding
pub struct FieldMut<'a> {
    /// Field name, used in error reports
    pub name: &'static str,
    /// Raw position annotation, e.g. `"3"`
    pub annotation: Option<&'static str>,
    /// Field storage
    pub target: &'a mut dyn Field,
}

impl<'a> FieldRef<'a> {
    /// Descriptor that falls back to declaration order
    #[inline]
    pub fn new(name: &'static str, value: &'a dyn Field) -> Self {
        Self {
            name,
            annotation: None,
            value,
        }
    }

    /// Descriptor with an explicit position annotation
    #[inline]
    pub fn tagged(name: &'static str, annotation: &'static str, value: &'a dyn Field) -> Self {
        Self {
            name,
            annotation: Some(annotation),
            value,
        }
    }
}

impl<'a> FieldMut<'a> {
    /// Descriptor that falls back to declaration order
    #[inline]
    pub fn new(name: &'static str, target: &'a mut dyn Field) -> Self {
        Self {
            name,
            annotation: None,
            target,
        }
    }

    /// Descriptor with an explicit position annotation
    #[inline]
    pub fn tagged(
        name: &'static str,
        annotation: &'static str,
        target: &'a mut dyn Field,
    ) -> Self {
        Self {
            name,
            annotation: Some(annotation),
            target,
        }
    }
}

/// A record type whose fields map onto array slots
///
/// Both methods must list the same fields in the same order. The
/// [`positional!`](crate::positional) macro derives them from a struct
/// definition.
pub trait Record: Default {
    /// Field table for encoding
    fn fields(&self) -> Vec<FieldRef<'_>>;

    /// Field table for decoding
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;
}

/// A field paired with its resolved 1-based position
#[derive(Debug)]
pub struct Positioned<T> {
    /// Field name
    pub name: &'static str,
    /// Resolved position, always >= 1
    pub position: usize,
    /// Field value or storage
    pub value: T,
}

/// Parse a position annotation
///
/// Accepts a positive base-10 integer, optionally quoted and surrounded by
/// whitespace. Anything else yields `None`.
pub fn parse_annotation(annotation: &str) -> Option<usize> {
    let trimmed = annotation.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    match unquoted.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(pos) => Some(pos),
    }
}

/// Resolve one field's position from its annotation and 0-based index
#[inline]
pub fn resolve_position(annotation: Option<&str>, index: usize) -> usize {
    annotation.and_then(parse_annotation).unwrap_or(index + 1)
}

/// Resolve the encoding table of a record
pub fn resolve<R: Record>(record: &R) -> Vec<Positioned<&dyn Field>> {
    let resolved: Vec<_> = record
        .fields()
        .into_iter()
        .enumerate()
        .map(|(index, field)| Positioned {
            name: field.name,
            position: resolve_position(field.annotation, index),
            value: field.value,
        })
        .collect();
    report_duplicates(resolved.iter().map(|p| (p.name, p.position)));
    resolved
}

/// Resolve the decoding table of a record
pub fn resolve_mut<R: Record>(record: &mut R) -> Vec<Positioned<&mut dyn Field>> {
    let resolved: Vec<_> = record
        .fields_mut()
        .into_iter()
        .enumerate()
        .map(|(index, field)| Positioned {
            name: field.name,
            position: resolve_position(field.annotation, index),
            value: field.target,
        })
        .collect();
    report_duplicates(resolved.iter().map(|p| (p.name, p.position)));
    resolved
}

/// Largest resolved position, 0 for an empty table
#[inline]
pub fn max_position<T>(table: &[Positioned<T>]) -> usize {
    table.iter().map(|p| p.position).max().unwrap_or(0)
}

/// Positions claimed by more than one field, in ascending order
pub fn duplicate_positions<I>(positions: I) -> Vec<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut sorted: Vec<usize> = positions.into_iter().collect();
    sorted.sort_unstable();
    let mut dups: Vec<usize> = sorted
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| w[0])
        .collect();
    dups.dedup();
    dups
}

// Duplicates are legal: the last declared field wins the slot on encode.
fn report_duplicates<'n, I>(entries: I)
where
    I: Iterator<Item = (&'n str, usize)> + Clone,
{
    let dups = duplicate_positions(entries.clone().map(|(_, pos)| pos));
    for pos in dups {
        let names: Vec<&str> = entries
            .clone()
            .filter(|(_, p)| *p == pos)
            .map(|(name, _)| name)
            .collect();
        tracing::debug!(position = pos, fields = ?names, "duplicate field position");
    }
}
