//! Key ordering and key printing capabilities.
//!
//! A tree is built with exactly one ordering and at most one printer. Both are
//! static type parameters: any `Fn(&K, &K) -> bool` is an ordering and any
//! `Fn(&K, &mut dyn io::Write) -> io::Result<()>` is a printer.

use std::fmt::Display;
use std::io::{self, Write};

/// A strict weak order over keys.
///
/// Two keys are equivalent when neither is less than the other.
pub trait KeyOrder<K> {
    /// Returns true if `a` sorts strictly before `b`
    fn less_than(&self, a: &K, b: &K) -> bool;

    /// Returns true if neither key sorts before the other
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less_than(a, b) && !self.less_than(b, a)
    }
}

impl<K, F> KeyOrder<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn less_than(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// The key type's own `Ord` implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord> KeyOrder<K> for NaturalOrder {
    fn less_than(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Writes a single key for the debug printer.
pub trait KeyPrinter<K> {
    fn print_key(&self, key: &K, out: &mut dyn io::Write) -> io::Result<()>;
}

impl<K, F> KeyPrinter<K> for F
where
    F: Fn(&K, &mut dyn io::Write) -> io::Result<()>,
{
    fn print_key(&self, key: &K, out: &mut dyn io::Write) -> io::Result<()> {
        self(key, out)
    }
}

/// Printer that renders keys through their `Display` implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayKeys;

impl<K: Display> KeyPrinter<K> for DisplayKeys {
    fn print_key(&self, key: &K, out: &mut dyn io::Write) -> io::Result<()> {
        write!(out, "{}", key)
    }
}

/// Printer type of a tree constructed without one
pub type PrintFn<K> = fn(&K, &mut dyn io::Write) -> io::Result<()>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Record {
        id: u32,
        payload: &'static str,
    }

    #[test]
    fn test_natural_order() {
        assert!(KeyOrder::<i32>::less_than(&NaturalOrder, &1, &2));
        assert!(!KeyOrder::<i32>::less_than(&NaturalOrder, &2, &2));
        assert!(KeyOrder::<i32>::equivalent(&NaturalOrder, &2, &2));
    }

    #[test]
    fn test_closure_order_on_sub_field() {
        let by_id = |a: &Record, b: &Record| a.id < b.id;
        let a = Record { id: 1, payload: "left" };
        let b = Record { id: 1, payload: "right" };
        let c = Record { id: 2, payload: "" };

        assert!(by_id.equivalent(&a, &b));
        assert!(by_id.less_than(&b, &c));
        assert_ne!(a.payload, b.payload);
    }

    #[test]
    fn test_printers() {
        let mut out = Vec::new();
        DisplayKeys.print_key(&42, &mut out).unwrap();

        let hex: PrintFn<u8> = |key, out| write!(out, "{:#x}", key);
        hex.print_key(&255, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "420xff");
    }
}
