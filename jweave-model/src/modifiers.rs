//! Access flag sets for classes, methods, and fields.
//!
//! Bit values match the JVM class file specification.

use bitflags::bitflags;

bitflags! {
    #[derive(Default)]
    pub struct Modifiers: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
    }
}

impl Modifiers {
    pub fn from_name(name: &str) -> Option<Modifiers> {
        Some(match name {
            "public" => Modifiers::PUBLIC,
            "private" => Modifiers::PRIVATE,
            "protected" => Modifiers::PROTECTED,
            "static" => Modifiers::STATIC,
            "final" => Modifiers::FINAL,
            "native" => Modifiers::NATIVE,
            "interface" => Modifiers::INTERFACE,
            "abstract" => Modifiers::ABSTRACT,
            "synthetic" => Modifiers::SYNTHETIC,
            _ => return None,
        })
    }

    /// Fold a list of modifier names; unknown names are skipped.
    pub fn from_names<I, S>(names: I) -> Modifiers
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|n| Modifiers::from_name(n.as_ref()))
            .fold(Modifiers::empty(), |acc, m| acc | m)
    }

    pub fn names(self) -> Vec<&'static str> {
        const TABLE: [(Modifiers, &str); 9] = [
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
            (Modifiers::NATIVE, "native"),
            (Modifiers::INTERFACE, "interface"),
            (Modifiers::ABSTRACT, "abstract"),
            (Modifiers::SYNTHETIC, "synthetic"),
        ];
        TABLE
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|&(_, n)| n)
            .collect()
    }
}
