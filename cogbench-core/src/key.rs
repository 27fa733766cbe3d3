use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use string_cache::DefaultAtom as Atom;

/// Platform-neutral key identifier, e.g. `Space`, `ArrowLeft`, `Digit1`, `KeyQ`.
///
/// Identifiers are interned so cloning and comparing keys on the input path is cheap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key(Atom);

impl Key {
    pub const SPACE: &'static str = "Space";
    pub const ARROW_LEFT: &'static str = "ArrowLeft";
    pub const ARROW_RIGHT: &'static str = "ArrowRight";
    pub const ESCAPE: &'static str = "Escape";

    pub fn new(code: &str) -> Self {
        Self(Atom::from(code))
    }

    pub fn space() -> Self {
        Self::new(Self::SPACE)
    }

    pub fn digit(d: u8) -> Self {
        Self::new(&format!("Digit{d}"))
    }

    pub fn letter(c: char) -> Self {
        Self::new(&format!("Key{}", c.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short label suitable for on-screen key hints.
    pub fn label(&self) -> String {
        let code = self.as_str();
        if let Some(d) = code.strip_prefix("Digit") {
            return d.to_string();
        }
        if let Some(k) = code.strip_prefix("Key") {
            if !k.is_empty() {
                return k.to_string();
            }
        }
        if let Some(dir) = code.strip_prefix("Arrow") {
            let mut chars = dir.chars();
            return match chars.next() {
                Some(first) => format!("Arrow{}{}", first, chars.as_str().to_lowercase()),
                None => code.to_string(),
            };
        }
        match code {
            "Escape" => "Esc",
            "ShiftLeft" => "L Shift",
            "ShiftRight" => "R Shift",
            "ControlLeft" => "L Ctrl",
            "ControlRight" => "R Ctrl",
            "AltLeft" => "L Alt",
            "AltRight" => "R Alt",
            other => other,
        }
        .to_string()
    }
}

impl From<&str> for Key {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.as_str())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::new(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_strip_prefixes() {
        assert_eq!(Key::digit(6).label(), "6");
        assert_eq!(Key::letter('q').label(), "Q");
        assert_eq!(Key::new("ArrowLeft").label(), "ArrowLeft");
        assert_eq!(Key::new("ArrowUP").label(), "ArrowUp");
    }

    #[test]
    fn labels_for_modifiers() {
        assert_eq!(Key::new("Escape").label(), "Esc");
        assert_eq!(Key::new("ShiftLeft").label(), "L Shift");
        assert_eq!(Key::new("ControlRight").label(), "R Ctrl");
        assert_eq!(Key::new("AltLeft").label(), "L Alt");
        assert_eq!(Key::space().label(), "Space");
        assert_eq!(Key::new("F5").label(), "F5");
    }

    #[test]
    fn interned_keys_compare_equal() {
        assert_eq!(Key::new("Digit1"), Key::digit(1));
        assert_ne!(Key::digit(1), Key::digit(2));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Key::space()).unwrap();
        assert_eq!(json, "\"Space\"");
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Key::space());
    }
}
