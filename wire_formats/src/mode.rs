//! Byte-order modes for packed message formats.

/// Byte-order qualifier applied to every multi-byte field of a message.
///
/// `Network` lays out identically to `Big`; `Native` resolves to whatever
/// the target architecture uses. The variants mirror the classic struct
/// prefix characters (`=`, `<`, `>`, `!`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Native,
    Little,
    Big,
    Network,
}

impl Mode {
    /// The prefix character used in mode-qualified format strings.
    pub const fn prefix(self) -> char {
        match self {
            Mode::Native => '=',
            Mode::Little => '<',
            Mode::Big => '>',
            Mode::Network => '!',
        }
    }

    /// Parse a mode prefix character.
    pub const fn from_prefix(c: char) -> Option<Self> {
        match c {
            '=' => Some(Mode::Native),
            '<' => Some(Mode::Little),
            '>' => Some(Mode::Big),
            '!' => Some(Mode::Network),
            _ => None,
        }
    }

    /// The single point where byte order is resolved.
    pub fn is_little_endian(self) -> bool {
        match self {
            Mode::Little => true,
            Mode::Big | Mode::Network => false,
            Mode::Native => cfg!(target_endian = "little"),
        }
    }
}
