//! # Mode Gate
//!
//! Operating profile fixed at startup.
//!
//! | Mode | Pointer keys | Accelerometer | Extensions / Motion Plus |
//! |------|--------------|---------------|--------------------------|
//! | `Normal` | emitted | emitted | dropped |
//! | `Extended` | logged only | emitted + logged | logged only |
//! | `Nfs` | emitted | emitted | dropped |

use serde::Deserialize;

/// Operating profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pointer emission, minimal diagnostics
    #[default]
    Normal,
    /// Pointer emission plus diagnostics for every channel
    Extended,
    /// Reserved alternate profile; emits like `Normal`
    Nfs,
}

impl Mode {
    /// Mode selected by a command-line token
    ///
    /// Only `"nfs"` selects [`Mode::Nfs`]; every other token selects
    /// [`Mode::Normal`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wiimote_pointer::bridge::mode::Mode;
    ///
    /// assert_eq!(Mode::from_token("nfs"), Mode::Nfs);
    /// assert_eq!(Mode::from_token("extended"), Mode::Normal);
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token == "nfs" {
            Self::Nfs
        } else {
            Self::Normal
        }
    }

    /// Scroll and primary button keys drive the pointer
    #[must_use]
    pub fn emits_keys(&self) -> bool {
        matches!(self, Self::Normal | Self::Nfs)
    }

    /// IR, Motion-Plus and extension input is processed, and every routed
    /// event is reported as a diagnostic
    #[must_use]
    pub fn shows_diagnostics(&self) -> bool {
        matches!(self, Self::Extended)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Extended => "extended",
            Self::Nfs => "nfs",
        };
        f.write_str(name)
    }
}
