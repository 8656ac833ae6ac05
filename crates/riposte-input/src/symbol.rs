//! Input symbols recorded by the buffers.
//!
//! An [`InputSymbol`] is one atomic directional or button event. Directional
//! symbols are always expressed in a facing-agnostic frame where "forward"
//! means toward the opponent; [`InputSymbol::mirrored`] converts between the
//! two facings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single directional or button event.
///
/// # Example
///
/// ```
/// use riposte_input::InputSymbol;
///
/// assert_eq!(InputSymbol::Forward.mirrored(), InputSymbol::Backward);
/// assert_eq!(InputSymbol::Attack.mirrored(), InputSymbol::Attack);
/// assert!(InputSymbol::ForwardDown.is_directional());
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InputSymbol {
    /// No input this sample.
    #[default]
    None,
    /// Stick up.
    Up,
    /// Stick up and toward the opponent.
    UpForward,
    /// Stick toward the opponent.
    Forward,
    /// Stick down and toward the opponent.
    ForwardDown,
    /// Stick down.
    Down,
    /// Stick down and away from the opponent.
    DownBackward,
    /// Stick away from the opponent.
    Backward,
    /// Stick up and away from the opponent.
    BackwardUp,
    /// Jump button pressed.
    StartJump,
    /// Jump button released.
    StopJump,
    /// Attack button pressed.
    Attack,
    /// Special button pressed.
    Special,
}

impl InputSymbol {
    /// Every symbol, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::None,
        Self::Up,
        Self::UpForward,
        Self::Forward,
        Self::ForwardDown,
        Self::Down,
        Self::DownBackward,
        Self::Backward,
        Self::BackwardUp,
        Self::StartJump,
        Self::StopJump,
        Self::Attack,
        Self::Special,
    ];

    /// The eight stick directions, clockwise from `Up`.
    pub const DIRECTIONS: [Self; 8] = [
        Self::Up,
        Self::UpForward,
        Self::Forward,
        Self::ForwardDown,
        Self::Down,
        Self::DownBackward,
        Self::Backward,
        Self::BackwardUp,
    ];

    /// Returns the symbol as seen by a combatant facing the other way.
    ///
    /// Horizontal components flip; `Up`, `Down`, buttons and `None` are
    /// fixed points. Applying it twice yields the original symbol.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::UpForward => Self::BackwardUp,
            Self::BackwardUp => Self::UpForward,
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
            Self::ForwardDown => Self::DownBackward,
            Self::DownBackward => Self::ForwardDown,
            other => other,
        }
    }

    /// Mirrors the symbol only when the combatant faces left.
    #[must_use]
    pub const fn for_facing(self, facing_right: bool) -> Self {
        if facing_right {
            self
        } else {
            self.mirrored()
        }
    }

    /// Returns `true` for the eight stick directions.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            Self::Up
                | Self::UpForward
                | Self::Forward
                | Self::ForwardDown
                | Self::Down
                | Self::DownBackward
                | Self::Backward
                | Self::BackwardUp
        )
    }

    /// Returns `true` for button edges.
    #[must_use]
    pub const fn is_button(self) -> bool {
        matches!(
            self,
            Self::StartJump | Self::StopJump | Self::Attack | Self::Special
        )
    }

    /// Returns `true` for the empty symbol.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Short label used by diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "---",
            Self::Up => "U",
            Self::UpForward => "UF",
            Self::Forward => "F",
            Self::ForwardDown => "FD",
            Self::Down => "D",
            Self::DownBackward => "DB",
            Self::Backward => "B",
            Self::BackwardUp => "BU",
            Self::StartJump => "Jump+",
            Self::StopJump => "Jump-",
            Self::Attack => "Atk",
            Self::Special => "Sp",
        }
    }
}

impl fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A button edge reported by the device layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonEvent {
    /// Jump pressed.
    JumpPressed,
    /// Jump released.
    JumpReleased,
    /// Attack pressed.
    AttackPressed,
    /// Special pressed.
    SpecialPressed,
}

impl ButtonEvent {
    /// The symbol recorded for this edge.
    #[must_use]
    pub const fn symbol(self) -> InputSymbol {
        match self {
            Self::JumpPressed => InputSymbol::StartJump,
            Self::JumpReleased => InputSymbol::StopJump,
            Self::AttackPressed => InputSymbol::Attack,
            Self::SpecialPressed => InputSymbol::Special,
        }
    }
}
