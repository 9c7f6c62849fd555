//! Keyboard mapping from browser key names to game commands.

/// Discrete player commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateClockwise,
    RotateCounterClockwise,
}

/// Map a `KeyboardEvent.key` value to a command.
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" => Some(Command::MoveLeft),
        "ArrowRight" => Some(Command::MoveRight),
        "ArrowDown" => Some(Command::SoftDrop),
        "q" | "Q" => Some(Command::RotateCounterClockwise),
        "w" | "W" => Some(Command::RotateClockwise),
        _ => None,
    }
}
