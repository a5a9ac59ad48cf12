use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use maze_types::{wire_representation::Maze, MazeGame};

/// Reads a game from a `.json` wire fixture, anything else is parsed as a text layout
pub(crate) fn load_game(path: &Path) -> Result<MazeGame> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("Could not read {}", path.display()))?;

    let game = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let wire: Maze = serde_json::from_str(&contents)
                .wrap_err_with(|| format!("{} is not a valid maze fixture", path.display()))?;
            MazeGame::try_from(wire)?
        }
        _ => contents
            .parse()
            .wrap_err_with(|| format!("{} is not a valid layout", path.display()))?,
    };

    Ok(game)
}
