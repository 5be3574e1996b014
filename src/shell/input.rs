use std::collections::HashSet;

use gridcaster::Intents;
use winit::keyboard::KeyCode;

/// Resolve held keys into this tick's intents.
///
/// Arrows move and strafe, W/S mirror forward and back, A/D turn, Escape quits.
pub fn intents_from_keys(keys: &HashSet<KeyCode>) -> Intents {
    let down = |code| keys.contains(&code);
    Intents {
        forward: down(KeyCode::ArrowUp) || down(KeyCode::KeyW),
        backward: down(KeyCode::ArrowDown) || down(KeyCode::KeyS),
        strafe_left: down(KeyCode::ArrowLeft),
        strafe_right: down(KeyCode::ArrowRight),
        rotate_left: down(KeyCode::KeyA),
        rotate_right: down(KeyCode::KeyD),
        quit: down(KeyCode::Escape),
    }
}
