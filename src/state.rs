use crate::geometry::Point;

pub const DEFAULT_COLOR: &str = "#ff0000";
pub const DEFAULT_PEN_WIDTH: f64 = 5.0;
pub const RESIZE_DEBOUNCE_MS: i32 = 100;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Phase {
    Idle,
    Pressed,
}

/// The closed set of events that drive the interaction state machine.
/// `transition` matches every variant without a wildcard arm, so an event
/// kind it does not handle cannot exist at runtime.
#[derive(Clone, Debug)]
pub enum Action {
    Press,
    Depress,
    SetAxis(Point),
    ChangeColor(String),
}

/// A paint request produced by a transition, applied to the surface by
/// the caller. The state machine itself never touches the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    BeginPath { at: Option<Point> },
    Segment { from: Point, to: Point, color: String },
}

pub struct InteractionState {
    pub phase: Phase,
    pub current_color: String,
    pub pen_width: f64,
    pub last_position: Option<Point>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            current_color: DEFAULT_COLOR.to_string(),
            pen_width: DEFAULT_PEN_WIDTH,
            last_position: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.phase == Phase::Pressed
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances the state machine by one event and returns the paint the
/// surface should perform, if any.
///
/// `SetAxis` records the position unconditionally, pressed or not, so the
/// next `Press` always has a valid start point. A segment is painted only
/// while pressed and only when a previous position exists.
pub fn transition(state: &mut InteractionState, action: Action) -> Option<Paint> {
    match action {
        Action::Press => {
            state.phase = Phase::Pressed;
            Some(Paint::BeginPath {
                at: state.last_position,
            })
        }
        Action::Depress => {
            state.phase = Phase::Idle;
            None
        }
        Action::SetAxis(point) => {
            let previous = state.last_position.replace(point);
            match (state.phase, previous) {
                (Phase::Pressed, Some(from)) => Some(Paint::Segment {
                    from,
                    to: point,
                    color: state.current_color.clone(),
                }),
                _ => None,
            }
        }
        Action::ChangeColor(color) => {
            state.current_color = color;
            None
        }
    }
}
