use crate::MotionEventError;
use smallvec::SmallVec;
use tactile_geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ToolType {
    #[default]
    Finger,
    Stylus,
    Mouse,
    Eraser,
    Unknown,
}

/// The masked action of a [`MotionEvent`].
///
/// A gesture always starts with `Down` and finishes with `Up` or `Cancel`.
/// Additional pointers join with `PointerDown` and leave with `PointerUp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    Down,
    PointerDown,
    Move,
    PointerUp,
    Up,
    Cancel,
}

impl MotionAction {
    pub fn is_down(self) -> bool {
        matches!(self, MotionAction::Down | MotionAction::PointerDown)
    }

    pub fn is_up(self) -> bool {
        matches!(self, MotionAction::Up | MotionAction::PointerUp)
    }
}

/// One touch point as carried by a [`MotionEvent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    pub position: Point,
    pub pressure: f32,
    pub tool: ToolType,
}

impl Pointer {
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
            pressure: 1.0,
            tool: ToolType::Finger,
        }
    }

    pub fn at(id: PointerId, position: Point) -> Self {
        Self::new(id, position.x, position.y)
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_tool(mut self, tool: ToolType) -> Self {
        self.tool = tool;
        self
    }
}

pub type Pointers = SmallVec<[Pointer; 4]>;

/// A snapshot of every active pointer at the moment an action happened.
///
/// Positions are view-local; `screen_offset` translates them to screen
/// coordinates. When a pointer is lifted (`Up`/`PointerUp`) it is still part
/// of the event, the pointer count only drops with the next event.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    down_time: u64,
    event_time: u64,
    action: MotionAction,
    action_index: usize,
    pointers: Pointers,
    screen_offset: Point,
}

impl MotionEvent {
    pub fn new(
        down_time: u64,
        event_time: u64,
        action: MotionAction,
        action_index: usize,
        pointers: impl IntoIterator<Item = Pointer>,
    ) -> Result<Self, MotionEventError> {
        let pointers: Pointers = pointers.into_iter().collect();
        validate(down_time, event_time, action, action_index, &pointers)?;
        Ok(Self {
            down_time,
            event_time,
            action,
            action_index,
            pointers,
            screen_offset: Point::ZERO,
        })
    }

    pub fn builder(action: MotionAction) -> MotionEventBuilder {
        MotionEventBuilder::new(action)
    }

    pub fn with_screen_offset(mut self, offset: Point) -> Self {
        self.screen_offset = offset;
        self
    }

    pub fn down_time(&self) -> u64 {
        self.down_time
    }

    pub fn event_time(&self) -> u64 {
        self.event_time
    }

    pub fn action(&self) -> MotionAction {
        self.action
    }

    pub fn action_index(&self) -> usize {
        self.action_index
    }

    /// Id of the pointer that went down or up with this event.
    pub fn action_pointer_id(&self) -> PointerId {
        self.pointers[self.action_index].id
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    pub fn pointer(&self, index: usize) -> Option<&Pointer> {
        self.pointers.get(index)
    }

    pub fn pointer_id(&self, index: usize) -> Option<PointerId> {
        self.pointers.get(index).map(|p| p.id)
    }

    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }

    pub fn find_pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.pointers.get(index).map(|p| p.position)
    }

    /// Position of the first pointer.
    pub fn x(&self) -> f32 {
        self.pointers[0].position.x
    }

    /// Position of the first pointer.
    pub fn y(&self) -> f32 {
        self.pointers[0].position.y
    }

    pub fn raw_position(&self, index: usize) -> Option<Point> {
        self.position(index).map(|p| p + self.screen_offset)
    }

    pub fn screen_offset(&self) -> Point {
        self.screen_offset
    }

    /// Pressure of the first pointer.
    pub fn pressure(&self) -> f32 {
        self.pointers[0].pressure
    }

    /// Centroid of every pointer carried by this event.
    pub fn focal_point(&self) -> Point {
        let count = self.pointers.len() as f32;
        let sum = self
            .pointers
            .iter()
            .fold(Point::ZERO, |acc, p| acc + p.position);
        sum / count
    }

    /// Milliseconds since the first `Down` of the gesture.
    pub fn gesture_duration(&self) -> u64 {
        self.event_time - self.down_time
    }
}

fn validate(
    down_time: u64,
    event_time: u64,
    action: MotionAction,
    action_index: usize,
    pointers: &[Pointer],
) -> Result<(), MotionEventError> {
    let count = pointers.len();
    if count == 0 {
        return Err(MotionEventError::NoPointers);
    }
    if action_index >= count {
        return Err(MotionEventError::ActionIndexOutOfRange {
            index: action_index,
            count,
        });
    }
    for (i, pointer) in pointers.iter().enumerate() {
        if pointers[..i].iter().any(|p| p.id == pointer.id) {
            return Err(MotionEventError::DuplicatePointerId { id: pointer.id });
        }
    }
    let count_ok = match action {
        MotionAction::Down | MotionAction::Up => count == 1,
        MotionAction::PointerDown | MotionAction::PointerUp => count >= 2,
        MotionAction::Move | MotionAction::Cancel => true,
    };
    if !count_ok {
        return Err(MotionEventError::PointerCountMismatch { action, count });
    }
    if event_time < down_time {
        return Err(MotionEventError::EventBeforeDown {
            down_time,
            event_time,
        });
    }
    Ok(())
}

/// Incremental construction of a [`MotionEvent`].
#[derive(Clone, Debug)]
pub struct MotionEventBuilder {
    down_time: u64,
    event_time: u64,
    action: MotionAction,
    action_index: usize,
    pointers: Pointers,
    screen_offset: Point,
}

impl MotionEventBuilder {
    pub fn new(action: MotionAction) -> Self {
        Self {
            down_time: 0,
            event_time: 0,
            action,
            action_index: 0,
            pointers: SmallVec::new(),
            screen_offset: Point::ZERO,
        }
    }

    pub fn down_time(mut self, down_time: u64) -> Self {
        self.down_time = down_time;
        self
    }

    pub fn event_time(mut self, event_time: u64) -> Self {
        self.event_time = event_time;
        self
    }

    pub fn action_index(mut self, action_index: usize) -> Self {
        self.action_index = action_index;
        self
    }

    pub fn pointer(mut self, pointer: Pointer) -> Self {
        self.pointers.push(pointer);
        self
    }

    pub fn pointers(mut self, pointers: impl IntoIterator<Item = Pointer>) -> Self {
        self.pointers.extend(pointers);
        self
    }

    pub fn screen_offset(mut self, offset: Point) -> Self {
        self.screen_offset = offset;
        self
    }

    pub fn build(self) -> Result<MotionEvent, MotionEventError> {
        let event = MotionEvent::new(
            self.down_time,
            self.event_time,
            self.action,
            self.action_index,
            self.pointers,
        )?;
        Ok(event.with_screen_offset(self.screen_offset))
    }
}
